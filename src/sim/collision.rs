//! Collision detection
//!
//! Everything in the world is treated as a sphere, so a hit is just a
//! distance check against a per-pair threshold. Entity counts are small
//! enough that a linear scan against the player each tick is fine.

use super::state::Positioned;
use super::vector::distance;

/// True if the two entities are strictly closer than `threshold`
#[inline]
pub fn collides<A, B>(a: &A, b: &B, threshold: f32) -> bool
where
    A: Positioned + ?Sized,
    B: Positioned + ?Sized,
{
    distance(a.position(), b.position()) < threshold
}
