//! Procedural placement for coins and enemies
//!
//! Both kinds spawn on a ring around the origin. Coins land in the inner
//! ring, enemies in the outer one, so nothing appears on top of a player
//! that starts at the origin.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::pool::EntityId;
use super::state::{Coin, Enemy};
use crate::ring_point;
use crate::tuning::{SpawnRing, Tuning};

/// Seeded ring sampler
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    coin_ring: SpawnRing,
    enemy_ring: SpawnRing,
}

impl Spawner {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            coin_ring: tuning.coin_ring,
            enemy_ring: tuning.enemy_ring,
        }
    }

    /// Uniform angle in [0, 2π), uniform radius in [min, max)
    pub fn sample_ring(&mut self, ring: &SpawnRing) -> Vec3 {
        let angle = self.rng.random_range(0.0..TAU);
        let radius = uniform(&mut self.rng, ring.min_radius, ring.max_radius);
        ring_point(radius, angle, ring.height)
    }

    pub fn spawn_coin(&mut self, id: EntityId) -> Coin {
        let ring = self.coin_ring;
        Coin {
            id,
            pos: self.sample_ring(&ring),
            spin: 0.0,
        }
    }

    pub fn spawn_enemy(&mut self, id: EntityId) -> Enemy {
        let ring = self.enemy_ring;
        Enemy {
            id,
            pos: self.sample_ring(&ring),
        }
    }
}

/// Uniform sample in [lo, hi); collapses to `lo` for an empty or unbounded range
pub(crate) fn uniform(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if lo.is_finite() && hi.is_finite() && hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}
