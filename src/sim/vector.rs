//! Vector helpers used by motion and collision code
//!
//! Thin wrappers over `glam::Vec3`. The only behavior beyond glam is the
//! explicit zero-length guard in [`normalize`].

use glam::Vec3;

/// Magnitudes below this normalize to the zero vector
pub const NORMALIZE_EPSILON: f32 = 1e-6;

#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    a + b
}

#[inline]
pub fn subtract(a: Vec3, b: Vec3) -> Vec3 {
    a - b
}

#[inline]
pub fn scale(v: Vec3, s: f32) -> Vec3 {
    v * s
}

/// Unit vector in the direction of `v`, or zero when `v` has no direction
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    let len = v.length();
    if len < NORMALIZE_EPSILON {
        Vec3::ZERO
    } else {
        v / len
    }
}

#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    subtract(a, b).length()
}
