//! Coin Chase - simulation core for a coin collecting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, collisions, particles, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, input capture and HUD text live outside this crate. They read
//! the [`sim::Session`] and consume its [`sim::GameEvent`] queue.

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Session setup
    pub const INITIAL_COINS: usize = 10;
    pub const INITIAL_ENEMIES: usize = 5;
    pub const STARTING_LIVES: u8 = 3;
    pub const COIN_VALUE: u64 = 10;

    /// Player movement per tick, and the half-extent of the playable square
    pub const PLAYER_SPEED: f32 = 0.15;
    pub const ARENA_LIMIT: f32 = 20.0;
    /// Cosmetic spin (radians per tick)
    pub const PLAYER_SPIN: f32 = 0.02;
    pub const COIN_SPIN: f32 = 0.03;

    /// Enemy pursuit speed per tick
    pub const ENEMY_SPEED: f32 = 0.05;
    /// Delay before a lost-life enemy comes back
    pub const ENEMY_RESPAWN_DELAY_MS: u32 = 2000;

    /// Collision thresholds (enemies are bigger than coins)
    pub const COIN_PICKUP_RADIUS: f32 = 1.0;
    pub const ENEMY_CONTACT_RADIUS: f32 = 1.2;

    /// Spawn rings around the origin: [min, max) radius and height
    pub const COIN_RING: (f32, f32) = (5.0, 15.0);
    pub const COIN_HEIGHT: f32 = 0.5;
    pub const ENEMY_RING: (f32, f32) = (15.0, 20.0);
    pub const ENEMY_HEIGHT: f32 = 0.0;

    /// Particle bursts
    pub const PARTICLE_BURST: usize = 20;
    pub const PARTICLE_LIFETIME: u32 = 60;
    pub const PARTICLE_GRAVITY: f32 = 0.01;
    /// Horizontal velocity is uniform in [-spread, spread)
    pub const PARTICLE_SPREAD: f32 = 0.15;
    /// Vertical velocity is uniform in [0, lift)
    pub const PARTICLE_LIFT: f32 = 0.3;
}

/// Point on the ground ring at radius `r` and angle `theta`, lifted to `height`
#[inline]
pub fn ring_point(r: f32, theta: f32, height: f32) -> Vec3 {
    Vec3::new(theta.cos() * r, height, theta.sin() * r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_ring_point_axes() {
        let p = ring_point(10.0, 0.0, 0.5);
        assert!((p - Vec3::new(10.0, 0.5, 0.0)).length() < 1e-5);

        let q = ring_point(4.0, FRAC_PI_2, 0.0);
        assert!((q - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-5);
    }
}
