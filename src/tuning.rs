//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through [`Tuning`], so a
//! JSON file can rebalance a session without touching code. Missing fields
//! fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// A `[min, max)` radius band on the ground plane, lifted to `height`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRing {
    pub min_radius: f32,
    pub max_radius: f32,
    pub height: f32,
}

impl SpawnRing {
    pub const fn new((min_radius, max_radius): (f32, f32), height: f32) -> Self {
        Self {
            min_radius,
            max_radius,
            height,
        }
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    pub initial_coins: usize,
    pub initial_enemies: usize,
    pub starting_lives: u8,
    pub coin_value: u64,
    /// Ticks per second the driver runs the simulation at
    pub tick_rate_hz: u32,

    // === Player ===
    pub player_speed: f32,
    /// Half-extent of the playable square, applied to every axis
    pub arena_limit: f32,
    pub player_spin: f32,

    // === Coins ===
    pub coin_ring: SpawnRing,
    pub coin_pickup_radius: f32,
    pub coin_spin: f32,

    // === Enemies ===
    pub enemy_ring: SpawnRing,
    pub enemy_contact_radius: f32,
    pub enemy_speed: f32,
    pub enemy_respawn_delay_ms: u32,

    // === Particles ===
    pub particle_burst: usize,
    pub particle_lifetime: u32,
    pub particle_gravity: f32,
    pub particle_spread: f32,
    pub particle_lift: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_coins: INITIAL_COINS,
            initial_enemies: INITIAL_ENEMIES,
            starting_lives: STARTING_LIVES,
            coin_value: COIN_VALUE,
            tick_rate_hz: TICK_RATE_HZ,

            player_speed: PLAYER_SPEED,
            arena_limit: ARENA_LIMIT,
            player_spin: PLAYER_SPIN,

            coin_ring: SpawnRing::new(COIN_RING, COIN_HEIGHT),
            coin_pickup_radius: COIN_PICKUP_RADIUS,
            coin_spin: COIN_SPIN,

            enemy_ring: SpawnRing::new(ENEMY_RING, ENEMY_HEIGHT),
            enemy_contact_radius: ENEMY_CONTACT_RADIUS,
            enemy_speed: ENEMY_SPEED,
            enemy_respawn_delay_ms: ENEMY_RESPAWN_DELAY_MS,

            particle_burst: PARTICLE_BURST,
            particle_lifetime: PARTICLE_LIFETIME,
            particle_gravity: PARTICLE_GRAVITY,
            particle_spread: PARTICLE_SPREAD,
            particle_lift: PARTICLE_LIFT,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.tick_rate_hz == 0 {
            return Err(TuningError::Invalid("tick_rate_hz must be positive".into()));
        }
        if self.starting_lives == 0 {
            return Err(TuningError::Invalid("starting_lives must be positive".into()));
        }
        for (name, value) in [
            ("coin_pickup_radius", self.coin_pickup_radius),
            ("enemy_contact_radius", self.enemy_contact_radius),
            ("arena_limit", self.arena_limit),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in [
            ("player_speed", self.player_speed),
            ("player_spin", self.player_spin),
            ("coin_spin", self.coin_spin),
            ("enemy_speed", self.enemy_speed),
            ("particle_gravity", self.particle_gravity),
            ("coin_ring.height", self.coin_ring.height),
            ("enemy_ring.height", self.enemy_ring.height),
        ] {
            if !value.is_finite() {
                return Err(TuningError::Invalid(format!("{name} must be finite, got {value}")));
            }
        }
        for (name, ring) in [("coin_ring", self.coin_ring), ("enemy_ring", self.enemy_ring)] {
            let ordered = ring.min_radius >= 0.0 && ring.min_radius < ring.max_radius;
            if !(ordered && ring.max_radius.is_finite()) {
                return Err(TuningError::Invalid(format!(
                    "{name} needs 0 <= min_radius < max_radius < inf, got [{}, {})",
                    ring.min_radius, ring.max_radius
                )));
            }
        }
        for (name, value) in [
            ("particle_spread", self.particle_spread),
            ("particle_lift", self.particle_lift),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid(format!(
                    "{name} must be finite and not negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Seconds per simulation tick; the default rate stands in for zero
    pub fn tick_secs(&self) -> f32 {
        match self.tick_rate_hz {
            0 => SIM_DT,
            hz => 1.0 / hz as f32,
        }
    }

    /// Enemy respawn delay converted to simulation ticks (rounded up)
    pub fn respawn_delay_ticks(&self) -> u64 {
        (self.enemy_respawn_delay_ms as u64 * self.tick_rate_hz as u64).div_ceil(1000)
    }
}
