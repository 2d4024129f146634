//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Delayed effects go through the scheduler, never wall-clock timers
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod pool;
pub mod scheduler;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::collides;
pub use particles::ParticleEngine;
pub use pool::{EntityId, EntityIds, EntityPool};
pub use scheduler::{DeferredAction, ScheduledTask, Scheduler};
pub use session::Session;
pub use spawner::Spawner;
pub use state::{
    Coin, ColorTag, Enemy, EntityKind, GameEvent, GamePhase, GameState, LifeLost, Particle,
    Player, Positioned,
};
pub use tick::{TickInput, idle_input, tick};
