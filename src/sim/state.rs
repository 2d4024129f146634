//! Game state and core simulation types
//!
//! Entity types, the score/lives state machine, and the events the core hands
//! to its rendering, HUD and session collaborators.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::pool::EntityId;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Active,
    /// Run ended (terminal)
    GameOver,
}

/// Anything that lives at a point in the world
pub trait Positioned {
    fn position(&self) -> Vec3;
    fn position_mut(&mut self) -> &mut Vec3;
}

/// Entity kinds, as reported to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Coin,
    Enemy,
    Particle,
}

/// Color family of an explosion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTag {
    /// Coin collected
    Pickup,
    /// Enemy contact
    Hit,
}

impl ColorTag {
    /// Display color as 0xRRGGBB
    pub fn rgb(&self) -> u32 {
        match self {
            ColorTag::Pickup => 0xffff00,
            ColorTag::Hit => 0xff0000,
        }
    }
}

/// The player-controlled entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Facing rotation around the vertical axis (radians)
    pub rotation: f32,
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: EntityId,
    pub pos: Vec3,
    /// Cosmetic spin angle (radians)
    pub spin: f32,
}

/// A hazard that pursues the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec3,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: EntityId,
    pub pos: Vec3,
    pub vel: Vec3,
    pub color: ColorTag,
    /// Ticks left before removal
    pub ttl_ticks: u32,
}

macro_rules! impl_positioned {
    ($($ty:ty),*) => {
        $(
            impl Positioned for $ty {
                #[inline]
                fn position(&self) -> Vec3 {
                    self.pos
                }

                #[inline]
                fn position_mut(&mut self) -> &mut Vec3 {
                    &mut self.pos
                }
            }
        )*
    };
}

impl_positioned!(Player, Coin, Enemy, Particle);

/// Notifications for the collaborators around the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Renderer should create a visual
    EntitySpawned {
        kind: EntityKind,
        id: EntityId,
        position: Vec3,
    },
    /// Renderer should release a visual
    EntityDespawned { kind: EntityKind, id: EntityId },
    /// A particle burst started
    Explosion {
        origin: Vec3,
        color: ColorTag,
        count: usize,
    },
    /// HUD should show new values
    HudChanged { score: u64, lives: u8 },
    /// Run ended
    GameOver { final_score: u64 },
}

/// Outcome of a life loss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeLost {
    pub lives_left: u8,
    pub game_over: bool,
}

/// Score, lives and run status
///
/// All mutators are silent no-ops once the phase is `GameOver`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
}

impl GameState {
    pub fn new(lives: u8) -> Self {
        Self {
            score: 0,
            lives,
            phase: if lives > 0 {
                GamePhase::Active
            } else {
                GamePhase::GameOver
            },
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Add points. Returns false (and changes nothing) after game over.
    pub fn award(&mut self, points: u64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.score = self.score.saturating_add(points);
        true
    }

    /// Take one life, ending the run on the last one
    pub fn lose_life(&mut self) -> Option<LifeLost> {
        if !self.is_active() {
            return None;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
        }
        Some(LifeLost {
            lives_left: self.lives,
            game_over: self.lives == 0,
        })
    }
}
