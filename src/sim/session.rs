//! Session aggregate
//!
//! A [`Session`] owns everything one run needs: tuning, the score/lives state
//! machine, the player, the entity pools, RNG streams and the outgoing event
//! queue. Every mutation in a run goes through it.

use glam::Vec3;

use super::particles::ParticleEngine;
use super::pool::{EntityId, EntityIds, EntityPool};
use super::scheduler::{DeferredAction, Scheduler};
use super::spawner::Spawner;
use super::state::{
    Coin, ColorTag, Enemy, EntityKind, GameEvent, GamePhase, GameState, LifeLost, Player,
};
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub state: GameState,
    pub player: Player,
    pub coins: EntityPool<Coin>,
    pub enemies: EntityPool<Enemy>,
    pub particles: ParticleEngine,
    /// Ticks since the session started (keeps counting after game over)
    pub time_ticks: u64,
    scheduler: Scheduler,
    spawner: Spawner,
    ids: EntityIds,
    events: Vec<GameEvent>,
}

impl Session {
    /// Start a run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Start a run: player at the origin, initial coins and enemies placed
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut session = Self {
            seed,
            state: GameState::new(tuning.starting_lives),
            player: Player::default(),
            coins: EntityPool::with_capacity(tuning.initial_coins),
            enemies: EntityPool::with_capacity(tuning.initial_enemies),
            particles: ParticleEngine::new(seed, &tuning),
            time_ticks: 0,
            scheduler: Scheduler::new(),
            spawner: Spawner::new(seed, &tuning),
            ids: EntityIds::default(),
            events: Vec::new(),
            tuning,
        };

        let player_id = session.ids.next_id();
        session.events.push(GameEvent::EntitySpawned {
            kind: EntityKind::Player,
            id: player_id,
            position: session.player.pos,
        });
        for _ in 0..session.tuning.initial_coins {
            session.spawn_coin();
        }
        for _ in 0..session.tuning.initial_enemies {
            session.spawn_enemy();
        }
        session.push_hud();

        log::info!(
            "Session started with seed {} ({} coins, {} enemies, {} lives)",
            seed,
            session.coins.len(),
            session.enemies.len(),
            session.state.lives
        );
        session
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queued events, without taking them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Deferred enemy respawns still waiting to fire
    pub fn pending_spawns(&self) -> usize {
        self.scheduler.pending()
    }

    /// Spawn a coin on the coin ring. No-op after game over.
    pub fn spawn_coin(&mut self) -> Option<EntityId> {
        if !self.is_active() {
            return None;
        }
        let coin = self.spawner.spawn_coin(self.ids.next_id());
        Some(self.insert_coin(coin))
    }

    /// Spawn an enemy on the enemy ring. No-op after game over.
    pub fn spawn_enemy(&mut self) -> Option<EntityId> {
        if !self.is_active() {
            return None;
        }
        let enemy = self.spawner.spawn_enemy(self.ids.next_id());
        Some(self.insert_enemy(enemy))
    }

    /// Put a coin at a fixed position (scripted setups). No-op after game over.
    pub fn place_coin(&mut self, pos: Vec3) -> Option<EntityId> {
        if !self.is_active() {
            return None;
        }
        let id = self.ids.next_id();
        Some(self.insert_coin(Coin { id, pos, spin: 0.0 }))
    }

    /// Put an enemy at a fixed position (scripted setups). No-op after game over.
    pub fn place_enemy(&mut self, pos: Vec3) -> Option<EntityId> {
        if !self.is_active() {
            return None;
        }
        let id = self.ids.next_id();
        Some(self.insert_enemy(Enemy { id, pos }))
    }

    fn insert_coin(&mut self, coin: Coin) -> EntityId {
        log::trace!("Coin {} spawned at {}", coin.id.0, coin.pos);
        self.events.push(GameEvent::EntitySpawned {
            kind: EntityKind::Coin,
            id: coin.id,
            position: coin.pos,
        });
        let id = coin.id;
        self.coins.add(coin);
        id
    }

    fn insert_enemy(&mut self, enemy: Enemy) -> EntityId {
        log::trace!("Enemy {} spawned at {}", enemy.id.0, enemy.pos);
        self.events.push(GameEvent::EntitySpawned {
            kind: EntityKind::Enemy,
            id: enemy.id,
            position: enemy.pos,
        });
        let id = enemy.id;
        self.enemies.add(enemy);
        id
    }

    /// Collect the coin at `index`: score, burst, replacement coin
    ///
    /// Returns false without side effects after game over or for a stale index.
    pub fn collect_coin(&mut self, index: usize) -> bool {
        if !self.is_active() {
            return false;
        }
        let Some(coin) = self.coins.remove_at(index) else {
            return false;
        };

        self.state.award(self.tuning.coin_value);
        self.events.push(GameEvent::EntityDespawned {
            kind: EntityKind::Coin,
            id: coin.id,
        });
        self.explode(coin.pos, ColorTag::Pickup);
        self.spawn_coin();
        self.push_hud();

        log::debug!("Coin {} collected, score {}", coin.id.0, self.state.score);
        true
    }

    /// Player touched the enemy at `index`: lose a life, burst, respawn later
    ///
    /// The last life ends the run and reports the final score. Returns `None`
    /// without side effects after game over or for a stale index.
    pub fn take_hit(&mut self, index: usize) -> Option<LifeLost> {
        if !self.is_active() {
            return None;
        }
        let enemy = self.enemies.remove_at(index)?;
        let lost = self.state.lose_life()?;

        self.events.push(GameEvent::EntityDespawned {
            kind: EntityKind::Enemy,
            id: enemy.id,
        });
        self.explode(enemy.pos, ColorTag::Hit);
        self.push_hud();

        if lost.game_over {
            log::info!("Game over! Final score: {}", self.state.score);
            self.events.push(GameEvent::GameOver {
                final_score: self.state.score,
            });
        } else {
            let fire_tick = self.time_ticks + self.tuning.respawn_delay_ticks();
            self.scheduler.schedule(fire_tick, DeferredAction::SpawnEnemy);
            log::debug!(
                "Hit by enemy {}, {} lives left, respawn at tick {}",
                enemy.id.0,
                lost.lives_left,
                fire_tick
            );
        }
        Some(lost)
    }

    /// Fire every deferred task that is due at the current tick
    pub fn run_due_tasks(&mut self) {
        for action in self.scheduler.take_due(self.time_ticks) {
            match action {
                DeferredAction::SpawnEnemy => {
                    if self.spawn_enemy().is_none() {
                        log::debug!("Dropped deferred enemy spawn: session is over");
                    }
                }
            }
        }
    }

    /// Step particles and report the expired ones
    pub fn advance_particles(&mut self) {
        for id in self.particles.advance() {
            self.events.push(GameEvent::EntityDespawned {
                kind: EntityKind::Particle,
                id,
            });
        }
    }

    fn explode(&mut self, origin: Vec3, color: ColorTag) {
        let count = self.tuning.particle_burst;
        let spawned = self.particles.emit(origin, color, count, &mut self.ids);
        for particle in spawned {
            self.events.push(GameEvent::EntitySpawned {
                kind: EntityKind::Particle,
                id: particle.id,
                position: particle.pos,
            });
        }
        self.events.push(GameEvent::Explosion {
            origin,
            color,
            count,
        });
    }

    fn push_hud(&mut self) {
        self.events.push(GameEvent::HudChanged {
            score: self.state.score,
            lives: self.state.lives,
        });
    }
}
