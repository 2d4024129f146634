//! Particle bursts
//!
//! Particles are purely visual: they fly, fall, and expire. They never touch
//! score, lives or other entities.

use glam::Vec3;
use rand_pcg::Pcg32;

use super::pool::{EntityId, EntityIds, EntityPool};
use super::spawner::uniform;
use super::state::{ColorTag, Particle};
use crate::tuning::Tuning;

/// RNG stream for particles, kept apart from the spawner's
const PARTICLE_STREAM: u64 = 0x70617274;

#[derive(Debug, Clone)]
pub struct ParticleEngine {
    particles: EntityPool<Particle>,
    rng: Pcg32,
    lifetime: u32,
    gravity: f32,
    spread: f32,
    lift: f32,
}

impl ParticleEngine {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            particles: EntityPool::new(),
            rng: Pcg32::new(seed, PARTICLE_STREAM),
            lifetime: tuning.particle_lifetime,
            gravity: tuning.particle_gravity,
            spread: non_negative(tuning.particle_spread),
            lift: non_negative(tuning.particle_lift),
        }
    }

    /// Spawn `count` particles at `origin`, returning the new particles
    pub fn emit(
        &mut self,
        origin: Vec3,
        color: ColorTag,
        count: usize,
        ids: &mut EntityIds,
    ) -> Vec<&Particle> {
        let first = self.particles.len();
        for _ in 0..count {
            let vel = Vec3::new(
                uniform(&mut self.rng, -self.spread, self.spread),
                uniform(&mut self.rng, 0.0, self.lift),
                uniform(&mut self.rng, -self.spread, self.spread),
            );
            self.particles.add(Particle {
                id: ids.next_id(),
                pos: origin,
                vel,
                color,
                ttl_ticks: self.lifetime,
            });
        }
        (first..self.particles.len())
            .filter_map(|i| self.particles.get(i))
            .collect()
    }

    /// Step every particle once and drop the expired ones
    ///
    /// Returns the IDs of removed particles so the renderer can free them.
    pub fn advance(&mut self) -> Vec<EntityId> {
        let mut expired = Vec::new();
        for i in (0..self.particles.len()).rev() {
            let Some(particle) = self.particles.get_mut(i) else {
                continue;
            };
            particle.pos += particle.vel;
            particle.vel.y -= self.gravity;
            particle.ttl_ticks = particle.ttl_ticks.saturating_sub(1);

            if particle.ttl_ticks == 0 {
                if let Some(dead) = self.particles.remove_at(i) {
                    expired.push(dead.id);
                }
            }
        }
        expired
    }

    pub fn particles(&self) -> &EntityPool<Particle> {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Velocity ranges outside [0, inf) collapse to zero
fn non_negative(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
