//! Hit scoring and particle bursts
//!
//! Particles are cosmetic: they never feed back into score, but their
//! lifecycle is driven by the same hit that scores.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, Millis, ScopeId, TimerId};
use super::state::TimerEvent;
use crate::consts::*;
use crate::heading_vector;

/// Points awarded for one hit at `multiplier`
#[inline]
pub fn points_for(multiplier: u32) -> u64 {
    POINTS_PER_HIT * multiplier as u64
}

/// A burst particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub age_ms: Millis,
}

/// Owner of live particles and their fade timers
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    particles: Vec<Particle>,
    fades: BTreeMap<u32, TimerId>,
    next_id: u32,
}

impl Default for ParticleEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleEmitter {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            fades: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Emit `BURST_SIZE` particles at `at`, spreading evenly outward.
    /// Returns the new particle ids.
    pub fn burst(&mut self, at: Vec2, clock: &mut Clock<TimerEvent>, scope: ScopeId) -> Vec<u32> {
        let mut ids = Vec::with_capacity(BURST_SIZE);
        for i in 0..BURST_SIZE {
            let id = self.next_id;
            self.next_id += 1;

            let angle = TAU * (i as f32 / BURST_SIZE as f32);
            self.particles.push(Particle {
                id,
                pos: at,
                vel: heading_vector(angle) * PARTICLE_SPEED,
                age_ms: 0,
            });
            let timer = clock.after(scope, PARTICLE_LIFETIME_MS, TimerEvent::ParticleFade(id));
            self.fades.insert(id, timer);
            ids.push(id);
        }
        ids
    }

    pub fn advance(&mut self, dt_ms: Millis) {
        for p in &mut self.particles {
            p.pos += p.vel * dt_ms as f32;
            p.age_ms += dt_ms;
        }
    }

    /// Remove a particle; no-op if already gone
    pub fn remove(&mut self, id: u32, clock: &mut Clock<TimerEvent>) -> bool {
        if let Some(timer) = self.fades.remove(&id) {
            clock.cancel(timer);
        }
        match self.particles.iter().position(|p| p.id == id) {
            Some(i) => {
                self.particles.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, clock: &mut Clock<TimerEvent>) {
        for (_, timer) in std::mem::take(&mut self.fades) {
            clock.cancel(timer);
        }
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
