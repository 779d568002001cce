//! Live targets: spawning, motion and expiry

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, Millis, ScopeId, TimerId};
use super::difficulty::DifficultyConfig;
use super::state::TimerEvent;
use crate::consts::*;
use crate::heading_vector;

/// A selectable target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    /// Center, in percent of the play surface
    pub pos: Vec2,
    /// Diameter in presentation units
    pub size: f32,
    /// Distance per motion tick (percent of surface)
    pub speed: f32,
    /// Direction of travel (radians)
    pub heading: f32,
}

impl Target {
    /// Random target inside the spawn band
    pub fn random<R: Rng>(id: u32, rng: &mut R, config: &DifficultyConfig) -> Self {
        let x = rng.random_range(SPAWN_MIN..=SPAWN_MAX);
        let y = rng.random_range(SPAWN_MIN..=SPAWN_MAX);
        Self {
            id,
            pos: Vec2::new(x, y),
            size: rng.random_range(TARGET_SIZE_MIN..=TARGET_SIZE_MAX),
            speed: rng.random_range(config.speed_min..=config.speed_max),
            heading: rng.random_range(0.0..TAU),
        }
    }

    /// Advance along a curving path. `ticks` is the number of motion periods elapsed.
    pub fn step(&mut self, ticks: f32) {
        self.pos += heading_vector(self.heading) * self.speed * ticks;
        self.heading += TARGET_CURVATURE * ticks;
    }
}

/// Owner of the live target set.
///
/// Each live target has exactly one pending expiry timer on the round clock.
#[derive(Debug, Clone)]
pub struct TargetPool {
    /// Sorted by id (spawn order)
    targets: Vec<Target>,
    expiries: BTreeMap<u32, TimerId>,
    next_id: u32,
}

impl Default for TargetPool {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetPool {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            expiries: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Create one target and schedule its expiry `target_lifetime_ms` from now.
    ///
    /// Ids keep increasing across rounds.
    pub fn spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        config: &DifficultyConfig,
        clock: &mut Clock<TimerEvent>,
        scope: ScopeId,
    ) -> &Target {
        let id = self.next_id;
        self.next_id += 1;

        let timer = clock.after(scope, config.target_lifetime_ms, TimerEvent::Expire(id));
        self.expiries.insert(id, timer);
        self.targets.push(Target::random(id, rng, config));
        &self.targets[self.targets.len() - 1]
    }

    /// Move every live target by `dt_ms` worth of motion ticks
    pub fn advance(&mut self, dt_ms: Millis) {
        let ticks = dt_ms as f32 / MOTION_PERIOD_MS as f32;
        for target in &mut self.targets {
            target.step(ticks);
        }
    }

    /// Remove a target, canceling its expiry. No-op if it is already gone.
    pub fn remove(&mut self, id: u32, clock: &mut Clock<TimerEvent>) -> Option<Target> {
        if let Some(timer) = self.expiries.remove(&id) {
            clock.cancel(timer);
        }
        let index = self.targets.iter().position(|t| t.id == id)?;
        Some(self.targets.remove(index))
    }

    /// Drop every target and cancel all pending expiries
    pub fn clear(&mut self, clock: &mut Clock<TimerEvent>) {
        for (_, timer) in std::mem::take(&mut self.expiries) {
            clock.cancel(timer);
        }
        self.targets.clear();
    }

    pub fn get(&self, id: u32) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
