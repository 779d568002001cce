//! Combo counter with inactivity decay

use super::clock::{Clock, Millis, ScopeId, TimerId};
use super::state::TimerEvent;
use crate::consts::{COMBO_STEP, MAX_MULTIPLIER};

/// Score multiplier for a combo count: x1 for 0-2, x2 for 3-5, ... capped at x5
#[inline]
pub fn multiplier(combo: u32) -> u32 {
    (combo / COMBO_STEP + 1).min(MAX_MULTIPLIER)
}

/// Consecutive-hit tracker. At most one decay timer is armed at a time.
#[derive(Debug, Clone, Default)]
pub struct ComboTracker {
    combo: u32,
    decay: Option<TimerId>,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Multiplier the next hit would score with
    pub fn multiplier(&self) -> u32 {
        multiplier(self.combo)
    }

    /// Count a hit. Returns the multiplier from the combo *before* this hit,
    /// then re-arms the decay window.
    pub fn register_hit(
        &mut self,
        clock: &mut Clock<TimerEvent>,
        scope: ScopeId,
        timeout_ms: Millis,
    ) -> u32 {
        let applied = multiplier(self.combo);
        self.combo += 1;
        if let Some(old) = self.decay.take() {
            clock.cancel(old);
        }
        self.decay = Some(clock.after(scope, timeout_ms, TimerEvent::ComboDecay));
        applied
    }

    /// Decay timer fired. Returns the combo that was lost, if `timer` is the armed one.
    pub fn on_decay(&mut self, timer: TimerId) -> Option<u32> {
        if self.decay != Some(timer) {
            return None;
        }
        self.decay = None;
        Some(std::mem::take(&mut self.combo))
    }

    /// Zero the combo and cancel any pending decay
    pub fn reset(&mut self, clock: &mut Clock<TimerEvent>) {
        if let Some(timer) = self.decay.take() {
            clock.cancel(timer);
        }
        self.combo = 0;
    }
}
