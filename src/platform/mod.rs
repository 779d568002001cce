//! Platform abstraction layer
//!
//! Maps real frame timestamps onto the simulated round clock, and on web
//! exposes the session to JavaScript.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::Millis;

/// Longest single frame fed to the simulation (tab switches, debugger pauses)
pub const MAX_FRAME_MS: f64 = 100.0;

/// Turns monotonically increasing frame timestamps into whole-millisecond deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
    /// Sub-millisecond remainder carried to the next frame
    carry: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds to advance for a frame stamped `timestamp_ms`.
    ///
    /// The first frame, and any frame that goes backwards, yields 0 and
    /// resynchronizes.
    pub fn tick(&mut self, timestamp_ms: f64) -> Millis {
        let Some(last) = self.last.replace(timestamp_ms) else {
            return 0;
        };
        if !timestamp_ms.is_finite() || timestamp_ms < last {
            self.last = timestamp_ms.is_finite().then_some(timestamp_ms);
            self.carry = 0.0;
            return 0;
        }

        let dt = (timestamp_ms - last).min(MAX_FRAME_MS) + self.carry;
        let whole = dt.floor();
        self.carry = dt - whole;
        whole as Millis
    }

    /// Forget the last timestamp (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.last = None;
        self.carry = 0.0;
    }
}
