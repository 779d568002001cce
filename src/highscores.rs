//! Best-score gate
//!
//! Reads the stored best once on construction and writes through only when
//! a finished round beats it. Store failures never reach the round: a failed
//! read counts as "nothing stored", a failed write is logged and dropped.

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::ScoreStore;

pub struct HighScoreGate<S: ScoreStore> {
    store: S,
    best: u64,
}

impl<S: ScoreStore> HighScoreGate<S> {
    /// Load the stored best from `store`
    pub fn load(store: S) -> Self {
        let best = match store.get(HIGH_SCORE_KEY) {
            Ok(Some(best)) => {
                log::info!("Loaded high score {}", best);
                best
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                0
            }
        };
        Self { store, best }
    }

    /// Current best (0 when nothing is stored)
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Whether `score` would replace the best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished round. Returns true if it set a new best.
    pub fn on_round_end(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match self.store.set(HIGH_SCORE_KEY, score) {
            Ok(()) => log::info!("New high score {} saved", score),
            Err(e) => log::warn!("New high score {} not saved: {}", score, e),
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
