//! Round phases, scheduled work and the read-only views handed to presentation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::scoring::Particle;
use super::target::Target;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Title screen, difficulty can be chosen
    #[default]
    Menu,
    /// Round in progress
    Playing,
    /// Round finished, waiting for play-again or menu
    GameOver,
}

/// Work scheduled on the round clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second of the round elapsed
    Countdown,
    /// Spawn a target
    Spawn,
    /// Integrate target and particle motion
    Motion,
    /// Target reached its lifetime
    Expire(u32),
    /// Combo window lapsed
    ComboDecay,
    /// Particle reached its lifetime
    ParticleFade(u32),
}

/// Input commands from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundInput {
    Start,
    PlayAgain,
    ToMenu,
    SelectDifficulty(Difficulty),
    /// Target id plus the normalized point it was hit at (particle placement only)
    SelectTarget { id: u32, point: Vec2 },
}

/// Notable things that happened, for sound and animation cues
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    RoundStarted { difficulty: Difficulty },
    TargetSpawned { id: u32 },
    TargetExpired { id: u32 },
    TargetHit { id: u32, points: u64, multiplier: u32 },
    ComboLost { combo: u32 },
    RoundOver { score: u64, new_high_score: bool },
}

/// End-of-round statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub score: u64,
    pub high_score: u64,
    pub new_high_score: bool,
    /// Successful selections this round
    pub hits: u32,
    /// Score per second of round time, rounded
    pub avg_per_sec: u64,
}

impl RoundSummary {
    pub fn new(score: u64, high_score: u64, new_high_score: bool, hits: u32, duration_secs: u32) -> Self {
        let avg_per_sec = if duration_secs == 0 {
            0
        } else {
            (score as f64 / duration_secs as f64).round() as u64
        };
        Self {
            score,
            high_score,
            new_high_score,
            hits,
            avg_per_sec,
        }
    }
}

/// Everything presentation needs to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub time_left: u32,
    pub combo: u32,
    pub multiplier: u32,
    pub targets: Vec<Target>,
    pub particles: Vec<Particle>,
    pub difficulty: Difficulty,
}
