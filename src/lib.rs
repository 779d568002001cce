//! Reflex - a timed reaction-speed target game
//!
//! Core modules:
//! - `sim`: Deterministic round engine (clock, targets, combo, scoring, phases)
//! - `highscores`: Best-score gate over the persistence store
//! - `persistence`: Key-value score stores (memory, file, LocalStorage)
//! - `platform`: Frame timing and the browser bindings
//! - `settings`: Player preferences and round configuration

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScoreGate;
pub use persistence::{MemoryStore, ScoreStore, StoreError};
pub use settings::Settings;
pub use sim::{Difficulty, GamePhase, RoundInput, RoundSession, RoundSnapshot};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Round length in seconds
    pub const STARTING_DURATION_SECS: u32 = 30;
    /// Countdown period (one decrement of time left)
    pub const COUNTDOWN_PERIOD_MS: u64 = 1000;
    /// Motion integrator period (~60 Hz)
    pub const MOTION_PERIOD_MS: u64 = 16;

    /// Play surface, in percent of width/height
    pub const SURFACE_SIZE: f32 = 100.0;
    /// Spawn band keeps new targets off the edges
    pub const SPAWN_MIN: f32 = 10.0;
    pub const SPAWN_MAX: f32 = 90.0;
    /// Target diameter range (presentation units)
    pub const TARGET_SIZE_MIN: f32 = 40.0;
    pub const TARGET_SIZE_MAX: f32 = 70.0;
    /// Heading change per motion tick (radians)
    pub const TARGET_CURVATURE: f32 = 0.05;

    /// Base points for one hit, before the combo multiplier
    pub const POINTS_PER_HIT: u64 = 10;
    /// Hits needed to step the multiplier up
    pub const COMBO_STEP: u32 = 3;
    /// Multiplier cap
    pub const MAX_MULTIPLIER: u32 = 5;

    /// Particles emitted per hit
    pub const BURST_SIZE: usize = 8;
    /// Particle lifetime
    pub const PARTICLE_LIFETIME_MS: u64 = 500;
    /// Particle drift speed (percent of surface per ms)
    pub const PARTICLE_SPEED: f32 = 0.006;

    /// Storage key of the persisted best score
    pub const HIGH_SCORE_KEY: &str = "monochrome-highscore";
}

/// Unit vector for a heading in radians
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

/// Whether a point lies on the visible play surface
#[inline]
pub fn on_surface(pos: Vec2) -> bool {
    (0.0..=consts::SURFACE_SIZE).contains(&pos.x) && (0.0..=consts::SURFACE_SIZE).contains(&pos.y)
}
