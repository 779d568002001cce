//! Deterministic round engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulated clock only (no wall time)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod combo;
pub mod difficulty;
pub mod scoring;
pub mod session;
pub mod state;
pub mod target;

pub use clock::{Clock, Fired, Millis, ScopeId, TimerId};
pub use combo::{ComboTracker, multiplier};
pub use difficulty::{Difficulty, DifficultyConfig};
pub use scoring::{Particle, ParticleEmitter, points_for};
pub use session::RoundSession;
pub use state::{GameEvent, GamePhase, RoundInput, RoundSnapshot, RoundSummary, TimerEvent};
pub use target::{Target, TargetPool};
