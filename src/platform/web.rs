//! Browser bindings
//!
//! JavaScript drives the game from `requestAnimationFrame` and DOM input;
//! everything it needs goes through `WebGame`.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use super::FrameClock;
use crate::persistence::LocalStore;
use crate::settings::Settings;
use crate::sim::{Difficulty, RoundSession};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Reflex starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    session: RoundSession<LocalStore>,
    frames: FrameClock,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let session = RoundSession::new(&settings, LocalStore::new(), seed);
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            session,
            frames: FrameClock::new(),
        }
    }

    /// Call once per animation frame with the rAF timestamp
    pub fn frame(&mut self, timestamp_ms: f64) {
        let dt = self.frames.tick(timestamp_ms);
        self.session.advance_time(dt);
    }

    /// Drop the frame baseline (page hidden, window blurred)
    pub fn pause_frames(&mut self) {
        self.frames.reset();
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    pub fn play_again(&mut self) {
        self.session.play_again();
    }

    pub fn to_menu(&mut self) {
        self.session.to_menu();
    }

    /// Returns false if the name is unknown or a round is running
    pub fn select_difficulty(&mut self, name: &str) -> bool {
        match Difficulty::from_str(name) {
            Some(d) => self.session.select_difficulty(d),
            None => {
                log::warn!("Unknown difficulty {:?}", name);
                false
            }
        }
    }

    /// Returns points awarded (0 for a stale target)
    pub fn select_target(&mut self, id: u32, x: f32, y: f32) -> u32 {
        self.session
            .select_target(id, Vec2::new(x, y))
            .map(|p| p as u32)
            .unwrap_or(0)
    }

    /// Current state as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_default()
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events(&mut self) -> String {
        serde_json::to_string(&self.session.drain_events()).unwrap_or_default()
    }

    /// Last round summary as JSON, or an empty string
    pub fn summary(&self) -> String {
        self.session
            .summary()
            .and_then(|s| serde_json::to_string(s).ok())
            .unwrap_or_default()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
