//! Reflex entry point
//!
//! The web build is driven from JavaScript through `platform::web::WebGame`.
//! Natively there is no window: the binary plays one headless round with a
//! simple autoplayer and logs the result. Set `RUST_LOG=debug` to watch
//! every spawn and hit.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use reflex::persistence::FileStore;
    use reflex::platform::FrameClock;
    use reflex::sim::{GamePhase, RoundSession};
    use reflex::Settings;

    env_logger::init();
    log::info!("Reflex (native) starting...");

    let settings = Settings::load_from(Path::new("reflex_settings.json"));
    let store = FileStore::new("reflex_scores.json");
    let mut session = RoundSession::from_settings(&settings, store);
    log::info!(
        "Seed {}, difficulty {}, best so far {}",
        session.seed(),
        session.difficulty().as_str(),
        session.high_score()
    );

    session.start();

    // Synthetic 60 Hz frames; the autoplayer clicks the oldest visible target
    // after a human-ish reaction delay.
    let mut frames = FrameClock::new();
    let mut timestamp = 0.0;
    let mut next_click = 0.0;
    let reaction_ms = 450.0;
    while session.phase() == GamePhase::Playing {
        let dt = frames.tick(timestamp);
        session.advance_time(dt);

        if timestamp >= next_click {
            let target = session
                .targets()
                .iter()
                .find(|t| reflex::on_surface(t.pos))
                .cloned();
            if let Some(target) = target {
                session.select_target(target.id, target.pos);
                next_click = timestamp + reaction_ms;
            }
        }

        for event in session.drain_events() {
            log::debug!("{:?}", event);
        }
        timestamp += 1000.0 / 60.0;
    }

    match session.summary() {
        Some(summary) => {
            log::info!(
                "Final score {} ({} hits, {}/sec), high score {}{}",
                summary.score,
                summary.hits,
                summary.avg_per_sec,
                summary.high_score,
                if summary.new_high_score { " - NEW!" } else { "" }
            );
            match serde_json::to_string_pretty(summary) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Could not encode summary: {}", e),
            }
        }
        None => log::warn!("Round ended without a summary"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
