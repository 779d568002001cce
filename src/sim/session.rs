//! Round session: phase machine and timer dispatch
//!
//! The session owns the round clock and every sub-component. Time moves
//! only through `advance_time`, which fires due timers one at a time and
//! applies each before looking at the next. Every timer a round registers
//! lives under that round's scope; leaving `Playing` closes the scope, so
//! nothing from a finished round can touch the next one.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::{Clock, Fired, Millis, ScopeId};
use super::combo::ComboTracker;
use super::difficulty::{Difficulty, DifficultyConfig};
use super::scoring::{Particle, ParticleEmitter, points_for};
use super::state::{GameEvent, GamePhase, RoundInput, RoundSnapshot, RoundSummary, TimerEvent};
use super::target::{Target, TargetPool};
use crate::consts::*;
use crate::highscores::HighScoreGate;
use crate::persistence::ScoreStore;
use crate::settings::Settings;

pub struct RoundSession<S: ScoreStore> {
    clock: Clock<TimerEvent>,
    /// Scope of the round in progress
    scope: Option<ScopeId>,
    seed: u64,
    rng: Pcg32,

    phase: GamePhase,
    score: u64,
    time_left: u32,
    starting_duration: u32,
    hits: u32,
    difficulty: Difficulty,
    /// Captured at round start
    config: DifficultyConfig,
    particle_effects: bool,

    pool: TargetPool,
    combo: ComboTracker,
    particles: ParticleEmitter,
    high_scores: HighScoreGate<S>,

    summary: Option<RoundSummary>,
    events: Vec<GameEvent>,
}

impl<S: ScoreStore> RoundSession<S> {
    /// Create a session in `Menu` with a fixed seed. Reads the stored high score.
    pub fn new(settings: &Settings, store: S, seed: u64) -> Self {
        Self {
            clock: Clock::new(),
            scope: None,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0,
            time_left: settings.round_seconds,
            starting_duration: settings.round_seconds.max(1),
            hits: 0,
            difficulty: settings.difficulty,
            config: settings.difficulty.config(),
            particle_effects: settings.particle_effects,
            pool: TargetPool::new(),
            combo: ComboTracker::new(),
            particles: ParticleEmitter::new(),
            high_scores: HighScoreGate::load(store),
            summary: None,
            events: Vec::new(),
        }
    }

    /// Create a session seeded from the settings, or from entropy if none is set
    pub fn from_settings(settings: &Settings, store: S) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::new(settings, store, seed)
    }

    /// Apply one presentation input
    pub fn handle(&mut self, input: RoundInput) {
        match input {
            RoundInput::Start => self.start(),
            RoundInput::PlayAgain => self.play_again(),
            RoundInput::ToMenu => self.to_menu(),
            RoundInput::SelectDifficulty(d) => {
                self.select_difficulty(d);
            }
            RoundInput::SelectTarget { id, point } => {
                self.select_target(id, point);
            }
        }
    }

    /// Menu -> Playing
    pub fn start(&mut self) {
        if self.phase != GamePhase::Menu {
            log::debug!("Ignoring start in {:?}", self.phase);
            return;
        }
        self.begin_round();
    }

    /// GameOver -> Playing
    pub fn play_again(&mut self) {
        if self.phase != GamePhase::GameOver {
            log::debug!("Ignoring play again in {:?}", self.phase);
            return;
        }
        self.begin_round();
    }

    /// GameOver or Playing -> Menu. An abandoned round is not scored.
    pub fn to_menu(&mut self) {
        match self.phase {
            GamePhase::Menu => {}
            GamePhase::Playing => {
                log::info!("Round abandoned at {} points", self.score);
                self.teardown();
                self.phase = GamePhase::Menu;
            }
            GamePhase::GameOver => {
                self.phase = GamePhase::Menu;
            }
        }
    }

    /// Choose the preset for the next round. Only honored in `Menu`.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("Ignoring difficulty change in {:?}", self.phase);
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    /// Player selected a target. Returns the points awarded, or None if the
    /// target is gone or no round is running.
    pub fn select_target(&mut self, id: u32, point: Vec2) -> Option<u64> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let scope = self.scope?;
        let target = self.pool.remove(id, &mut self.clock)?;
        Some(self.apply_hit(target, point, scope))
    }

    /// Score a target that has just left the pool
    fn apply_hit(&mut self, target: Target, at: Vec2, scope: ScopeId) -> u64 {
        let multiplier = self
            .combo
            .register_hit(&mut self.clock, scope, self.config.combo_timeout_ms);
        let points = points_for(multiplier);
        self.score += points;
        self.hits += 1;

        if self.particle_effects {
            let at = at.clamp(Vec2::ZERO, Vec2::splat(SURFACE_SIZE));
            self.particles.burst(at, &mut self.clock, scope);
        }

        log::debug!(
            "Hit target {} for {} (x{}, combo {})",
            target.id,
            points,
            multiplier,
            self.combo.combo()
        );
        self.events.push(GameEvent::TargetHit {
            id: target.id,
            points,
            multiplier,
        });
        points
    }

    /// Advance simulated time, firing everything that comes due
    pub fn advance_time(&mut self, delta_ms: Millis) {
        let until = self.clock.now() + delta_ms;
        while let Some(fired) = self.clock.pop_due(until) {
            self.dispatch(fired);
        }
        self.clock.settle(until);
    }

    fn dispatch(&mut self, fired: Fired<TimerEvent>) {
        let Some(scope) = self.scope else {
            return;
        };
        match fired.payload {
            TimerEvent::Countdown => self.countdown(),
            TimerEvent::Spawn => {
                let target = self.pool.spawn(&mut self.rng, &self.config, &mut self.clock, scope);
                log::debug!("Spawned target {} at {:?}", target.id, target.pos);
                self.events.push(GameEvent::TargetSpawned { id: target.id });
            }
            TimerEvent::Motion => {
                self.pool.advance(MOTION_PERIOD_MS);
                self.particles.advance(MOTION_PERIOD_MS);
            }
            TimerEvent::Expire(id) => {
                if self.pool.remove(id, &mut self.clock).is_some() {
                    log::debug!("Target {} expired", id);
                    self.events.push(GameEvent::TargetExpired { id });
                }
            }
            TimerEvent::ComboDecay => {
                if let Some(combo) = self.combo.on_decay(fired.id) {
                    log::debug!("Combo of {} lost", combo);
                    self.events.push(GameEvent::ComboLost { combo });
                }
            }
            TimerEvent::ParticleFade(id) => {
                self.particles.remove(id, &mut self.clock);
            }
        }
    }

    fn countdown(&mut self) {
        if self.time_left <= 1 {
            self.end_round();
        } else {
            self.time_left -= 1;
        }
    }

    fn begin_round(&mut self) {
        self.teardown();

        let scope = self.clock.open_scope();
        self.scope = Some(scope);
        self.config = self.difficulty.config();
        self.score = 0;
        self.hits = 0;
        self.time_left = self.starting_duration;
        self.summary = None;

        self.clock.every(scope, COUNTDOWN_PERIOD_MS, TimerEvent::Countdown);
        self.clock.every(scope, self.config.spawn_interval_ms, TimerEvent::Spawn);
        self.clock.every(scope, MOTION_PERIOD_MS, TimerEvent::Motion);

        self.phase = GamePhase::Playing;
        log::info!(
            "Round started: {} difficulty, {}s, seed {}",
            self.difficulty.as_str(),
            self.starting_duration,
            self.seed
        );
        self.events.push(GameEvent::RoundStarted {
            difficulty: self.difficulty,
        });
    }

    fn end_round(&mut self) {
        self.time_left = 0;
        self.teardown();
        self.phase = GamePhase::GameOver;

        let new_high_score = self.high_scores.on_round_end(self.score);
        let summary = RoundSummary::new(
            self.score,
            self.high_scores.best(),
            new_high_score,
            self.hits,
            self.starting_duration,
        );
        log::info!(
            "Round over: {} points, {} hits{}",
            self.score,
            self.hits,
            if new_high_score { " (new high score)" } else { "" }
        );
        self.summary = Some(summary);
        self.events.push(GameEvent::RoundOver {
            score: self.score,
            new_high_score,
        });
    }

    /// Cancel everything the current round scheduled
    fn teardown(&mut self) {
        self.pool.clear(&mut self.clock);
        self.combo.reset(&mut self.clock);
        self.particles.clear(&mut self.clock);
        if let Some(scope) = self.scope.take() {
            let canceled = self.clock.close_scope(scope);
            log::debug!("Closed round scope, {} timers canceled", canceled);
        }
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_scores.best(),
            time_left: self.time_left,
            combo: self.combo.combo(),
            multiplier: self.combo.multiplier(),
            targets: self.pool.targets().to_vec(),
            particles: self.particles.particles().to_vec(),
            difficulty: self.difficulty,
        }
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn combo(&self) -> u32 {
        self.combo.combo()
    }

    pub fn multiplier(&self) -> u32 {
        self.combo.multiplier()
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.best()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Parameters of the current (or last) round
    pub fn round_config(&self) -> &DifficultyConfig {
        &self.config
    }

    pub fn targets(&self) -> &[Target] {
        self.pool.targets()
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    /// Statistics of the last finished round
    pub fn summary(&self) -> Option<&RoundSummary> {
        self.summary.as_ref()
    }

    pub fn high_scores(&self) -> &HighScoreGate<S> {
        &self.high_scores
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Simulated time since the session was created
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    /// Timers still scheduled on the round clock
    pub fn pending_timers(&self) -> usize {
        self.clock.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    fn session(seed: u64) -> RoundSession<MemoryStore> {
        RoundSession::new(&Settings::default(), MemoryStore::new(), seed)
    }

    /// Wait for the next spawn and hit the new target
    fn spawn_and_hit(s: &mut RoundSession<MemoryStore>) -> u64 {
        let interval = s.round_config().spawn_interval_ms;
        s.advance_time(interval);
        let target = s.targets().last().expect("target spawned").clone();
        s.select_target(target.id, target.pos).expect("target live")
    }

    fn run_out_clock(s: &mut RoundSession<MemoryStore>) {
        s.advance_time(s.time_left() as u64 * COUNTDOWN_PERIOD_MS);
    }

    #[test]
    fn test_start_resets_round() {
        let mut s = session(1);
        assert_eq!(s.phase(), GamePhase::Menu);
        s.start();
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.score(), 0);
        assert_eq!(s.time_left(), STARTING_DURATION_SECS);
        assert_eq!(s.combo(), 0);
        assert!(s.targets().is_empty());
        // countdown, spawner, motion
        assert_eq!(s.pending_timers(), 3);
        assert!(matches!(
            s.drain_events().as_slice(),
            [GameEvent::RoundStarted {
                difficulty: Difficulty::Normal
            }]
        ));
    }

    #[test]
    fn test_countdown_reaches_game_over() {
        let mut s = session(2);
        s.start();
        for expected in (1..STARTING_DURATION_SECS).rev() {
            s.advance_time(COUNTDOWN_PERIOD_MS);
            assert_eq!(s.time_left(), expected);
            assert_eq!(s.phase(), GamePhase::Playing);
        }
        s.advance_time(COUNTDOWN_PERIOD_MS);
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert_eq!(s.time_left(), 0);

        // A 31st second changes nothing
        s.advance_time(COUNTDOWN_PERIOD_MS);
        assert_eq!(s.time_left(), 0);
        assert_eq!(s.pending_timers(), 0);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut s = session(3);
        s.start();
        let interval = s.round_config().spawn_interval_ms;
        s.advance_time(interval - 1);
        assert!(s.targets().is_empty());
        s.advance_time(1);
        assert_eq!(s.targets().len(), 1);
        s.advance_time(interval);
        assert_eq!(s.targets().len(), 2);
        assert!(s.targets()[0].id < s.targets()[1].id);
    }

    #[test]
    fn test_targets_move_while_playing() {
        let mut s = session(4);
        s.start();
        s.advance_time(s.round_config().spawn_interval_ms);
        let before = s.targets()[0].clone();
        s.advance_time(MOTION_PERIOD_MS * 10);
        let after = &s.targets()[0];
        assert_ne!(before.pos, after.pos);
        assert!(after.heading > before.heading);
    }

    #[test]
    fn test_target_expires_after_lifetime() {
        let mut s = session(5);
        s.start();
        let config = *s.round_config();
        s.advance_time(config.spawn_interval_ms);
        let id = s.targets()[0].id;
        s.drain_events();

        s.advance_time(config.target_lifetime_ms - 1);
        assert!(s.targets().iter().any(|t| t.id == id));
        s.advance_time(1);
        assert!(s.targets().iter().all(|t| t.id != id));
        assert!(s.drain_events().contains(&GameEvent::TargetExpired { id }));
    }

    #[test]
    fn test_rapid_hits_follow_multiplier_steps() {
        let expected = [10, 10, 10, 20, 20, 20, 30, 30, 30, 40, 40, 40, 50, 50, 50];
        for difficulty in Difficulty::ALL {
            let mut s = session(6);
            s.select_difficulty(difficulty);
            s.start();
            let points: Vec<u64> = (0..expected.len()).map(|_| spawn_and_hit(&mut s)).collect();
            assert_eq!(points, expected, "{:?}", difficulty);
            assert_eq!(s.score(), expected.iter().sum::<u64>());
        }
    }

    #[test]
    fn test_decay_resets_multiplier() {
        let mut s = session(7);
        s.start();
        for _ in 0..4 {
            spawn_and_hit(&mut s);
        }
        assert_eq!(s.multiplier(), 2);

        let timeout = s.round_config().combo_timeout_ms;
        let interval = s.round_config().spawn_interval_ms;
        let idle = timeout.div_ceil(interval) * interval;
        s.advance_time(idle);
        assert_eq!(s.combo(), 0);
        assert!(s.drain_events().contains(&GameEvent::ComboLost { combo: 4 }));
        assert_eq!(spawn_and_hit(&mut s), 10);
    }

    #[test]
    fn test_duplicate_select_is_noop() {
        let mut s = session(8);
        s.start();
        s.advance_time(s.round_config().spawn_interval_ms);
        let t = s.targets()[0].clone();
        assert_eq!(s.select_target(t.id, t.pos), Some(10));
        let (score, combo) = (s.score(), s.combo());

        assert_eq!(s.select_target(t.id, t.pos), None);
        assert_eq!(s.score(), score);
        assert_eq!(s.combo(), combo);
        assert_eq!(s.select_target(9999, Vec2::ZERO), None);
    }

    #[test]
    fn test_expiry_then_hit_counts_nothing() {
        let mut s = session(9);
        s.start();
        let config = *s.round_config();
        s.advance_time(config.spawn_interval_ms);
        let t = s.targets()[0].clone();

        s.advance_time(config.target_lifetime_ms);
        assert_eq!(s.select_target(t.id, t.pos), None);
        assert_eq!(s.score(), 0);
        assert_eq!(s.combo(), 0);
    }

    #[test]
    fn test_hit_then_expiry_removes_once() {
        let mut s = session(9);
        s.start();
        let config = *s.round_config();
        s.advance_time(config.spawn_interval_ms);
        let t = s.targets()[0].clone();

        s.advance_time(config.target_lifetime_ms - 1);
        assert_eq!(s.select_target(t.id, t.pos), Some(10));
        s.drain_events();
        s.advance_time(1);
        let events = s.drain_events();
        assert!(!events.contains(&GameEvent::TargetExpired { id: t.id }));
        assert_eq!(s.score(), 10);
    }

    #[test]
    fn test_particles_burst_and_fade() {
        let mut s = session(10);
        s.start();
        spawn_and_hit(&mut s);
        assert_eq!(s.particles().len(), BURST_SIZE);

        s.advance_time(PARTICLE_LIFETIME_MS - 1);
        assert_eq!(s.particles().len(), BURST_SIZE);
        s.advance_time(1);
        assert!(s.particles().is_empty());
    }

    #[test]
    fn test_particle_effects_can_be_disabled() {
        let settings = Settings {
            particle_effects: false,
            ..Default::default()
        };
        let mut s = RoundSession::new(&settings, MemoryStore::new(), 11);
        s.start();
        assert_eq!(spawn_and_hit(&mut s), 10);
        assert!(s.particles().is_empty());
    }

    #[test]
    fn test_difficulty_locked_during_round() {
        let mut s = session(12);
        assert!(s.select_difficulty(Difficulty::Easy));
        s.start();
        assert!(!s.select_difficulty(Difficulty::Hard));
        assert_eq!(s.difficulty(), Difficulty::Easy);

        let easy = Difficulty::Easy.config();
        assert_eq!(*s.round_config(), easy);
        s.advance_time(Difficulty::Hard.config().spawn_interval_ms);
        assert!(s.targets().is_empty());
        s.advance_time(easy.spawn_interval_ms - Difficulty::Hard.config().spawn_interval_ms);
        let t = &s.targets()[0];
        assert!((easy.speed_min..=easy.speed_max).contains(&t.speed));
    }

    #[test]
    fn test_difficulty_selectable_again_in_menu() {
        let mut s = session(13);
        s.start();
        run_out_clock(&mut s);
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert!(!s.select_difficulty(Difficulty::Hard));
        s.to_menu();
        assert_eq!(s.phase(), GamePhase::Menu);
        assert!(s.select_difficulty(Difficulty::Hard));
        s.start();
        assert_eq!(*s.round_config(), Difficulty::Hard.config());
    }

    #[test]
    fn test_high_score_raised() {
        let store = MemoryStore::with(HIGH_SCORE_KEY, 100);
        let mut s = RoundSession::new(&Settings::default(), store, 14);
        assert_eq!(s.high_score(), 100);
        s.start();
        // 10+10+10+20+20+20+30+30
        for _ in 0..8 {
            spawn_and_hit(&mut s);
        }
        assert_eq!(s.score(), 150);
        run_out_clock(&mut s);

        assert_eq!(s.high_scores().store().value(HIGH_SCORE_KEY), Some(150));
        let summary = s.summary().expect("round summary");
        assert!(summary.new_high_score);
        assert_eq!(summary.hits, 8);
        assert_eq!(summary.avg_per_sec, 5);
        assert_eq!(s.snapshot().high_score, 150);
    }

    #[test]
    fn test_high_score_kept() {
        let store = MemoryStore::with(HIGH_SCORE_KEY, 100);
        let mut s = RoundSession::new(&Settings::default(), store, 15);
        s.start();
        for _ in 0..5 {
            spawn_and_hit(&mut s);
        }
        assert_eq!(s.score(), 70);
        run_out_clock(&mut s);

        assert_eq!(s.high_scores().store().value(HIGH_SCORE_KEY), Some(100));
        assert!(!s.summary().expect("round summary").new_high_score);
        assert!(s.drain_events().contains(&GameEvent::RoundOver {
            score: 70,
            new_high_score: false
        }));
    }

    #[test]
    fn test_nothing_moves_after_game_over() {
        let mut s = session(16);
        s.start();
        for _ in 0..3 {
            spawn_and_hit(&mut s);
        }
        run_out_clock(&mut s);
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert_eq!(s.pending_timers(), 0);

        let before = s.snapshot();
        s.drain_events();
        s.advance_time(60_000);
        assert_eq!(s.snapshot(), before);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_to_menu_mid_round_tears_down() {
        let store = MemoryStore::with(HIGH_SCORE_KEY, 5);
        let mut s = RoundSession::new(&Settings::default(), store, 17);
        s.start();
        spawn_and_hit(&mut s);
        s.advance_time(2000);
        assert!(!s.targets().is_empty());

        s.to_menu();
        assert_eq!(s.phase(), GamePhase::Menu);
        assert_eq!(s.pending_timers(), 0);
        assert!(s.targets().is_empty());
        assert!(s.particles().is_empty());
        assert_eq!(s.combo(), 0);

        let before = s.snapshot();
        s.advance_time(10_000);
        assert_eq!(s.snapshot(), before);
        // Abandoned rounds are not scored
        assert_eq!(s.high_scores().store().value(HIGH_SCORE_KEY), Some(5));
        assert!(s.summary().is_none());
    }

    #[test]
    fn test_play_again_starts_fresh_round() {
        let mut s = session(18);
        s.start();
        spawn_and_hit(&mut s);
        spawn_and_hit(&mut s);
        run_out_clock(&mut s);

        s.handle(RoundInput::PlayAgain);
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.score(), 0);
        assert_eq!(s.combo(), 0);
        assert_eq!(s.time_left(), STARTING_DURATION_SECS);
        assert!(s.summary().is_none());
        assert_eq!(spawn_and_hit(&mut s), 10);
    }

    #[test]
    fn test_inputs_ignored_in_wrong_phase() {
        let mut s = session(19);
        assert_eq!(s.select_target(1, Vec2::ZERO), None);
        s.play_again();
        assert_eq!(s.phase(), GamePhase::Menu);

        s.start();
        s.advance_time(5 * COUNTDOWN_PERIOD_MS);
        s.start();
        assert_eq!(s.time_left(), STARTING_DURATION_SECS - 5);
        s.play_again();
        assert_eq!(s.time_left(), STARTING_DURATION_SECS - 5);
    }

    #[test]
    fn test_custom_round_length() {
        let settings = Settings {
            round_seconds: 3,
            ..Default::default()
        };
        let mut s = RoundSession::new(&settings, MemoryStore::new(), 20);
        s.start();
        assert_eq!(s.time_left(), 3);
        s.advance_time(3 * COUNTDOWN_PERIOD_MS);
        assert_eq!(s.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_handle_dispatches_select_target() {
        let mut s = session(21);
        s.handle(RoundInput::SelectDifficulty(Difficulty::Hard));
        s.handle(RoundInput::Start);
        s.advance_time(Difficulty::Hard.config().spawn_interval_ms);
        let t = s.targets()[0].clone();
        s.handle(RoundInput::SelectTarget {
            id: t.id,
            point: t.pos,
        });
        assert_eq!(s.score(), 10);
        s.handle(RoundInput::ToMenu);
        assert_eq!(s.phase(), GamePhase::Menu);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Wait(u64),
        Hit(usize),
        Miss(u32),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            (0u64..2500).prop_map(Action::Wait),
            (0usize..8).prop_map(Action::Hit),
            (0u32..500).prop_map(Action::Miss),
        ]
    }

    fn play(s: &mut RoundSession<MemoryStore>, actions: &[Action]) {
        for a in actions {
            match *a {
                Action::Wait(ms) => s.advance_time(ms),
                Action::Hit(i) => {
                    if let Some(t) = s.targets().get(i).cloned() {
                        s.select_target(t.id, t.pos);
                    }
                }
                Action::Miss(id) => {
                    s.select_target(id, Vec2::splat(50.0));
                }
            }
        }
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..80)) {
            let mut s = session(seed);
            s.start();
            let mut last = 0;
            for a in &actions {
                play(&mut s, std::slice::from_ref(a));
                if s.phase() == GamePhase::Playing {
                    prop_assert!(s.score() >= last);
                    last = s.score();
                }
                prop_assert!(s.multiplier() >= 1 && s.multiplier() <= MAX_MULTIPLIER);
                prop_assert!(s.time_left() <= STARTING_DURATION_SECS);
            }
        }

        #[test]
        fn prop_hit_points_match_combo(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..80)) {
            let mut s = session(seed);
            s.start();
            for a in &actions {
                let combo_before = s.combo();
                let score_before = s.score();
                play(&mut s, std::slice::from_ref(a));
                if let Action::Hit(_) = a {
                    let gained = s.score() - score_before;
                    prop_assert!(gained == 0 || gained == points_for(crate::sim::combo::multiplier(combo_before)));
                }
            }
        }

        #[test]
        fn prop_same_seed_same_round(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..60)) {
            let mut a = session(seed);
            let mut b = session(seed);
            a.start();
            b.start();
            play(&mut a, &actions);
            play(&mut b, &actions);
            prop_assert_eq!(a.snapshot(), b.snapshot());
        }
    }
}
