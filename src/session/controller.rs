use std::collections::HashMap;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::input::Key;
use crate::engine::round::{InputOutcome, RoundEngine, WordStart};
use crate::engine::score::ScoreState;
use crate::engine::tier::{DifficultyTier, TierSchedule};
use crate::generator::pool::WordPool;
use crate::session::events::{Command, EndReason, GameEvent, SessionSummary};
use crate::session::mode::GameMode;
use crate::session::state::{SessionPhase, SessionState, Settings, Snapshot};
use crate::session::timers::{TimerKind, TimerToken, Timers};
use crate::store::HighScoreStore;

pub const COUNTDOWN_FROM: u8 = 3;
pub const DEFAULT_TICK_MS: u64 = 100;
const COUNTDOWN_INTERVAL_MS: u64 = 1_000;
const SESSION_INTERVAL_MS: u64 = 1_000;

#[derive(Clone, Debug, PartialEq)]
pub struct SessionOptions {
    pub practice: TierSchedule,
    pub timeless: TierSchedule,
    /// Per-word timer resolution.
    pub tick_ms: u64,
    pub settings: Settings,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            practice: TierSchedule::practice(),
            timeless: TierSchedule::timeless(),
            tick_ms: DEFAULT_TICK_MS,
            settings: Settings::default(),
        }
    }
}

/// Drives rounds through a whole play session.
///
/// All input arrives through `&mut self` calls and is processed in order; time
/// only moves when the driver calls [`advance`](Self::advance).
pub struct SessionController<S: HighScoreStore, R: Rng = SmallRng> {
    pool: WordPool,
    store: S,
    rng: R,
    options: SessionOptions,
    session: SessionState,
    engine: RoundEngine,
    timers: Timers,
    /// Best score seen per store key; covers an unavailable store.
    best_scores: HashMap<String, u32>,
    clock_ms: u64,
    started_at_ms: Option<u64>,
    ended_at_ms: Option<u64>,
    final_wpm: Option<u32>,
    events: Vec<GameEvent>,
    revision: u64,
}

impl<S: HighScoreStore> SessionController<S, SmallRng> {
    pub fn new(pool: WordPool, store: S, mode: GameMode, options: SessionOptions) -> Self {
        Self::with_rng(pool, store, mode, options, SmallRng::from_entropy())
    }

    pub fn seeded(pool: WordPool, store: S, mode: GameMode, options: SessionOptions, seed: u64) -> Self {
        Self::with_rng(pool, store, mode, options, SmallRng::seed_from_u64(seed))
    }
}

impl<S: HighScoreStore, R: Rng> SessionController<S, R> {
    pub fn with_rng(pool: WordPool, store: S, mode: GameMode, options: SessionOptions, rng: R) -> Self {
        let mut controller = Self {
            pool,
            store,
            rng,
            options,
            session: SessionState::idle(mode, 0),
            engine: RoundEngine::new(),
            timers: Timers::new(),
            best_scores: HashMap::new(),
            clock_ms: 0,
            started_at_ms: None,
            ended_at_ms: None,
            final_wpm: None,
            events: Vec::new(),
            revision: 0,
        };
        controller.session.high_score = controller.load_high_score(mode);
        controller
    }

    // ---- accessors ----

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn mode(&self) -> GameMode {
        self.session.mode
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    pub fn score(&self) -> &ScoreState {
        self.engine.score()
    }

    pub fn settings(&self) -> Settings {
        self.options.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn timer_token(&self, kind: TimerKind) -> Option<TimerToken> {
        self.timers.token(kind)
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_idle()
    }

    /// Time since play started, frozen once the session ends.
    pub fn elapsed_ms(&self) -> u64 {
        match self.started_at_ms {
            Some(start) => self.ended_at_ms.unwrap_or(self.clock_ms).saturating_sub(start),
            None => 0,
        }
    }

    pub fn wpm(&self) -> u32 {
        self.final_wpm
            .unwrap_or_else(|| self.engine.score().wpm(self.elapsed_ms()))
    }

    pub fn snapshot(&self) -> Snapshot {
        let round = self.engine.round().clone();
        let statuses = round
            .current_word
            .as_deref()
            .map(|word| crate::engine::input::statuses(word, &round.input))
            .unwrap_or_default();
        Snapshot {
            revision: self.revision,
            session: self.session.clone(),
            round,
            round_phase: self.engine.phase(),
            statuses,
            score: *self.engine.score(),
            accuracy: self.engine.score().accuracy(),
            wpm: self.wpm(),
            elapsed_ms: self.elapsed_ms(),
            settings: self.options.settings,
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- presentation commands ----

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Key(key) => self.key(key),
            Command::TextInput(value) => self.text_input(&value),
            Command::SelectMode(mode) => self.select_mode(mode),
            Command::SelectDifficulty(tier) => self.select_difficulty(tier),
            Command::Start => self.begin(),
            Command::Quit => self.quit(),
            Command::Restart => self.restart(),
            Command::UpdateSettings(settings) => self.update_settings(settings),
        }
    }

    pub fn key(&mut self, key: Key) {
        if self.session.phase != SessionPhase::Playing {
            return;
        }
        let outcome = self.engine.apply_keystroke(key);
        self.apply_outcome(outcome);
    }

    pub fn text_input(&mut self, value: &str) {
        if self.session.phase != SessionPhase::Playing {
            return;
        }
        let outcome = self.engine.apply_text_input(value);
        self.apply_outcome(outcome);
    }

    pub fn select_mode(&mut self, mode: GameMode) {
        if !self.session.phase.is_settled() {
            debug!("ignoring mode change to {mode} mid-session");
            return;
        }
        self.session.mode = mode;
        self.reset_session();
        self.touch();
    }

    /// Only meaningful for practice; timeless always starts at Easy.
    pub fn select_difficulty(&mut self, tier: DifficultyTier) {
        match self.session.mode {
            GameMode::Practice(_) => self.select_mode(GameMode::Practice(tier)),
            GameMode::Timeless => debug!("difficulty selection ignored in timeless mode"),
        }
    }

    /// Takes effect at the next session start.
    pub fn update_settings(&mut self, settings: Settings) {
        self.options.settings = settings;
        self.touch();
    }

    pub fn begin(&mut self) {
        if !self.session.phase.is_settled() {
            return;
        }
        self.reset_session();
        self.session.phase = SessionPhase::Countdown(COUNTDOWN_FROM);
        self.timers.arm(TimerKind::Countdown, COUNTDOWN_INTERVAL_MS);
        self.events.push(GameEvent::CountdownTick {
            remaining: COUNTDOWN_FROM,
        });
        self.touch();
    }

    pub fn quit(&mut self) {
        if self.session.phase.is_running() {
            self.end(EndReason::Quit);
        }
    }

    /// End whatever is running and return to a fresh Idle state.
    pub fn restart(&mut self) {
        if self.session.phase.is_running() {
            self.end(EndReason::Quit);
        }
        self.reset_session();
        self.touch();
    }

    // ---- time ----

    /// Move logical time forward, firing due timers in order.
    pub fn advance(&mut self, delta_ms: u64) {
        let mut budget = delta_ms;
        while let Some((token, waited)) = self.timers.next_fire(budget) {
            budget -= waited;
            self.clock_ms += waited;
            self.dispatch(token);
        }
        self.timers.elapse(budget);
        self.clock_ms += budget;
    }

    /// Deliver a fire from an external scheduler. The clock moves forward by
    /// the timer's remaining wait. Stale tokens are ignored.
    pub fn on_timer(&mut self, token: TimerToken) {
        let Some(waited) = self.timers.fire(token) else {
            debug!("dropping stale {:?} timer #{}", token.kind, token.generation);
            return;
        };
        self.clock_ms += waited;
        self.dispatch(token);
    }

    fn dispatch(&mut self, token: TimerToken) {
        match token.kind {
            TimerKind::Countdown => self.on_countdown_tick(),
            TimerKind::Word => self.on_word_tick(),
            TimerKind::Session => self.on_session_tick(),
        }
    }

    fn on_countdown_tick(&mut self) {
        let SessionPhase::Countdown(remaining) = self.session.phase else {
            return;
        };
        if remaining <= 1 {
            self.timers.cancel(TimerKind::Countdown);
            self.start_playing();
        } else {
            self.session.phase = SessionPhase::Countdown(remaining - 1);
            self.events.push(GameEvent::CountdownTick {
                remaining: remaining - 1,
            });
        }
        self.touch();
    }

    fn on_word_tick(&mut self) {
        if self.session.phase != SessionPhase::Playing {
            return;
        }
        let word = self.engine.round().current_word.clone();
        if self.engine.tick(self.options.tick_ms) {
            if let Some(word) = word {
                self.events.push(GameEvent::WordExpired { word });
            }
            self.on_word_expired();
        }
        self.touch();
    }

    fn on_session_tick(&mut self) {
        if !matches!(self.session.phase, SessionPhase::Playing | SessionPhase::Advancing) {
            return;
        }
        match self.session.session_time_remaining {
            Some(secs) if secs > 1 => self.session.session_time_remaining = Some(secs - 1),
            _ => {
                self.session.session_time_remaining = Some(0);
                self.on_session_timer_expired();
            }
        }
        self.touch();
    }

    // ---- transitions ----

    fn start_playing(&mut self) {
        let mode = self.session.mode;
        self.engine.reset();
        self.session = SessionState::idle(mode, self.load_high_score(mode));
        self.started_at_ms = Some(self.clock_ms);
        self.ended_at_ms = None;
        self.final_wpm = None;

        let limit = self.options.settings.session_time_limit_minutes;
        if mode.allows_session_timer() && limit > 0 {
            self.session.session_time_remaining = Some(limit.saturating_mul(60));
            self.timers.arm(TimerKind::Session, SESSION_INTERVAL_MS);
        }

        self.session.phase = SessionPhase::Playing;
        info!("session started: {mode}, high score {}", self.session.high_score);
        self.events.push(GameEvent::SessionStarted {
            mode,
            tier: self.session.tier,
        });
        self.next_word();
    }

    fn apply_outcome(&mut self, outcome: InputOutcome) {
        for mismatch in &outcome.mismatches {
            self.events.push(GameEvent::WordMismatch(*mismatch));
        }
        if outcome.completed {
            if let Some(word) = self.engine.round().current_word.clone() {
                self.events.push(GameEvent::WordCompleted { word });
            }
            self.record_high_score();
            self.on_word_completed();
        }
        self.touch();
    }

    fn on_word_completed(&mut self) {
        self.session.words_in_tier += 1;
        self.after_word();
    }

    fn on_word_expired(&mut self) {
        self.after_word();
    }

    fn on_session_timer_expired(&mut self) {
        self.end(EndReason::TimedOut);
    }

    fn after_word(&mut self) {
        self.timers.cancel(TimerKind::Word);
        self.session.phase = SessionPhase::Advancing;

        let tier = self.session.tier;
        let rule = self.schedule().rule(tier);
        if self.session.mode.is_progressive() && rule.should_advance(self.session.words_in_tier) {
            if let Some(next) = tier.next() {
                self.advance_tier(next);
            }
        }
        self.next_word();
    }

    fn advance_tier(&mut self, to: DifficultyTier) {
        let from = self.session.tier;
        self.session.tier = to;
        self.session.words_in_tier = 0;
        self.engine.clear_used_words();
        info!("tier advanced: {from} -> {to}");
        self.events.push(GameEvent::TierAdvanced { from, to });
    }

    /// Show the next word, climbing tiers or ending the session when the
    /// current tier has nothing left.
    fn next_word(&mut self) {
        loop {
            let tier = self.session.tier;
            let word_time_ms = self.schedule().rule(tier).word_time_ms;
            match self
                .engine
                .start_word(&self.pool, tier, word_time_ms, &mut self.rng)
            {
                WordStart::Started(word) => {
                    self.timers.arm(TimerKind::Word, self.options.tick_ms);
                    self.session.phase = SessionPhase::Playing;
                    debug!(
                        "next word: {word} ({tier}, {} left)",
                        self.pool.remaining(tier, self.engine.used_words())
                    );
                    self.events.push(GameEvent::WordShown { word });
                    return;
                }
                WordStart::PoolExhausted => {
                    debug!("{tier} words exhausted");
                    match tier.next() {
                        Some(next) if self.session.mode.is_progressive() => self.advance_tier(next),
                        _ => {
                            self.end(EndReason::Completed);
                            return;
                        }
                    }
                }
            }
        }
    }

    fn end(&mut self, reason: EndReason) {
        if !self.session.phase.is_running() {
            return;
        }
        self.timers.cancel_all();
        if self.started_at_ms.is_some() {
            self.ended_at_ms = Some(self.clock_ms);
        }
        let wpm = self.engine.score().wpm(self.elapsed_ms());
        self.final_wpm = Some(wpm);
        self.engine.abandon();
        self.session.phase = SessionPhase::Ended(reason);

        let score = self.engine.score();
        let summary = SessionSummary {
            mode: self.session.mode,
            tier: self.session.tier,
            words_completed: score.words_completed,
            accuracy: score.accuracy(),
            wpm,
            high_score: self.session.high_score,
            elapsed_ms: self.elapsed_ms(),
        };
        info!(
            "session ended ({}): {} words, {} wpm, {}% accuracy",
            reason.as_str(),
            summary.words_completed,
            summary.wpm,
            summary.accuracy
        );
        self.events.push(GameEvent::SessionEnded { reason, summary });
        self.touch();
    }

    fn reset_session(&mut self) {
        self.timers.cancel_all();
        self.engine.reset();
        let mode = self.session.mode;
        self.session = SessionState::idle(mode, self.load_high_score(mode));
        self.started_at_ms = None;
        self.ended_at_ms = None;
        self.final_wpm = None;
    }

    // ---- high score ----

    fn schedule(&self) -> &TierSchedule {
        self.session
            .mode
            .schedule(&self.options.practice, &self.options.timeless)
    }

    fn load_high_score(&mut self, mode: GameMode) -> u32 {
        let key = mode.high_score_key();
        let stored = match self.store.get(&key) {
            Ok(Some(value)) => value.trim().parse::<u32>().unwrap_or_else(|_| {
                warn!("ignoring unparseable high score {value:?} for {key}");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!("high score unavailable for {key}: {e}");
                0
            }
        };
        let best = self.best_scores.entry(key).or_insert(0);
        *best = (*best).max(stored);
        *best
    }

    fn record_high_score(&mut self) {
        let words = self.engine.score().words_completed;
        if words <= self.session.high_score {
            return;
        }
        self.session.high_score = words;
        let key = self.session.mode.high_score_key();
        self.best_scores.insert(key.clone(), words);
        if let Err(e) = self.store.set(&key, &words.to_string()) {
            warn!("high score not persisted for {key}: {e}");
        }
        self.events.push(GameEvent::HighScore { score: words });
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
