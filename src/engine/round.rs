use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::input::{self, Evaluation, Key, Mismatch};
use crate::engine::score::ScoreState;
use crate::engine::tier::DifficultyTier;
use crate::generator::pool::WordPool;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    AwaitingWord,
    Active,
    Completed,
    Expired,
}

/// Live state of one word attempt; rebuilt for every word.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub current_word: Option<String>,
    pub input: String,
    /// Remaining time, 100 down to 0.
    pub progress: f64,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            current_word: None,
            input: String::new(),
            progress: 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordStart {
    Started(String),
    PoolExhausted,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputOutcome {
    pub mismatches: Vec<Mismatch>,
    pub completed: bool,
}

impl InputOutcome {
    fn ignored() -> Self {
        Self::default()
    }
}

pub struct RoundEngine {
    phase: RoundPhase,
    round: RoundState,
    target: Vec<char>,
    used_words: HashSet<String>,
    score: ScoreState,
    tier: DifficultyTier,
    word_time_ms: u64,
    elapsed_ms: u64,
}

impl Default for RoundEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundEngine {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::AwaitingWord,
            round: RoundState::default(),
            target: Vec::new(),
            used_words: HashSet::new(),
            score: ScoreState::default(),
            tier: DifficultyTier::Easy,
            word_time_ms: 0,
            elapsed_ms: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn used_words(&self) -> &HashSet<String> {
        &self.used_words
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    /// Forget everything from the previous session.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Start a new tier scope: previously shown words become eligible again.
    pub fn clear_used_words(&mut self) {
        self.used_words.clear();
    }

    /// Drop the current word without scoring it.
    pub fn abandon(&mut self) {
        self.phase = RoundPhase::AwaitingWord;
        self.round = RoundState::default();
        self.target.clear();
    }

    pub fn start_word<R: Rng + ?Sized>(
        &mut self,
        pool: &WordPool,
        tier: DifficultyTier,
        word_time_ms: u64,
        rng: &mut R,
    ) -> WordStart {
        self.abandon();
        self.tier = tier;
        self.word_time_ms = word_time_ms;
        self.elapsed_ms = 0;

        let Some(word) = pool.pick_word(tier, &self.used_words, rng) else {
            return WordStart::PoolExhausted;
        };
        let word = word.to_string();

        self.used_words.insert(word.clone());
        self.target = word.chars().collect();
        self.round.current_word = Some(word.clone());
        self.phase = RoundPhase::Active;
        WordStart::Started(word)
    }

    /// Keyboard surface: synthesize the resulting field value and evaluate it.
    pub fn apply_keystroke(&mut self, key: Key) -> InputOutcome {
        if !self.is_active() {
            return InputOutcome::ignored();
        }
        match input::synthesize(&self.round.input, key, self.target.len()) {
            Some(value) => self.apply_text_input(&value),
            None => InputOutcome::ignored(),
        }
    }

    /// Text-field surface: the field now holds `value`.
    pub fn apply_text_input(&mut self, value: &str) -> InputOutcome {
        if !self.is_active() {
            return InputOutcome::ignored();
        }
        let evaluation = input::evaluate(&self.target, &self.round.input, value);
        self.commit(evaluation)
    }

    fn commit(&mut self, evaluation: Evaluation) -> InputOutcome {
        self.score.total_keystrokes += evaluation.typed;
        self.score.correct_keystrokes += evaluation.correct;
        self.round.input = evaluation.input;

        if evaluation.complete {
            self.score.words_completed += 1;
            self.phase = RoundPhase::Completed;
        }

        InputOutcome {
            mismatches: evaluation.mismatches,
            completed: evaluation.complete,
        }
    }

    /// Advance the word timer. Returns true when this tick expired the word.
    pub fn tick(&mut self, delta_ms: u64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        self.round.progress = self.remaining_progress();
        if self.round.progress <= 0.0 {
            self.phase = RoundPhase::Expired;
            return true;
        }
        false
    }

    fn remaining_progress(&self) -> f64 {
        if self.word_time_ms == 0 {
            return 0.0;
        }
        let used = self.elapsed_ms as f64 / self.word_time_ms as f64;
        ((1.0 - used) * 100.0).clamp(0.0, 100.0)
    }
}
