use serde::{Deserialize, Serialize};

use crate::engine::input::{Key, Mismatch};
use crate::engine::tier::DifficultyTier;
use crate::session::mode::GameMode;
use crate::session::state::Settings;

/// Inputs from the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Key(Key),
    TextInput(String),
    SelectMode(GameMode),
    SelectDifficulty(DifficultyTier),
    Start,
    Quit,
    Restart,
    UpdateSettings(Settings),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Ran out of words.
    Completed,
    Quit,
    TimedOut,
}

impl EndReason {
    pub fn as_str(self) -> &'static str {
        match self {
            EndReason::Completed => "completed",
            EndReason::Quit => "quit",
            EndReason::TimedOut => "timed out",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub mode: GameMode,
    pub tier: DifficultyTier,
    pub words_completed: u32,
    pub accuracy: f64,
    pub wpm: u32,
    pub high_score: u32,
    pub elapsed_ms: u64,
}

/// Discrete signals for the presentation layer. State snapshots are pulled
/// separately via `SessionController::snapshot`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CountdownTick { remaining: u8 },
    SessionStarted { mode: GameMode, tier: DifficultyTier },
    WordShown { word: String },
    WordMismatch(Mismatch),
    WordCompleted { word: String },
    WordExpired { word: String },
    TierAdvanced { from: DifficultyTier, to: DifficultyTier },
    HighScore { score: u32 },
    SessionEnded { reason: EndReason, summary: SessionSummary },
}
