use serde::{Deserialize, Serialize};

use crate::engine::input::CharStatus;
use crate::engine::round::{RoundPhase, RoundState};
use crate::engine::score::ScoreState;
use crate::engine::tier::DifficultyTier;
use crate::session::events::EndReason;
use crate::session::mode::GameMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Idle,
    /// Seconds left before play starts.
    Countdown(u8),
    Playing,
    /// Between words, while the next one is chosen.
    Advancing,
    Ended(EndReason),
}

impl SessionPhase {
    /// A session is underway and can be quit.
    pub fn is_running(self) -> bool {
        matches!(
            self,
            SessionPhase::Countdown(_) | SessionPhase::Playing | SessionPhase::Advancing
        )
    }

    /// Mode and difficulty may only change here.
    pub fn is_settled(self) -> bool {
        matches!(self, SessionPhase::Idle | SessionPhase::Ended(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// 0 disables the session timer.
    pub session_time_limit_minutes: u32,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_time_limit_minutes: 0,
            sound_enabled: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub mode: GameMode,
    pub tier: DifficultyTier,
    pub words_in_tier: u32,
    /// Seconds; `None` when untimed.
    pub session_time_remaining: Option<u32>,
    pub phase: SessionPhase,
    pub high_score: u32,
}

impl SessionState {
    pub fn idle(mode: GameMode, high_score: u32) -> Self {
        Self {
            mode,
            tier: mode.starting_tier(),
            words_in_tier: 0,
            session_time_remaining: None,
            phase: SessionPhase::Idle,
            high_score,
        }
    }
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub revision: u64,
    pub session: SessionState,
    pub round: RoundState,
    pub round_phase: RoundPhase,
    pub statuses: Vec<CharStatus>,
    pub score: ScoreState,
    pub accuracy: f64,
    pub wpm: u32,
    pub elapsed_ms: u64,
    pub settings: Settings,
}
