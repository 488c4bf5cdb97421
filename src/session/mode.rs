use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::tier::{DifficultyTier, TierSchedule};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// One fixed tier, ends when the tier runs out of words.
    Practice(DifficultyTier),
    /// Starts at Easy and climbs after enough completed words.
    Timeless,
}

impl GameMode {
    pub fn starting_tier(self) -> DifficultyTier {
        match self {
            GameMode::Practice(tier) => tier,
            GameMode::Timeless => DifficultyTier::Easy,
        }
    }

    pub fn is_progressive(self) -> bool {
        matches!(self, GameMode::Timeless)
    }

    /// Session time limits only apply to timeless play.
    pub fn allows_session_timer(self) -> bool {
        self.is_progressive()
    }

    pub fn high_score_key(self) -> String {
        match self {
            GameMode::Practice(tier) => format!("practice_high_score_{}", tier.as_str()),
            GameMode::Timeless => "timeless_high_score".to_string(),
        }
    }

    pub fn schedule<'a>(self, practice: &'a TierSchedule, timeless: &'a TierSchedule) -> &'a TierSchedule {
        match self {
            GameMode::Practice(_) => practice,
            GameMode::Timeless => timeless,
        }
    }

    /// Parse a mode name as used by the config file and CLI.
    pub fn from_name(name: &str, difficulty: DifficultyTier) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "practice" => Some(GameMode::Practice(difficulty)),
            "timeless" => Some(GameMode::Timeless),
            _ => None,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Practice(tier) => write!(f, "Practice ({tier})"),
            GameMode::Timeless => f.write_str("Timeless"),
        }
    }
}
