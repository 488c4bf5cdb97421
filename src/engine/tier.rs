use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    #[default]
    Easy,
    Medium,
    Hard,
}

pub const ALL_TIERS: [DifficultyTier; 3] = [
    DifficultyTier::Easy,
    DifficultyTier::Medium,
    DifficultyTier::Hard,
];

impl DifficultyTier {
    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Medium => "Medium",
            DifficultyTier::Hard => "Hard",
        }
    }

    /// Informational only; pools arrive pre-partitioned.
    pub fn length_band(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "4-5 letters",
            DifficultyTier::Medium => "6-8 letters",
            DifficultyTier::Hard => "9+ letters",
        }
    }

    /// Next tier up, or `None` at the top.
    pub fn next(self) -> Option<Self> {
        match self {
            DifficultyTier::Easy => Some(DifficultyTier::Medium),
            DifficultyTier::Medium => Some(DifficultyTier::Hard),
            DifficultyTier::Hard => None,
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DifficultyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(DifficultyTier::Easy),
            "medium" => Ok(DifficultyTier::Medium),
            "hard" => Ok(DifficultyTier::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRule {
    /// Per-word time limit in milliseconds.
    pub word_time_ms: u64,
    /// Completed words needed before the next tier; `None` never advances.
    #[serde(default)]
    pub words_to_advance: Option<u32>,
}

impl TierRule {
    pub const fn new(word_time_ms: u64, words_to_advance: Option<u32>) -> Self {
        Self {
            word_time_ms,
            words_to_advance,
        }
    }

    pub fn should_advance(&self, words_in_tier: u32) -> bool {
        self.words_to_advance
            .is_some_and(|needed| words_in_tier >= needed)
    }
}

/// Per-tier rules for one game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSchedule {
    pub easy: TierRule,
    pub medium: TierRule,
    pub hard: TierRule,
}

impl TierSchedule {
    pub const fn practice() -> Self {
        Self {
            easy: TierRule::new(10_000, None),
            medium: TierRule::new(5_000, None),
            hard: TierRule::new(5_000, None),
        }
    }

    pub const fn timeless() -> Self {
        Self {
            easy: TierRule::new(10_000, Some(10)),
            medium: TierRule::new(8_000, Some(15)),
            hard: TierRule::new(6_000, None),
        }
    }

    pub fn rule(&self, tier: DifficultyTier) -> TierRule {
        match tier {
            DifficultyTier::Easy => self.easy,
            DifficultyTier::Medium => self.medium,
            DifficultyTier::Hard => self.hard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_progression_stops_at_hard() {
        assert_eq!(DifficultyTier::Easy.next(), Some(DifficultyTier::Medium));
        assert_eq!(DifficultyTier::Medium.next(), Some(DifficultyTier::Hard));
        assert_eq!(DifficultyTier::Hard.next(), None);
    }

    #[test]
    fn test_parse_tier_is_case_insensitive() {
        assert_eq!("Medium".parse::<DifficultyTier>(), Ok(DifficultyTier::Medium));
        assert_eq!(" hard ".parse::<DifficultyTier>(), Ok(DifficultyTier::Hard));
        assert!("expert".parse::<DifficultyTier>().is_err());
    }

    #[test]
    fn test_timeless_schedule_thresholds() {
        let schedule = TierSchedule::timeless();
        assert!(!schedule.easy.should_advance(9));
        assert!(schedule.easy.should_advance(10));
        assert!(schedule.medium.should_advance(15));
        assert!(!schedule.hard.should_advance(u32::MAX));
    }

    #[test]
    fn test_practice_schedule_never_advances() {
        let schedule = TierSchedule::practice();
        for tier in ALL_TIERS {
            assert!(!schedule.rule(tier).should_advance(1_000));
        }
        assert_eq!(schedule.rule(DifficultyTier::Medium).word_time_ms, 5_000);
    }

    #[test]
    fn test_schedule_serde_from_toml() {
        let toml_str = r#"
easy = { word_time_ms = 12000, words_to_advance = 5 }
medium = { word_time_ms = 9000, words_to_advance = 8 }
hard = { word_time_ms = 7000 }
"#;
        let schedule: TierSchedule = toml::from_str(toml_str).unwrap();
        assert_eq!(schedule.easy, TierRule::new(12_000, Some(5)));
        assert_eq!(schedule.hard.words_to_advance, None);
    }
}
