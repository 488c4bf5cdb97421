pub mod input;
pub mod round;
pub mod score;
pub mod tier;

pub use input::{CharStatus, Key, Mismatch};
pub use round::{InputOutcome, RoundEngine, RoundPhase, RoundState, WordStart};
pub use score::ScoreState;
pub use tier::{DifficultyTier, TierRule, TierSchedule};
