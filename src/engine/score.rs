use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub words_completed: u32,
    pub total_keystrokes: u32,
    pub correct_keystrokes: u32,
}

impl ScoreState {
    /// Rounded percentage of correct keystrokes; 100 before any keystroke.
    pub fn accuracy(&self) -> f64 {
        if self.total_keystrokes == 0 {
            return 100.0;
        }
        (self.correct_keystrokes as f64 / self.total_keystrokes as f64 * 100.0)
            .round()
            .clamp(0.0, 100.0)
    }

    pub fn wpm(&self, elapsed_ms: u64) -> u32 {
        words_per_minute(self.words_completed, elapsed_ms)
    }
}

/// Whole words per minute, 0 when no time has elapsed.
pub fn words_per_minute(words: u32, elapsed_ms: u64) -> u32 {
    if elapsed_ms == 0 {
        return 0;
    }
    let minutes = elapsed_ms as f64 / 60_000.0;
    let wpm = (words as f64 / minutes).round();
    if wpm.is_finite() && wpm > 0.0 {
        wpm as u32
    } else {
        0
    }
}
