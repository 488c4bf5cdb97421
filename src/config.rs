use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::tier::{DifficultyTier, TierSchedule};
use crate::session::controller::{DEFAULT_TICK_MS, SessionOptions};
use crate::session::mode::GameMode;
use crate::session::state::Settings;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Timeless only; 0 plays until quit.
    #[serde(default)]
    pub session_time_limit_minutes: u32,
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_mode")]
    pub default_mode: String,
    #[serde(default)]
    pub default_difficulty: DifficultyTier,
    /// Directory holding `easy.json`, `medium.json` and `hard.json`.
    #[serde(default)]
    pub word_list_dir: Option<PathBuf>,
    #[serde(default = "TierSchedule::practice")]
    pub practice: TierSchedule,
    #[serde(default = "TierSchedule::timeless")]
    pub timeless: TierSchedule,
}

fn default_sound_enabled() -> bool {
    true
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}
fn default_mode() -> String {
    "timeless".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_time_limit_minutes: 0,
            sound_enabled: default_sound_enabled(),
            theme: default_theme(),
            tick_ms: default_tick_ms(),
            default_mode: default_mode(),
            default_difficulty: DifficultyTier::default(),
            word_list_dir: None,
            practice: TierSchedule::practice(),
            timeless: TierSchedule::timeless(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let mut config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typeblitz")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Replace values that would stall or confuse a session.
    pub fn normalize(&mut self) {
        if self.tick_ms == 0 {
            self.tick_ms = default_tick_ms();
        }
        if GameMode::from_name(&self.default_mode, self.default_difficulty).is_none() {
            log::warn!("unknown default_mode {:?}, using timeless", self.default_mode);
            self.default_mode = default_mode();
        }
        for schedule in [&mut self.practice, &mut self.timeless] {
            for rule in [&mut schedule.easy, &mut schedule.medium, &mut schedule.hard] {
                if rule.word_time_ms == 0 {
                    rule.word_time_ms = 1_000;
                }
            }
        }
    }

    pub fn starting_mode(&self) -> GameMode {
        GameMode::from_name(&self.default_mode, self.default_difficulty)
            .unwrap_or(GameMode::Timeless)
    }

    pub fn settings(&self) -> Settings {
        Settings {
            session_time_limit_minutes: self.session_time_limit_minutes,
            sound_enabled: self.sound_enabled,
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            practice: self.practice,
            timeless: self.timeless,
            tick_ms: self.tick_ms,
            settings: self.settings(),
        }
    }
}
