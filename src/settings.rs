//! Host settings
//!
//! Persisted separately from the high score, as JSON. Anything missing from
//! the file takes its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::highscores::DEFAULT_HIGH_SCORE_FILE;
use crate::tuning::Tuning;

/// Host settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; `None` picks one at startup
    pub seed: Option<u64>,
    /// Where the native high score file lives
    pub high_score_path: PathBuf,
    /// Log filter for env_logger (RUST_LOG wins if set)
    pub log_filter: String,

    // === Headless demo ===
    /// Ticks to run before quitting
    pub demo_ticks: u64,
    /// Restart automatically after game over
    pub auto_restart: bool,

    /// Game balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            log_filter: "info".to_string(),
            demo_ticks: 60 * 60,
            auto_restart: true,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "stampede.json";

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
