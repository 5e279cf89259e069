//! High score persistence
//!
//! The simulation only ever stores one number. Where it lives is up to the
//! host: a text file natively, LocalStorage in the browser, memory in tests.
//! Failures never stop the game; a missing score reads as 0 and a failed save
//! is logged and forgotten.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default file for the native store
pub const DEFAULT_HIGH_SCORE_FILE: &str = "high_score.txt";

/// Why a load or save failed
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("high score storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored high score {0:?} is not a number")]
    Parse(String),
    #[error("high score storage unavailable")]
    Unavailable,
}

/// Load/save capability injected into the game
pub trait HighScoreStore {
    fn load(&mut self) -> Result<u64, PersistError>;
    fn save(&mut self, score: u64) -> Result<(), PersistError>;
}

/// Load the stored high score, treating any failure as "no prior score"
pub fn load_high_score<S: HighScoreStore + ?Sized>(store: &mut S) -> u64 {
    match store.load() {
        Ok(score) => {
            log::info!("Loaded high score {}", score);
            score
        }
        Err(e) => {
            log::warn!("No high score loaded ({}), starting from 0", e);
            0
        }
    }
}

/// Save the high score, best effort
pub fn save_high_score<S: HighScoreStore + ?Sized>(store: &mut S, score: u64) {
    match store.save(score) {
        Ok(()) => log::info!("High score {} saved", score),
        Err(e) => log::warn!("Failed to save high score {}: {}", score, e),
    }
}

fn parse_score(text: &str) -> Result<u64, PersistError> {
    let trimmed = text.trim();
    trimmed
        .parse()
        .map_err(|_| PersistError::Parse(trimmed.to_string()))
}

/// Plain-text file holding a single integer
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&mut self) -> Result<u64, PersistError> {
        parse_score(&fs::read_to_string(&self.path)?)
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

/// In-memory store; counts saves so callers can check persistence happened
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub value: Option<u64>,
    pub saves: u32,
    /// Make every save fail (to exercise best-effort handling)
    pub fail_saves: bool,
}

impl MemoryHighScoreStore {
    pub fn with_value(value: u64) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&mut self) -> Result<u64, PersistError> {
        self.value.ok_or(PersistError::Unavailable)
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        self.saves += 1;
        if self.fail_saves {
            return Err(PersistError::Unavailable);
        }
        self.value = Some(score);
        Ok(())
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageHighScoreStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageHighScoreStore {
    const STORAGE_KEY: &'static str = "stampede_high_score";

    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageHighScoreStore {
    fn load(&mut self) -> Result<u64, PersistError> {
        match Self::storage()?.get_item(Self::STORAGE_KEY) {
            Ok(Some(text)) => parse_score(&text),
            _ => Err(PersistError::Unavailable),
        }
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        Self::storage()?
            .set_item(Self::STORAGE_KEY, &score.to_string())
            .map_err(|_| PersistError::Unavailable)
    }
}
