//! High-score persistence
//!
//! Backends:
//! - `JsonFileStore`: small JSON document on disk
//! - `MemoryStore`: in-process only (tests, or when storage is unavailable)
//!
//! Callers treat every failure as non-fatal; see `Session`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::highscores::HighScore;

/// Storage failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored data is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Somewhere to keep the single best score
pub trait HighScoreStore {
    /// Read the stored best score; absent data reads as zero
    fn load(&mut self) -> Result<u64, StoreError>;
    fn save(&mut self, best: u64) -> Result<(), StoreError>;
}

/// JSON file backend
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<u64, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        let record: HighScore = serde_json::from_str(&json)?;
        log::info!("Loaded high score {}", record.best);
        Ok(record.best)
    }

    fn save(&mut self, best: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&HighScore { best })?;
        // Write-then-rename: the old record stays intact until the new one is complete
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High score saved ({})", best);
        Ok(())
    }
}

/// In-memory backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best: u64,
    /// Number of successful saves
    pub saves: u32,
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u64, StoreError> {
        Ok(self.best)
    }

    fn save(&mut self, best: u64) -> Result<(), StoreError> {
        self.best = best;
        self.saves += 1;
        Ok(())
    }
}
