//! High-Score Persistence
//!
//! One value in one file: the high score as a base-10 string. Loading
//! never fails - a missing or unreadable value counts as zero - while
//! saving and clearing surface their I/O errors to the caller. Resetting
//! removes the file entirely.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// Directory under the platform data dir.
const STORE_DIR: &str = "coin-grove";

/// File holding the high score string.
const STORE_FILE: &str = "highscore";

/// Errors produced while writing the store.
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    /// Saving the high score failed.
    #[error("failed to write high score: {0}")]
    Write(#[source] io::Error),

    /// Clearing the stored high score failed.
    #[error("failed to clear high score: {0}")]
    Clear(#[source] io::Error),
}

/// File-backed high-score store.
#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory, falling back to a file in the
    /// working directory when the platform has none.
    pub fn open_default() -> Self {
        let path = dirs::data_dir()
            .map(|dir| dir.join(STORE_DIR).join(STORE_FILE))
            .unwrap_or_else(|| PathBuf::from(STORE_FILE));
        Self::new(path)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored high score.
    ///
    /// A missing file, an unreadable file, or non-numeric content all load
    /// as zero.
    pub fn load(&self) -> u32 {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!("high score at {} unreadable ({}), using 0", self.path.display(), err);
                }
                return 0;
            }
        };

        match raw.trim().parse::<u32>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "stored high score at {} is not a number, using 0",
                    self.path.display()
                );
                0
            }
        }
    }

    /// Persist `value` immediately, creating parent directories as needed.
    pub fn save(&self, value: u32) -> Result<(), ScoreStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(ScoreStoreError::Write)?;
            }
        }
        fs::write(&self.path, value.to_string()).map_err(ScoreStoreError::Write)
    }

    /// Remove the stored value. A file that is already gone counts as
    /// success.
    pub fn clear(&self) -> Result<(), ScoreStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ScoreStoreError::Clear(err)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
