//! JSON file store for native builds

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{HIGH_SCORE_KEY, HighScoreStore};
use crate::error::PersistenceError;

/// Current on-disk record version
const RECORD_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    version: u32,
    high_score: u32,
}

/// Keeps the high score in a small versioned JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under `dir` using the shared key as file stem
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", HIGH_SCORE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<u32>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let record: HighScoreRecord = serde_json::from_str(&raw)?;
        if record.version != RECORD_VERSION {
            log::warn!(
                "Unknown high score record version {} in {}",
                record.version,
                self.path.display()
            );
            return Ok(None);
        }
        Ok(Some(record.high_score))
    }

    fn write(&self, score: u32) -> Result<(), PersistenceError> {
        let record = HighScoreRecord {
            version: RECORD_VERSION,
            high_score: score,
        };
        let json = serde_json::to_string(&record)?;
        // Write to a sibling first so a crash never leaves a torn record
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl HighScoreStore for JsonFileStore {
    fn load_high_score(&mut self) -> Option<u32> {
        match self.read() {
            Ok(score) => {
                if let Some(score) = score {
                    log::info!("Loaded high score {} from {}", score, self.path.display());
                }
                score
            }
            Err(e) => {
                log::warn!("Treating high score as absent: {}", e);
                None
            }
        }
    }

    fn save_high_score(&mut self, score: u32) {
        match self.write(score) {
            Ok(()) => log::info!("High score {} saved", score),
            Err(e) => log::warn!("Could not save high score {}: {}", score, e),
        }
    }
}
