//! Browser LocalStorage store (WASM only)

use super::{HIGH_SCORE_KEY, HighScoreStore, parse_high_score};
use crate::error::PersistenceError;

/// Keeps the high score as a plain integer string in LocalStorage
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load_high_score(&mut self) -> Option<u32> {
        let storage = match Self::storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("{}; high score starts at zero", e);
                return None;
            }
        };

        match storage.get_item(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => {
                let score = parse_high_score(&raw);
                if let Some(score) = score {
                    log::info!("Loaded high score {}", score);
                }
                score
            }
            _ => {
                log::info!("No high score found, starting fresh");
                None
            }
        }
    }

    fn save_high_score(&mut self, score: u32) {
        match Self::storage() {
            Ok(storage) => {
                if storage
                    .set_item(HIGH_SCORE_KEY, &score.to_string())
                    .is_err()
                {
                    log::warn!("LocalStorage rejected high score {}", score);
                }
            }
            Err(e) => log::warn!("{}; high score {} not saved", e, score),
        }
    }
}
