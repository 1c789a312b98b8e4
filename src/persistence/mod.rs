//! High score persistence
//!
//! The session loads the stored best once at startup and writes it back
//! whenever the running score beats it. Stores never fail loudly: a missing
//! or corrupt record reads as "no high score yet", and write failures are
//! logged and dropped.

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage key / file stem shared by every backend
pub const HIGH_SCORE_KEY: &str = "flappyDragonHighScore";

/// Somewhere to keep the best score between runs
pub trait HighScoreStore {
    /// Stored high score, or `None` if absent or unreadable
    fn load_high_score(&mut self) -> Option<u32>;

    /// Replace the stored high score
    fn save_high_score(&mut self, score: u32);
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Rc<RefCell<T>> {
    fn load_high_score(&mut self) -> Option<u32> {
        self.borrow_mut().load_high_score()
    }

    fn save_high_score(&mut self, score: u32) {
        self.borrow_mut().save_high_score(score);
    }
}

/// Parse a stored high score; anything but a plain non-negative integer is absent
pub fn parse_high_score(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(score) => Some(score),
        Err(_) => {
            if !trimmed.is_empty() {
                log::warn!("Ignoring malformed high score {:?}", trimmed);
            }
            None
        }
    }
}

/// Process-lifetime store (tests, demos, storage-less browsers)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub high_score: Option<u32>,
    /// Every value written, oldest first
    pub writes: Vec<u32>,
}

impl MemoryStore {
    pub fn with_high_score(score: u32) -> Self {
        Self {
            high_score: Some(score),
            writes: Vec::new(),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&mut self) -> Option<u32> {
        self.high_score
    }

    fn save_high_score(&mut self, score: u32) {
        self.high_score = Some(score);
        self.writes.push(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_high_score() {
        assert_eq!(parse_high_score("42"), Some(42));
        assert_eq!(parse_high_score(" 7\n"), Some(7));
        assert_eq!(parse_high_score(""), None);
        assert_eq!(parse_high_score("-3"), None);
        assert_eq!(parse_high_score("12abc"), None);
        assert_eq!(parse_high_score("NaN"), None);
    }

    #[test]
    fn test_memory_store_records_writes() {
        let mut store = MemoryStore::with_high_score(3);
        assert_eq!(store.load_high_score(), Some(3));
        store.save_high_score(4);
        store.save_high_score(5);
        assert_eq!(store.load_high_score(), Some(5));
        assert_eq!(store.writes, vec![4, 5]);
    }
}
