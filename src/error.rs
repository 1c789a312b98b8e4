//! Error types
//!
//! Nothing here is fatal to a running session: callers log and fall back.

use thiserror::Error;

/// A viewport size the simulation cannot lay itself out in
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViewportError {
    #[error("viewport must have positive size, got {width}x{height}")]
    NonPositive { width: f32, height: f32 },
    #[error("viewport size is not finite: {width}x{height}")]
    NotFinite { width: f32, height: f32 },
}

/// Failure reading or writing the stored high score
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("high score file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage backend unavailable")]
    Unavailable,
}
