//! Flappy Dragon - a single-lane obstacle-dodging arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, obstacles, collisions, phases, session)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `audio`: Audio cue hooks
//! - `persistence`: High score storage
//! - `platform`: Device input to abstract actions

pub mod audio;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{PersistenceError, ViewportError};
pub use settings::{QualityPreset, Settings};
pub use sim::{Action, GameEvent, GamePhase, Session, Snapshot};
pub use tuning::{Tuning, Viewport};
