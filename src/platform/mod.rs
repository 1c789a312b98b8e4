//! Platform boundary
//!
//! Turns device-level input into the two abstract actions the simulation
//! understands. Nothing below `sim` ever sees a key code.

pub mod input;

pub use input::{ActionDebouncer, KeyBindings};
