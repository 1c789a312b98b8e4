//! Simulation core
//!
//! All gameplay logic lives here. No rendering, audio backends or platform
//! input: those talk to a `Session` through actions, resizes, snapshots and
//! hook traits.
//! - Frame-rate independent: every rate is per nominal frame, scaled by `dt`
//! - Seeded RNG only
//! - Single-threaded; one `tick` per host frame

pub mod clock;
pub mod collision;
pub mod obstacle;
pub mod particles;
pub mod phase;
pub mod player;
pub mod state;
pub mod tick;

pub use clock::{Clock, FrameDelta};
pub use collision::{Collision, Evaluation, HitBox, evaluate};
pub use obstacle::{Obstacle, ObstacleField};
pub use particles::{Particle, ParticleSystem};
pub use phase::{Action, GamePhase, PhaseMachine};
pub use player::{BodyShape, BoundaryContact, PlayerBody};
pub use state::{GameEvent, Session, Snapshot};
pub use tick::{step, tick};
