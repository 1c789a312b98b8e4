//! Data-driven game balance
//!
//! `Tuning` is the authored configuration. `Physics` is what the simulation
//! actually runs with: the tuning resolved against the current viewport.
//! Sessions re-resolve on every valid resize and never touch `Physics`
//! mid-frame otherwise.

use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

/// Reference canvas that `ScalingMode::ViewportRelative` values are authored for
pub const REFERENCE_WIDTH: f32 = 400.0;
pub const REFERENCE_HEIGHT: f32 = 600.0;

/// Drawable area in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, ViewportError> {
        if !width.is_finite() || !height.is_finite() {
            return Err(ViewportError::NotFinite { width, height });
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(ViewportError::NonPositive { width, height });
        }
        Ok(Self { width, height })
    }
}

/// How physics constants relate to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScalingMode {
    /// Constants are absolute canvas units regardless of screen size
    #[default]
    Fixed,
    /// Constants are authored for the reference canvas and scaled per axis
    ViewportRelative,
}

/// What the clock does with a frame gap longer than the lag threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LagPolicy {
    /// Pretend exactly one nominal frame elapsed
    #[default]
    SubstituteFrame,
    /// Clamp the gap to the lag threshold
    Clamp,
}

/// Where hitting the floor is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FloorCheck {
    /// Unpadded body bottom, checked while integrating
    #[default]
    Integrate,
    /// Padded hit-box bottom, checked by the collision pass
    Scorer,
}

/// Authored game balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration per nominal frame
    pub gravity: f32,
    /// Velocity set on jump (negative is up)
    pub jump_impulse: f32,
    /// Maximum downward speed
    pub terminal_velocity: f32,
    /// Hit-box inset as a fraction of body size
    pub hit_padding_ratio: f32,

    // === Obstacles ===
    pub obstacle_speed: f32,
    pub obstacle_gap: f32,
    pub obstacle_width: f32,
    /// Smallest top or bottom segment height
    pub min_obstacle_height: f32,
    pub spawn_interval_ms: f32,

    // === Timing ===
    /// Nominal frame duration; `dt == 1.0` means one of these elapsed
    pub target_frame_ms: f32,
    /// Frame gaps longer than this are treated as lag
    pub lag_threshold_ms: f32,

    // === Policies ===
    pub scaling: ScalingMode,
    pub lag_policy: LagPolicy,
    pub floor_check: FloorCheck,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.3,
            jump_impulse: -8.0,
            terminal_velocity: 10.0,
            hit_padding_ratio: 0.25,

            obstacle_speed: 3.0,
            obstacle_gap: 150.0,
            obstacle_width: 50.0,
            min_obstacle_height: 50.0,
            spawn_interval_ms: 2000.0,

            target_frame_ms: 1000.0 / 60.0,
            lag_threshold_ms: 100.0,

            scaling: ScalingMode::Fixed,
            lag_policy: LagPolicy::SubstituteFrame,
            floor_check: FloorCheck::Integrate,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective physics for a viewport
    pub fn resolve(&self, viewport: Viewport) -> Physics {
        let (sx, sy) = match self.scaling {
            ScalingMode::Fixed => (1.0, 1.0),
            ScalingMode::ViewportRelative => (
                viewport.width / REFERENCE_WIDTH,
                viewport.height / REFERENCE_HEIGHT,
            ),
        };

        Physics {
            gravity: self.gravity * sy,
            jump_impulse: self.jump_impulse * sy,
            terminal_velocity: self.terminal_velocity * sy,
            hit_padding_ratio: self.hit_padding_ratio,
            obstacle_speed: self.obstacle_speed * sx,
            obstacle_gap: self.obstacle_gap * sy,
            obstacle_width: self.obstacle_width * sx,
            min_obstacle_height: self.min_obstacle_height * sy,
            spawn_interval_ms: self.spawn_interval_ms,
            floor_check: self.floor_check,
        }
    }
}

/// Tuning resolved against a concrete viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub terminal_velocity: f32,
    pub hit_padding_ratio: f32,
    pub obstacle_speed: f32,
    pub obstacle_gap: f32,
    pub obstacle_width: f32,
    pub min_obstacle_height: f32,
    pub spawn_interval_ms: f32,
    pub floor_check: FloorCheck,
}
