//! The player's body: vertical physics, sizing and wing animation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::{Physics, Viewport};

/// Sprite height as a fraction of viewport width
pub const SPRITE_HEIGHT_RATIO: f32 = 0.16;
/// Sprite sheet aspect ratio (width / height)
pub const SPRITE_ASPECT: f32 = 166.0 / 129.0;
/// Placeholder square side as a fraction of viewport width
pub const PLACEHOLDER_SIZE_RATIO: f32 = 0.08;

/// Sprite frames played while flying (flap down, then back up)
pub const ANIMATION_SEQUENCE: [usize; 12] = [0, 1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1];
/// Milliseconds per animation frame
pub const FRAME_INTERVAL_MS: f32 = 60.0;

/// Where the body waits before the first game
pub const OFFSCREEN_POS: Vec2 = Vec2::new(-50.0, -50.0);

/// Visual the body is sized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BodyShape {
    /// Sprites failed or are still loading: a plain square
    #[default]
    Placeholder,
    Sprite,
}

/// Screen boundary touched during integration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryContact {
    Floor,
    Ceiling,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity, positive is down
    pub velocity: f32,
    pub shape: BodyShape,
    /// Index into `ANIMATION_SEQUENCE`
    pub frame_index: usize,
    pub frame_timer_ms: f32,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self {
            pos: OFFSCREEN_POS,
            width: 0.0,
            height: 0.0,
            velocity: 0.0,
            shape: BodyShape::Placeholder,
            frame_index: 0,
            frame_timer_ms: 0.0,
        }
    }
}

impl PlayerBody {
    /// Recompute size from the viewport; position and velocity are untouched
    pub fn resize(&mut self, viewport: Viewport) {
        match self.shape {
            BodyShape::Sprite => {
                self.height = viewport.width * SPRITE_HEIGHT_RATIO;
                self.width = self.height * SPRITE_ASPECT;
            }
            BodyShape::Placeholder => {
                self.width = viewport.width * PLACEHOLDER_SIZE_RATIO;
                self.height = self.width;
            }
        }
    }

    /// Place at the start position, at rest
    pub fn reset(&mut self, viewport: Viewport) {
        self.pos = Vec2::new(viewport.width / 5.0, viewport.height / 2.0);
        self.velocity = 0.0;
        self.frame_index = 0;
        self.frame_timer_ms = 0.0;
    }

    /// One physics step. With `clamp_floor` the body stops at `floor` and
    /// reports the contact; without it the body may fall through.
    pub fn integrate(
        &mut self,
        dt: f32,
        physics: &Physics,
        floor: f32,
        clamp_floor: bool,
    ) -> Option<BoundaryContact> {
        self.velocity += physics.gravity * dt;
        if self.velocity > physics.terminal_velocity {
            self.velocity = physics.terminal_velocity;
        }
        self.pos.y += self.velocity * dt;

        if clamp_floor && self.pos.y + self.height > floor {
            self.pos.y = floor - self.height;
            return Some(BoundaryContact::Floor);
        }

        let ceiling = -self.height / 2.0;
        if self.pos.y < ceiling {
            self.pos.y = ceiling;
            self.velocity = 0.0;
            return Some(BoundaryContact::Ceiling);
        }

        None
    }

    /// Replace velocity with the jump impulse
    pub fn apply_jump(&mut self, physics: &Physics) {
        self.velocity = physics.jump_impulse;
    }

    /// Advance the wing animation by wall-clock milliseconds
    pub fn animate(&mut self, raw_ms: f32) {
        self.frame_timer_ms += raw_ms;
        if self.frame_timer_ms > FRAME_INTERVAL_MS {
            self.frame_index = (self.frame_index + 1) % ANIMATION_SEQUENCE.len();
            self.frame_timer_ms = 0.0;
        }
    }

    /// Sprite sheet frame to draw
    pub fn sprite_frame(&self) -> usize {
        ANIMATION_SEQUENCE.get(self.frame_index).copied().unwrap_or(0)
    }

    /// Nose-up / nose-down rotation for drawing (radians)
    pub fn tilt(&self) -> f32 {
        (self.velocity * 0.05).clamp(-0.5, 0.5)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }
}
