//! Pass scoring and collision detection
//!
//! Everything here is axis-aligned. The player collides using a hit-box
//! inset from its drawn body so that near-misses go the player's way.

use glam::Vec2;
use serde::Serialize;

use super::obstacle::ObstacleField;
use super::player::{BoundaryContact, PlayerBody};
use crate::tuning::{FloorCheck, Physics};

/// Player collision rectangle (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl HitBox {
    /// Body bounds inset by `ratio` of its size on every side
    pub fn for_body(body: &PlayerBody, ratio: f32) -> Self {
        let padding = Vec2::new(body.width, body.height) * ratio;
        let min = body.pos + padding;
        let max = body.pos + Vec2::new(body.width, body.height) - padding;
        Self { min, max }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }
}

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Collision {
    Obstacle { id: u32 },
    Floor,
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Obstacles cleared this pass, in spawn order
    pub scored: Vec<u32>,
    /// First collision found, if any
    pub collision: Option<Collision>,
}

/// Check the player against every obstacle and the floor.
///
/// Marks newly cleared obstacles as passed. Only the first collision is
/// reported; the caller ends the life on it and stops evaluating.
pub fn evaluate(
    body: &PlayerBody,
    field: &mut ObstacleField,
    physics: &Physics,
    floor: f32,
    contact: Option<BoundaryContact>,
) -> Evaluation {
    let hit_box = HitBox::for_body(body, physics.hit_padding_ratio);
    let mut evaluation = Evaluation::default();

    for obstacle in &mut field.obstacles {
        if hit_box.left() > obstacle.right() {
            if !obstacle.passed {
                obstacle.passed = true;
                evaluation.scored.push(obstacle.id);
            }
            continue;
        }

        let overlaps_x = hit_box.right() > obstacle.x && hit_box.left() < obstacle.right();
        let outside_gap =
            hit_box.top() < obstacle.top_height || hit_box.bottom() > obstacle.bottom_y;
        if overlaps_x && outside_gap && evaluation.collision.is_none() {
            evaluation.collision = Some(Collision::Obstacle { id: obstacle.id });
        }
    }

    if evaluation.collision.is_none() {
        let on_floor = match physics.floor_check {
            FloorCheck::Integrate => contact == Some(BoundaryContact::Floor),
            FloorCheck::Scorer => hit_box.bottom() > floor,
        };
        if on_floor {
            evaluation.collision = Some(Collision::Floor);
        }
    }

    evaluation
}
