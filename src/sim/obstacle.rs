//! Gated obstacles and the field that spawns, scrolls and culls them

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::{Physics, Viewport};

/// A wall with a single gap: blocks `[0, top_height)` and `[bottom_y, floor)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    pub width: f32,
    pub top_height: f32,
    pub bottom_y: f32,
    /// Set once the player has cleared it; never reset
    pub passed: bool,
}

impl Obstacle {
    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap(&self) -> f32 {
        self.bottom_y - self.top_height
    }
}

/// Obstacles in spawn order, which is also left-to-right order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    /// Simulated milliseconds since the last spawn
    pub spawn_accumulator_ms: f32,
    next_id: u32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `elapsed_ms`; spawn and restart the accumulator once it
    /// reaches the spawn interval. Overshoot is discarded, not carried.
    pub fn try_spawn<R: Rng>(
        &mut self,
        elapsed_ms: f32,
        physics: &Physics,
        viewport: Viewport,
        rng: &mut R,
    ) -> Option<&Obstacle> {
        self.spawn_accumulator_ms += elapsed_ms;
        if self.spawn_accumulator_ms < physics.spawn_interval_ms {
            return None;
        }
        self.spawn_accumulator_ms = 0.0;
        Some(self.spawn(physics, viewport, rng))
    }

    /// Append an obstacle at the right edge with a random gap position
    pub fn spawn<R: Rng>(
        &mut self,
        physics: &Physics,
        viewport: Viewport,
        rng: &mut R,
    ) -> &Obstacle {
        let gap = physics.obstacle_gap;
        let min_height = physics.min_obstacle_height;
        let max_height = viewport.height - gap - min_height;
        // A viewport too short for the gap pins it to the top
        let top_height = if max_height > min_height {
            rng.random_range(min_height..=max_height)
        } else {
            min_height
        };

        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x: viewport.width,
            width: physics.obstacle_width,
            top_height,
            bottom_y: top_height + gap,
            passed: false,
        });
        log::debug!("Spawned obstacle {} (gap at {:.0})", id, top_height);

        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Scroll every obstacle left at the current speed
    pub fn advance(&mut self, dt: f32, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed * dt;
        }
    }

    /// Drop obstacles whose trailing edge has left the screen; returns how many
    pub fn cull(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.right() > 0.0);
        before - self.obstacles.len()
    }

    /// Empty the field and restart the spawn timer
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.spawn_accumulator_ms = 0.0;
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
