//! Obstacle pairs: procedural spawning, scrolling and retirement.

use super::config::GameConfig;
use super::difficulty::{gap_for_tier, spawn_interval, speed_for_tier};
use rand::Rng;

/// Cache key for an obstacle's body gradient (its width in whole units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GradientKey(pub u32);

/// A top/bottom segment pair with a gap between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Leading (left) edge, decreasing every running tick.
    pub x: f32,
    /// Height of the top segment; the gap starts here.
    pub top_height: f32,
    /// Vertical clearance between the two segments.
    pub gap: f32,
    pub width: u32,
    /// Units per tick, fixed at spawn.
    pub speed: f32,
    /// Set once the player clears this obstacle.
    pub passed: bool,
    /// Body gradient key, absent when gradients are disabled.
    pub gradient: Option<GradientKey>,
}

impl Obstacle {
    /// Roll a new obstacle at the right edge of the surface.
    pub fn spawn<R: Rng>(config: &GameConfig, tier: u32, rng: &mut R) -> Self {
        let gap = gap_for_tier(config, tier);
        let min_height = config.min_segment_height;
        let max_height = config.ground_y() - gap - min_height;
        let top_height = if max_height > min_height {
            rng.gen_range(min_height..max_height).floor()
        } else {
            min_height
        };

        let width = if config.max_obstacle_width > config.min_obstacle_width {
            rng.gen_range(config.min_obstacle_width..config.max_obstacle_width)
        } else {
            config.min_obstacle_width
        };

        Self {
            x: config.surface_width,
            top_height,
            gap,
            width,
            speed: speed_for_tier(config, tier),
            passed: false,
            gradient: config.features.gradients.then_some(GradientKey(width)),
        }
    }

    pub fn advance(&mut self) {
        self.x -= self.speed;
    }

    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width as f32
    }

    /// Top of the bottom segment.
    pub fn bottom_top(&self) -> f32 {
        self.top_height + self.gap
    }

    /// Fully scrolled past the leading boundary of the view.
    pub fn is_retired(&self) -> bool {
        self.trailing_edge() <= 0.0
    }
}

/// Active obstacles in spawn order plus the spawn cadence counter.
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    /// Running ticks since the session started.
    pub tick_counter: u64,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the cadence counter and spawn if this tick lands on the
    /// tier's interval. Returns true if an obstacle was added.
    pub fn spawn_check<R: Rng>(&mut self, config: &GameConfig, tier: u32, rng: &mut R) -> bool {
        self.tick_counter += 1;
        if self.tick_counter % spawn_interval(config, tier) != 0 {
            return false;
        }
        let obstacle = Obstacle::spawn(config, tier, rng);
        tracing::trace!(
            x = obstacle.x,
            top = obstacle.top_height,
            gap = obstacle.gap,
            width = obstacle.width,
            speed = obstacle.speed,
            "obstacle spawned"
        );
        self.obstacles.push(obstacle);
        true
    }

    /// Drop obstacles that have scrolled fully off the leading edge.
    pub fn retire(&mut self) {
        self.obstacles.retain(|o| !o.is_retired());
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.tick_counter = 0;
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
