//! The player entity and its vertical physics.

use super::collision::Bounds;
use super::config::GameConfig;
use super::constants::{FLAP_ANIM_TICKS, MAX_ROTATION, ROTATION_PER_VELOCITY};

/// Which sprite variant the player is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualMode {
    Resting,
    Flapping,
    Defeated,
}

impl VisualMode {
    pub const ALL: [VisualMode; 3] = [
        VisualMode::Resting,
        VisualMode::Flapping,
        VisualMode::Defeated,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            VisualMode::Resting => "resting",
            VisualMode::Flapping => "flapping",
            VisualMode::Defeated => "defeated",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Fixed horizontal position.
    pub x: f32,
    /// Top edge, in surface units. Grows downward.
    pub y: f32,
    /// Vertical velocity (positive = downward). Unclamped.
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    pub mode: VisualMode,
    /// Ticks left before a flap pose returns to resting.
    pub flap_timer: u32,
}

impl Player {
    /// A player at the configured start position with zero velocity.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.player_start_x,
            y: config.player_start_y,
            velocity: 0.0,
            width: config.player_width,
            height: config.player_height,
            mode: VisualMode::Resting,
            flap_timer: 0,
        }
    }

    /// One physics step: velocity first, then position.
    pub fn integrate(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.y += self.velocity;
    }

    /// Velocity override, not an additive impulse.
    pub fn flap(&mut self, flap_strength: f32) {
        self.velocity = flap_strength;
        self.mode = VisualMode::Flapping;
        self.flap_timer = FLAP_ANIM_TICKS;
    }

    /// Count down the flap pose.
    pub fn tick_animation(&mut self) {
        if self.mode != VisualMode::Flapping {
            return;
        }
        self.flap_timer = self.flap_timer.saturating_sub(1);
        if self.flap_timer == 0 {
            self.mode = VisualMode::Resting;
        }
    }

    pub fn defeat(&mut self) {
        self.mode = VisualMode::Defeated;
        self.flap_timer = 0;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Sprite rotation in radians, proportional to velocity and clamped.
    pub fn rotation(&self) -> f32 {
        (self.velocity * ROTATION_PER_VELOCITY).clamp(-MAX_ROTATION, MAX_ROTATION)
    }

    /// Where a flap puff is emitted: just behind the player, vertically centred.
    pub fn trailing_point(&self, offset: f32) -> (f32, f32) {
        (self.x - offset, self.y + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DeviceClass, Viewport};

    fn config() -> GameConfig {
        GameConfig::resolve(DeviceClass::Full, Viewport::new(160, 80))
    }

    #[test]
    fn test_new_player_at_start() {
        let config = config();
        let player = Player::new(&config);
        assert_eq!(player.x, config.player_start_x);
        assert_eq!(player.y, config.player_start_y);
        assert_eq!(player.velocity, 0.0);
        assert_eq!(player.mode, VisualMode::Resting);
    }

    #[test]
    fn test_integrate_updates_velocity_before_position() {
        let mut player = Player::new(&config());
        player.velocity = 2.0;
        let y0 = player.y;
        player.integrate(0.5);
        assert_eq!(player.velocity, 2.5);
        assert_eq!(player.y, y0 + 2.5);
    }

    #[test]
    fn test_fall_speed_is_unbounded() {
        let mut player = Player::new(&config());
        for _ in 0..1000 {
            player.integrate(0.35);
        }
        assert!(player.velocity > 300.0);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut player = Player::new(&config());
        player.velocity = 42.0;
        player.flap(-7.5);
        assert_eq!(player.velocity, -7.5);
        player.velocity = -100.0;
        player.flap(-7.5);
        assert_eq!(player.velocity, -7.5);
    }

    #[test]
    fn test_flap_pose_expires() {
        let mut player = Player::new(&config());
        player.flap(-7.5);
        assert_eq!(player.mode, VisualMode::Flapping);
        for _ in 0..FLAP_ANIM_TICKS - 1 {
            player.tick_animation();
            assert_eq!(player.mode, VisualMode::Flapping);
        }
        player.tick_animation();
        assert_eq!(player.mode, VisualMode::Resting);
    }

    #[test]
    fn test_defeated_pose_sticks() {
        let mut player = Player::new(&config());
        player.flap(-7.5);
        player.defeat();
        for _ in 0..20 {
            player.tick_animation();
        }
        assert_eq!(player.mode, VisualMode::Defeated);
    }

    #[test]
    fn test_rotation_clamped() {
        let mut player = Player::new(&config());
        player.velocity = 2.0;
        assert!((player.rotation() - 0.2).abs() < 1e-6);
        player.velocity = 50.0;
        assert_eq!(player.rotation(), MAX_ROTATION);
        player.velocity = -50.0;
        assert_eq!(player.rotation(), -MAX_ROTATION);
    }
}
