//! Score-driven difficulty tiers.

use super::config::GameConfig;
use super::constants::{MAX_TIER, POINTS_PER_TIER};

/// Difficulty tier for a score: `min(3, 1 + score / 10)`.
pub fn tier_for_score(score: u32) -> u32 {
    (1 + score / POINTS_PER_TIER).min(MAX_TIER)
}

/// Ticks between spawns at a tier. Higher tiers spawn more often.
pub fn spawn_interval(config: &GameConfig, tier: u32) -> u64 {
    (config.spawn_interval / tier.max(1) as u64).max(1)
}

/// Vertical gap at a tier, shrinking by a fixed step and never below the floor.
pub fn gap_for_tier(config: &GameConfig, tier: u32) -> f32 {
    let shrink = tier.saturating_sub(1) as f32 * config.gap_step;
    (config.base_gap - shrink).max(config.min_gap)
}

/// Horizontal obstacle speed at a tier.
pub fn speed_for_tier(config: &GameConfig, tier: u32) -> f32 {
    config.base_speed + tier.saturating_sub(1) as f32 * config.speed_step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DeviceClass, Viewport};

    fn full() -> GameConfig {
        GameConfig::resolve(DeviceClass::Full, Viewport::new(160, 80))
    }

    #[test]
    fn test_tier_boundaries() {
        for score in 0..10 {
            assert_eq!(tier_for_score(score), 1);
        }
        for score in 10..20 {
            assert_eq!(tier_for_score(score), 2);
        }
        assert_eq!(tier_for_score(25), 3);
        assert_eq!(tier_for_score(1000), 3);
        assert_eq!(tier_for_score(u32::MAX), 3);
    }

    #[test]
    fn test_gap_shrinks_to_floor() {
        let config = full();
        assert_eq!(gap_for_tier(&config, 1), 160.0);
        assert_eq!(gap_for_tier(&config, 2), 150.0);
        assert_eq!(gap_for_tier(&config, 3), 140.0);
        assert_eq!(gap_for_tier(&config, 10), 120.0);
        assert_eq!(gap_for_tier(&config, 100), 120.0);
    }

    #[test]
    fn test_gap_monotonic_in_tier() {
        let config = full();
        let mut last = f32::MAX;
        for tier in 1..20 {
            let gap = gap_for_tier(&config, tier);
            assert!(gap <= last);
            assert!(gap >= config.min_gap);
            last = gap;
        }
    }

    #[test]
    fn test_spawn_interval_floors() {
        let config = full();
        assert_eq!(spawn_interval(&config, 1), 100);
        assert_eq!(spawn_interval(&config, 2), 50);
        assert_eq!(spawn_interval(&config, 3), 33);
    }

    #[test]
    fn test_speed_per_device() {
        let config = full();
        assert_eq!(speed_for_tier(&config, 1), 3.0);
        assert_eq!(speed_for_tier(&config, 3), 5.0);

        let small = GameConfig::resolve(DeviceClass::Constrained, Viewport::new(10, 10));
        assert!((speed_for_tier(&small, 1) - 4.2).abs() < 1e-6);
        assert!((speed_for_tier(&small, 2) - 4.9).abs() < 1e-6);
    }
}
