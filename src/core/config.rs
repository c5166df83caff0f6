//! Resolved game configuration.
//!
//! Device-class differences are folded into a single [`GameConfig`] computed
//! once at startup. Simulation and render stages only read the resolved
//! values; nothing downstream branches on [`DeviceClass`] directly.

use super::constants::*;
use serde::{Deserialize, Serialize};

/// Rendering/simulation budget class of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Full effects, gradients, blurred backdrop, viewport-sized surface.
    Full,
    /// Small fixed surface, flat fills, no effects.
    Constrained,
}

impl DeviceClass {
    /// Pick a class from the terminal size in cells.
    pub fn detect(cols: u16, rows: u16) -> Self {
        if cols < CONSTRAINED_MAX_COLS || rows < CONSTRAINED_MAX_ROWS {
            DeviceClass::Constrained
        } else {
            DeviceClass::Full
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeviceClass::Full => "full",
            DeviceClass::Constrained => "constrained",
        }
    }
}

/// Pixel dimensions of the physical drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub pixel_width: u16,
    pub pixel_height: u16,
}

impl Viewport {
    pub fn new(pixel_width: u16, pixel_height: u16) -> Self {
        Self {
            pixel_width,
            pixel_height,
        }
    }

    /// Half-block rendering gives two pixels per terminal row.
    pub fn from_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols, rows.saturating_mul(2))
    }
}

/// Feature switches consumed by the render and effects stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub gradients: bool,
    pub shadows: bool,
    pub effects: bool,
    pub backdrop_blur: bool,
}

/// Every tunable the simulation and renderer need, resolved for one device.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub device: DeviceClass,
    pub surface_width: f32,
    pub surface_height: f32,
    pub ground_height: f32,

    pub player_start_x: f32,
    pub player_start_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub gravity: f32,
    pub flap_strength: f32,

    pub spawn_interval: u64,
    pub base_gap: f32,
    pub min_gap: f32,
    pub gap_step: f32,
    pub min_segment_height: f32,
    pub min_obstacle_width: u32,
    pub max_obstacle_width: u32,
    pub base_speed: f32,
    pub speed_step: f32,

    pub features: FeatureFlags,
}

impl GameConfig {
    /// Resolve the configuration for a device class and initial viewport.
    pub fn resolve(device: DeviceClass, viewport: Viewport) -> Self {
        let (player_start_x, player_start_y, player_width, player_height) = match device {
            DeviceClass::Full => (PLAYER_START_X, PLAYER_START_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
            DeviceClass::Constrained => (
                PLAYER_START_X * CONSTRAINED_SCALE,
                PLAYER_START_Y * CONSTRAINED_SCALE,
                CONSTRAINED_PLAYER_WIDTH,
                CONSTRAINED_PLAYER_HEIGHT,
            ),
        };
        let constrained = device == DeviceClass::Constrained;

        let mut config = Self {
            device,
            surface_width: CONSTRAINED_SURFACE_WIDTH,
            surface_height: CONSTRAINED_SURFACE_HEIGHT,
            ground_height: GROUND_HEIGHT,

            player_start_x,
            player_start_y,
            player_width,
            player_height,
            gravity: if constrained { CONSTRAINED_GRAVITY } else { GRAVITY },
            flap_strength: if constrained {
                CONSTRAINED_FLAP_STRENGTH
            } else {
                FLAP_STRENGTH
            },

            spawn_interval: BASE_SPAWN_INTERVAL,
            base_gap: BASE_GAP,
            min_gap: MIN_GAP,
            gap_step: GAP_SHRINK_STEP,
            min_segment_height: MIN_SEGMENT_HEIGHT,
            min_obstacle_width: MIN_OBSTACLE_WIDTH,
            max_obstacle_width: MAX_OBSTACLE_WIDTH,
            base_speed: if constrained {
                CONSTRAINED_BASE_SPEED
            } else {
                BASE_SPEED
            },
            speed_step: if constrained {
                CONSTRAINED_SPEED_STEP
            } else {
                SPEED_STEP
            },

            features: FeatureFlags {
                gradients: !constrained,
                shadows: true,
                effects: !constrained,
                backdrop_blur: !constrained,
            },
        };
        config.resize(viewport);
        config
    }

    /// Recompute the logical surface size for a new viewport.
    ///
    /// Full devices keep a fixed logical height and follow the viewport's
    /// aspect ratio; constrained devices always use the fixed small surface.
    pub fn resize(&mut self, viewport: Viewport) {
        match self.device {
            DeviceClass::Full => {
                self.surface_height = FULL_SURFACE_HEIGHT;
                self.surface_width = if viewport.pixel_height == 0 {
                    FULL_SURFACE_HEIGHT
                } else {
                    (FULL_SURFACE_HEIGHT * viewport.pixel_width as f32
                        / viewport.pixel_height as f32)
                        .round()
                };
            }
            DeviceClass::Constrained => {
                self.surface_width = CONSTRAINED_SURFACE_WIDTH;
                self.surface_height = CONSTRAINED_SURFACE_HEIGHT;
            }
        }
    }

    /// Y coordinate of the ground line (top of the ground strip).
    pub fn ground_y(&self) -> f32 {
        self.surface_height - self.ground_height
    }
}
