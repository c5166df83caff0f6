// Frame pacing
pub const REALTIME_FRAME_MS: u64 = 16; // ~60 FPS target, simulation is frame-count based

// Surface geometry (logical units)
pub const FULL_SURFACE_HEIGHT: f32 = 640.0;
pub const CONSTRAINED_SURFACE_WIDTH: f32 = 240.0;
pub const CONSTRAINED_SURFACE_HEIGHT: f32 = 360.0;
pub const GROUND_HEIGHT: f32 = 20.0;

// Device auto-detection thresholds (terminal cells)
pub const CONSTRAINED_MAX_COLS: u16 = 80;
pub const CONSTRAINED_MAX_ROWS: u16 = 24;

// Player
pub const PLAYER_START_X: f32 = 50.0;
pub const PLAYER_START_Y: f32 = 150.0;
pub const PLAYER_WIDTH: f32 = 60.0;
pub const PLAYER_HEIGHT: f32 = 45.0;
pub const CONSTRAINED_SCALE: f32 = 0.42; // 240 / 570
pub const CONSTRAINED_PLAYER_WIDTH: f32 = 40.0;
pub const CONSTRAINED_PLAYER_HEIGHT: f32 = 30.0;
pub const GRAVITY: f32 = 0.35;
pub const FLAP_STRENGTH: f32 = -7.5;
pub const CONSTRAINED_GRAVITY: f32 = 0.55;
pub const CONSTRAINED_FLAP_STRENGTH: f32 = -9.5;
pub const FLAP_ANIM_TICKS: u32 = 9; // ~150ms at 60 FPS
pub const ROTATION_PER_VELOCITY: f32 = 0.1;
pub const MAX_ROTATION: f32 = 0.5; // radians, both directions

// Obstacles
pub const BASE_SPAWN_INTERVAL: u64 = 100;
pub const BASE_GAP: f32 = 160.0;
pub const MIN_GAP: f32 = BASE_GAP * 0.75;
pub const GAP_SHRINK_STEP: f32 = 10.0;
pub const MIN_SEGMENT_HEIGHT: f32 = 60.0;
pub const MIN_OBSTACLE_WIDTH: u32 = 60;
pub const MAX_OBSTACLE_WIDTH: u32 = 80;
pub const BASE_SPEED: f32 = 3.0;
pub const SPEED_STEP: f32 = 1.0;
pub const CONSTRAINED_BASE_SPEED: f32 = 4.2;
pub const CONSTRAINED_SPEED_STEP: f32 = 0.7;
pub const CAP_HEIGHT: f32 = 25.0;
pub const CAP_OVERHANG: f32 = 5.0;
pub const STRIP_WIDTH: f32 = 10.0;
pub const SHADOW_OFFSET: f32 = 5.0;

// Difficulty
pub const MAX_TIER: u32 = 3;
pub const POINTS_PER_TIER: u32 = 10;

// Effects
pub const PARTICLE_SPEED_RANGE: f32 = 5.0; // components drawn from [-range, range)
pub const PARTICLE_LIFE_STEP: f32 = 0.02;
pub const SCORE_BURST: usize = 12;
pub const COLLISION_BURST: usize = 20;
pub const FLAP_BURST: usize = 4;
pub const PUFF_START_SIZE: f32 = 8.0;
pub const PUFF_START_OPACITY: f32 = 0.7;
pub const PUFF_EXPAND_SPEED: f32 = 0.8;
pub const PUFF_FADE_SPEED: f32 = 0.025;
pub const PUFF_TRAIL_OFFSET: f32 = 10.0;

// HUD
pub const HUD_SCORE_Y: f32 = 50.0;
pub const HUD_SCORE_SIZE: f32 = 30.0;

// Backdrop
pub const BACKDROP_BLUR_RADIUS: f32 = 8.0;
pub const BACKDROP_BRIGHTNESS: f32 = 0.7;

// Audio
pub const DIE_CUE_DELAY_TICKS: u32 = 30; // ~500ms after the impact cue

// Persistence
pub const HIGH_SCORE_FILE: &str = "high_score.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "flapper.log";
pub const LOG_ENV_VAR: &str = "FLAPPER_LOG";
