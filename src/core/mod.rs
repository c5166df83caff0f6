//! Simulation core: physics, obstacles, scoring, difficulty, effects and
//! the session state machine, stitched together by the per-tick loop.

pub mod collision;
pub mod config;
pub mod constants;
pub mod difficulty;
pub mod effects;
pub mod game_state;
pub mod obstacles;
pub mod player;
pub mod session;
pub mod tick;

pub use config::{DeviceClass, GameConfig, Viewport};
pub use game_state::Game;
pub use session::{Command, SessionState};
pub use tick::{TickEvent, TickResult};
