//! Terminal presentation: half-block pixel view, overlays, input and the
//! frame loop.

pub mod driver;
pub mod flappy_scene;
pub mod game_common;
pub mod input;
pub mod pixel_view;
