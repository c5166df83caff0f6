//! Flapper - a terminal side-scrolling reflex game.
//!
//! The simulation in [`core`] is host-agnostic: it draws through the
//! [`render::Surface`] trait, plays sounds through [`audio::AudioPort`] and
//! stores the high score through [`utils::persistence::HighScoreStore`].
//! [`ui`] is the crossterm/ratatui host.

pub mod assets;
pub mod audio;
pub mod core;
pub mod render;
pub mod ui;
pub mod utils;
