//! Utility modules: build info, persistence, settings, logging.

pub mod build_info;
pub mod logging;
pub mod persistence;
pub mod settings;
