//! User settings persisted as `settings.json` in the data directory.

use super::persistence::{load_json_or_default, save_json, save_path};
use crate::assets::{AssetSource, BuiltinAsset, SpriteSources};
use crate::core::config::DeviceClass;
use crate::core::constants::SETTINGS_FILE;
use crate::core::player::VisualMode;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Device class choice before the terminal size is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreference {
    #[default]
    Auto,
    Full,
    Constrained,
}

impl DevicePreference {
    pub fn resolve(self, cols: u16, rows: u16) -> DeviceClass {
        match self {
            DevicePreference::Auto => DeviceClass::detect(cols, rows),
            DevicePreference::Full => DeviceClass::Full,
            DevicePreference::Constrained => DeviceClass::Constrained,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub device: DevicePreference,
    pub background: Option<PathBuf>,
    pub sprite_resting: Option<PathBuf>,
    pub sprite_flapping: Option<PathBuf>,
    pub sprite_defeated: Option<PathBuf>,
    pub muted: bool,
}

fn source_or(path: &Option<PathBuf>, builtin: BuiltinAsset) -> AssetSource {
    match path {
        Some(p) => AssetSource::file(p),
        None => AssetSource::Builtin(builtin),
    }
}

impl Settings {
    pub fn path() -> io::Result<PathBuf> {
        save_path(SETTINGS_FILE)
    }

    /// Settings from the data directory; defaults if missing or unreadable.
    pub fn load() -> Self {
        match Self::path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!(error = %e, "no data directory, using default settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        load_json_or_default(path)
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        save_json(path, self)
    }

    pub fn background_source(&self) -> AssetSource {
        source_or(&self.background, BuiltinAsset::Background)
    }

    pub fn sprite_sources(&self) -> SpriteSources {
        SpriteSources {
            resting: source_or(
                &self.sprite_resting,
                BuiltinAsset::Player(VisualMode::Resting),
            ),
            flapping: source_or(
                &self.sprite_flapping,
                BuiltinAsset::Player(VisualMode::Flapping),
            ),
            defeated: source_or(
                &self.sprite_defeated,
                BuiltinAsset::Player(VisualMode::Defeated),
            ),
        }
    }

    /// Any image path is configured.
    pub fn has_custom_images(&self) -> bool {
        self.background.is_some()
            || self.sprite_resting.is_some()
            || self.sprite_flapping.is_some()
            || self.sprite_defeated.is_some()
    }
}
