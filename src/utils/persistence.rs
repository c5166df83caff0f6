//! JSON persistence in the platform data directory.
//!
//! Holds the durable high score and the user settings file. Reads are
//! forgiving (missing or corrupt files read as defaults); writes report
//! errors so callers can decide to log and move on.

use crate::core::constants::HIGH_SCORE_FILE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the data directory, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "flapper").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Could not determine data directory")
    })?;
    let dir = project_dirs.data_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in the data directory.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(filename))
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable json");
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

/// Durable single-integer high score.
pub trait HighScoreStore {
    /// Stored high score; absent or unreadable storage reads as zero.
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> io::Result<()>;
}

/// On-disk record. Field names are the fixed namespace of the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreRecord {
    pub high_score: u32,
    /// Unix timestamp of when the score was set.
    #[serde(default)]
    pub set_at: Option<i64>,
}

/// High score kept in `high_score.json`.
#[derive(Debug, Clone)]
pub struct JsonHighScoreStore {
    path: PathBuf,
}

impl JsonHighScoreStore {
    /// Store in the platform data directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self::at(save_path(HIGH_SCORE_FILE)?))
    }

    /// Store at an explicit path (tests, custom data dirs).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> HighScoreRecord {
        load_json_or_default(&self.path)
    }

    /// Remove the stored score.
    pub fn reset(&mut self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl HighScoreStore for JsonHighScoreStore {
    fn load(&self) -> u32 {
        self.record().high_score
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        let record = HighScoreRecord {
            high_score: score,
            set_at: Some(chrono::Utc::now().timestamp()),
        };
        save_json(&self.path, &record)
    }
}

/// Volatile store for tests and hosts without a writable data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub value: u32,
    pub writes: u32,
    pub fail_writes: bool,
}

impl MemoryHighScoreStore {
    pub fn with_value(value: u32) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.value = score;
        self.writes += 1;
        Ok(())
    }
}
