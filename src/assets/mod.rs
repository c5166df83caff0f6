//! Visual assets: the image type, where images come from, and load gating.

pub mod builtin;
pub mod gate;
pub mod loader;

pub use gate::*;
pub use loader::*;

use crate::core::player::VisualMode;
use crate::render::color::Rgba;
use std::fmt;
use std::path::{Path, PathBuf};

/// Decoded RGBA image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgba>,
}

impl Image {
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Nearest-neighbour sample at normalised coordinates in [0, 1).
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        if self.width == 0 || self.height == 0 {
            return Rgba::TRANSPARENT;
        }
        let x = ((u * self.width as f32) as i64).clamp(0, self.width as i64 - 1) as u32;
        let y = ((v * self.height as f32) as i64).clamp(0, self.height as i64 - 1) as u32;
        self.get(x, y)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Images that ship with the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinAsset {
    Background,
    Player(VisualMode),
}

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetSource {
    Builtin(BuiltinAsset),
    File(PathBuf),
}

impl AssetSource {
    pub fn file(path: impl AsRef<Path>) -> Self {
        AssetSource::File(path.as_ref().to_path_buf())
    }

    pub fn describe(&self) -> String {
        match self {
            AssetSource::Builtin(BuiltinAsset::Background) => "builtin:background".to_string(),
            AssetSource::Builtin(BuiltinAsset::Player(mode)) => {
                format!("builtin:player-{}", mode.name())
            }
            AssetSource::File(path) => path.display().to_string(),
        }
    }
}

/// Source per player visual mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSources {
    pub resting: AssetSource,
    pub flapping: AssetSource,
    pub defeated: AssetSource,
}

impl SpriteSources {
    pub fn builtin() -> Self {
        Self {
            resting: AssetSource::Builtin(BuiltinAsset::Player(VisualMode::Resting)),
            flapping: AssetSource::Builtin(BuiltinAsset::Player(VisualMode::Flapping)),
            defeated: AssetSource::Builtin(BuiltinAsset::Player(VisualMode::Defeated)),
        }
    }

    pub fn get(&self, mode: VisualMode) -> &AssetSource {
        match mode {
            VisualMode::Resting => &self.resting,
            VisualMode::Flapping => &self.flapping,
            VisualMode::Defeated => &self.defeated,
        }
    }
}

impl Default for SpriteSources {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Which slot an image fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Background,
    Sprite(VisualMode),
}

impl AssetKind {
    pub fn name(&self) -> &'static str {
        match self {
            AssetKind::Background => "background",
            AssetKind::Sprite(mode) => mode.name(),
        }
    }
}

#[derive(Debug)]
pub enum AssetError {
    NotFound(PathBuf),
    Decode { path: PathBuf, message: String },
    Empty(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NotFound(path) => write!(f, "image not found: {}", path.display()),
            AssetError::Decode { path, message } => {
                write!(f, "could not decode {}: {}", path.display(), message)
            }
            AssetError::Empty(source) => write!(f, "image has no pixels: {}", source),
        }
    }
}

impl std::error::Error for AssetError {}

/// Supplies decoded images. Called off the game thread.
pub trait AssetProvider: Send + Sync {
    fn load(&self, source: &AssetSource) -> Result<Image, AssetError>;
}

/// Decodes files with the `image` crate and renders the built-in art.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileAssetProvider;

impl AssetProvider for FileAssetProvider {
    fn load(&self, source: &AssetSource) -> Result<Image, AssetError> {
        let image = match source {
            AssetSource::Builtin(asset) => builtin::render(*asset),
            AssetSource::File(path) => decode_file(path)?,
        };
        if image.is_empty() {
            return Err(AssetError::Empty(source.describe()));
        }
        Ok(image)
    }
}

fn decode_file(path: &Path) -> Result<Image, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let decoded = image::open(path).map_err(|e| AssetError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
        .collect();
    Ok(Image {
        width,
        height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_clamps() {
        let img = Image::from_fn(2, 2, |x, y| Rgba::rgb(x as u8, y as u8, 0));
        assert_eq!(img.sample(0.0, 0.0), Rgba::rgb(0, 0, 0));
        assert_eq!(img.sample(0.99, 0.99), Rgba::rgb(1, 1, 0));
        assert_eq!(img.sample(5.0, -1.0), Rgba::rgb(1, 0, 0));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let provider = FileAssetProvider;
        let err = provider
            .load(&AssetSource::file("/definitely/not/here.png"))
            .unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn test_garbage_file_fails_to_decode() {
        let path = std::env::temp_dir().join(format!("flapper-garbage-{}.png", std::process::id()));
        std::fs::write(&path, b"not a png").unwrap();
        let err = FileAssetProvider.load(&AssetSource::File(path.clone())).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_builtins_load() {
        let provider = FileAssetProvider;
        assert!(provider
            .load(&AssetSource::Builtin(BuiltinAsset::Background))
            .is_ok());
        for mode in VisualMode::ALL {
            let img = provider.load(SpriteSources::builtin().get(mode)).unwrap();
            assert!(!img.is_empty());
        }
    }
}
