//! Drawing-surface port and the per-frame render stages.
//!
//! The simulation draws through [`Surface`] in logical surface units. The
//! terminal host backs it with a [`pixel::PixelSurface`]; tests use
//! [`recording::RecordingSurface`].

pub mod color;
pub mod font;
pub mod gradient;
pub mod pipeline;
pub mod pixel;
pub mod recording;

use crate::assets::Image;
use crate::core::collision::Bounds;
use color::{Fill, Rgba, Shadow};
use std::fmt;

/// Post-processing applied while drawing an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageFilter {
    None,
    /// Box blur with a radius in surface units, then scale brightness.
    BlurDim { radius: f32, brightness: f32 },
}

/// A 2D drawing surface addressed in logical units.
pub trait Surface {
    /// Logical width and height.
    fn size(&self) -> (f32, f32);
    fn clear(&mut self, color: Rgba);
    fn fill_rect(&mut self, rect: Bounds, fill: &Fill);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba);
    fn draw_image(&mut self, image: &Image, dest: Bounds, filter: ImageFilter);
    /// Draw an image rotated by `angle` radians about the centre of `dest`.
    fn draw_image_rotated(&mut self, image: &Image, dest: Bounds, angle: f32);
    /// Draw text horizontally centred on `center_x` with its top at `top`.
    fn draw_text(&mut self, text: &str, center_x: f32, top: f32, size: f32, color: Rgba);
    /// Shadow applied to subsequent [`Surface::fill_rect`] calls.
    fn set_shadow(&mut self, shadow: Option<Shadow>);
}

/// A stage could not draw this frame. The frame loop logs and skips it.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    MissingImage(&'static str),
    EmptyImage(&'static str),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingImage(what) => write!(f, "{} image is not loaded", what),
            RenderError::EmptyImage(what) => write!(f, "{} image has no pixels", what),
        }
    }
}

impl std::error::Error for RenderError {}
