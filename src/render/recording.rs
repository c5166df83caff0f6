//! A surface that records draw calls instead of rasterising them.

use super::color::{Fill, Rgba, Shadow};
use super::{ImageFilter, Surface};
use crate::assets::Image;
use crate::core::collision::Bounds;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Rgba),
    Rect {
        rect: Bounds,
        fill: Fill,
        shadow: Option<Shadow>,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Rgba,
    },
    Image {
        dest: Bounds,
        filter: ImageFilter,
        size: (u32, u32),
    },
    RotatedImage {
        dest: Bounds,
        angle: f32,
        size: (u32, u32),
    },
    Text {
        text: String,
        center_x: f32,
        top: f32,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
    shadow: Option<Shadow>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        self.ops.clear();
        self.shadow = None;
    }

    pub fn images(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Image { .. }))
            .collect()
    }

    pub fn rotated_images(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::RotatedImage { .. }))
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
            .count()
    }

    pub fn rects(&self) -> Vec<(&Bounds, &Fill, Option<Shadow>)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { rect, fill, shadow } => Some((rect, fill, *shadow)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Bounds, fill: &Fill) {
        self.ops.push(DrawOp::Rect {
            rect,
            fill: fill.clone(),
            shadow: self.shadow,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        self.ops.push(DrawOp::Circle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn draw_image(&mut self, image: &Image, dest: Bounds, filter: ImageFilter) {
        self.ops.push(DrawOp::Image {
            dest,
            filter,
            size: (image.width, image.height),
        });
    }

    fn draw_image_rotated(&mut self, image: &Image, dest: Bounds, angle: f32) {
        self.ops.push(DrawOp::RotatedImage {
            dest,
            angle,
            size: (image.width, image.height),
        });
    }

    fn draw_text(&mut self, text: &str, center_x: f32, top: f32, _size: f32, _color: Rgba) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            center_x,
            top,
        });
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow;
    }
}
