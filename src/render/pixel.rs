//! Software RGBA raster backing the terminal view.
//!
//! Logical surface units are scaled uniformly onto the pixel grid and
//! centred, so a surface whose aspect differs from the terminal is
//! letterboxed. Everything outside the logical area is clipped.

use super::color::{Axis, Fill, Rgba, Shadow};
use super::font;
use super::{ImageFilter, Surface};
use crate::assets::Image;
use crate::core::collision::Bounds;

pub const LETTERBOX: Rgba = Rgba::rgb(8, 8, 12);

#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
    logical_width: f32,
    logical_height: f32,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    shadow: Option<Shadow>,
}

/// Clipped pixel rectangle, half-open on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
}

impl PixelSurface {
    pub fn new(width: usize, height: usize, logical_width: f32, logical_height: f32) -> Self {
        let mut surface = Self {
            width,
            height,
            pixels: vec![LETTERBOX; width * height],
            logical_width,
            logical_height,
            scale: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            shadow: None,
        };
        surface.fit();
        surface
    }

    /// Reallocate for a new pixel grid and logical size.
    pub fn resize(&mut self, width: usize, height: usize, logical_width: f32, logical_height: f32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![LETTERBOX; width * height];
        self.logical_width = logical_width;
        self.logical_height = logical_height;
        self.fit();
    }

    fn fit(&mut self) {
        if self.logical_width <= 0.0 || self.logical_height <= 0.0 {
            self.scale = 0.0;
            return;
        }
        let sx = self.width as f32 / self.logical_width;
        let sy = self.height as f32 / self.logical_height;
        self.scale = sx.min(sy);
        self.offset_x = (self.width as f32 - self.logical_width * self.scale) / 2.0;
        self.offset_y = (self.height as f32 - self.logical_height * self.scale) / 2.0;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels per logical unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn get(&self, x: usize, y: usize) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        self.pixels[y * self.width + x]
    }

    fn content(&self) -> (f32, f32, f32, f32) {
        (
            self.offset_x.round().max(0.0),
            self.offset_y.round().max(0.0),
            (self.offset_x + self.logical_width * self.scale)
                .round()
                .min(self.width as f32),
            (self.offset_y + self.logical_height * self.scale)
                .round()
                .min(self.height as f32),
        )
    }

    fn span(&self, rect: Bounds) -> Option<Span> {
        let (cx0, cy0, cx1, cy1) = self.content();
        let x0 = (self.offset_x + rect.x * self.scale).round().max(cx0);
        let x1 = (self.offset_x + rect.right() * self.scale).round().min(cx1);
        let y0 = (self.offset_y + rect.y * self.scale).round().max(cy0);
        let y1 = (self.offset_y + rect.bottom() * self.scale).round().min(cy1);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some(Span {
            x0: x0 as usize,
            x1: x1 as usize,
            y0: y0 as usize,
            y1: y1 as usize,
        })
    }

    /// Logical coordinates of a pixel's centre.
    fn to_logical(&self, px: usize, py: usize) -> (f32, f32) {
        (
            (px as f32 + 0.5 - self.offset_x) / self.scale,
            (py as f32 + 0.5 - self.offset_y) / self.scale,
        )
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        let idx = y * self.width + x;
        self.pixels[idx] = color.over(self.pixels[idx]);
    }

    fn fill_solid(&mut self, rect: Bounds, color: Rgba) {
        let Some(span) = self.span(rect) else {
            return;
        };
        for y in span.y0..span.y1 {
            for x in span.x0..span.x1 {
                self.blend(x, y, color);
            }
        }
    }

    fn in_content(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let (cx0, cy0, cx1, cy1) = self.content();
        let px = (self.offset_x + x * self.scale).floor();
        let py = (self.offset_y + y * self.scale).floor();
        if px < cx0 || py < cy0 || px >= cx1 || py >= cy1 {
            return None;
        }
        Some((px as usize, py as usize))
    }
}

/// Separable box blur over a `w`x`h` block.
fn box_blur(block: &mut [Rgba], w: usize, h: usize, radius: usize) {
    if radius == 0 || w == 0 || h == 0 {
        return;
    }
    let mut scratch = block.to_vec();
    let average = |samples: &mut dyn Iterator<Item = Rgba>| {
        let (mut r, mut g, mut b, mut a, mut n) = (0u32, 0u32, 0u32, 0u32, 0u32);
        for c in samples {
            r += c.r as u32;
            g += c.g as u32;
            b += c.b as u32;
            a += c.a as u32;
            n += 1;
        }
        let n = n.max(1);
        Rgba::new((r / n) as u8, (g / n) as u8, (b / n) as u8, (a / n) as u8)
    };

    for y in 0..h {
        for x in 0..w {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius + 1).min(w);
            scratch[y * w + x] = average(&mut (lo..hi).map(|i| block[y * w + i]));
        }
    }
    for y in 0..h {
        for x in 0..w {
            let lo = y.saturating_sub(radius);
            let hi = (y + radius + 1).min(h);
            block[y * w + x] = average(&mut (lo..hi).map(|j| scratch[j * w + x]));
        }
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> (f32, f32) {
        (self.logical_width, self.logical_height)
    }

    fn clear(&mut self, color: Rgba) {
        self.pixels.fill(LETTERBOX);
        let (cx0, cy0, cx1, cy1) = self.content();
        for y in cy0 as usize..cy1 as usize {
            for x in cx0 as usize..cx1 as usize {
                self.pixels[y * self.width + x] = color;
            }
        }
    }

    fn fill_rect(&mut self, rect: Bounds, fill: &Fill) {
        if let Some(shadow) = self.shadow {
            let offset = Bounds::new(
                rect.x + shadow.offset_x,
                rect.y + shadow.offset_y,
                rect.width,
                rect.height,
            );
            self.fill_solid(offset, shadow.color);
        }

        let ramp = match fill {
            Fill::Solid(color) => {
                self.fill_solid(rect, *color);
                return;
            }
            Fill::Ramp(ramp) => ramp,
        };
        let Some(span) = self.span(rect) else {
            return;
        };
        for y in span.y0..span.y1 {
            for x in span.x0..span.x1 {
                let (lx, ly) = self.to_logical(x, y);
                let t = match ramp.axis {
                    Axis::Horizontal => (lx - rect.x) / rect.width.max(f32::EPSILON),
                    Axis::Vertical => (ly - rect.y) / rect.height.max(f32::EPSILON),
                };
                self.blend(x, y, ramp.at(t));
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        let bounds = Bounds::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0);
        let mut hit = false;
        if let Some(span) = self.span(bounds) {
            for y in span.y0..span.y1 {
                for x in span.x0..span.x1 {
                    let (lx, ly) = self.to_logical(x, y);
                    if (lx - cx).powi(2) + (ly - cy).powi(2) <= radius * radius {
                        self.blend(x, y, color);
                        hit = true;
                    }
                }
            }
        }
        // Sub-pixel circles still mark the pixel under their centre.
        if !hit {
            if let Some((x, y)) = self.in_content(cx, cy) {
                self.blend(x, y, color);
            }
        }
    }

    fn draw_image(&mut self, image: &Image, dest: Bounds, filter: ImageFilter) {
        if image.is_empty() || dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let Some(span) = self.span(dest) else {
            return;
        };
        let w = span.x1 - span.x0;
        let h = span.y1 - span.y0;
        let mut block = Vec::with_capacity(w * h);
        for y in span.y0..span.y1 {
            for x in span.x0..span.x1 {
                let (lx, ly) = self.to_logical(x, y);
                block.push(image.sample((lx - dest.x) / dest.width, (ly - dest.y) / dest.height));
            }
        }

        if let ImageFilter::BlurDim { radius, brightness } = filter {
            let radius_px = (radius * self.scale).round().max(1.0) as usize;
            box_blur(&mut block, w, h, radius_px);
            for c in block.iter_mut() {
                *c = c.dim(brightness);
            }
        }

        for (i, color) in block.into_iter().enumerate() {
            self.blend(span.x0 + i % w, span.y0 + i / w, color);
        }
    }

    fn draw_image_rotated(&mut self, image: &Image, dest: Bounds, angle: f32) {
        if image.is_empty() || dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let (half_w, half_h) = (dest.width / 2.0, dest.height / 2.0);
        let (cx, cy) = (dest.x + half_w, dest.y + half_h);
        let reach = (half_w * half_w + half_h * half_h).sqrt();
        let Some(span) = self.span(Bounds::new(cx - reach, cy - reach, reach * 2.0, reach * 2.0))
        else {
            return;
        };
        let (sin, cos) = angle.sin_cos();
        for y in span.y0..span.y1 {
            for x in span.x0..span.x1 {
                let (lx, ly) = self.to_logical(x, y);
                let (dx, dy) = (lx - cx, ly - cy);
                // Inverse-rotate back into the sprite's frame.
                let sx = dx * cos + dy * sin;
                let sy = -dx * sin + dy * cos;
                let u = (sx + half_w) / dest.width;
                let v = (sy + half_h) / dest.height;
                if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    continue;
                }
                self.blend(x, y, image.sample(u, v));
            }
        }
    }

    fn draw_text(&mut self, text: &str, center_x: f32, top: f32, size: f32, color: Rgba) {
        if self.scale <= 0.0 {
            return;
        }
        // Glyph cells never shrink below one pixel.
        let cell_px = (size / font::GLYPH_HEIGHT as f32 * self.scale).round().max(1.0);
        let cell = cell_px / self.scale;
        let left = center_x - font::text_width(text) as f32 * cell / 2.0;
        for (col, row) in font::lit_cells(text) {
            self.fill_solid(
                Bounds::new(left + col as f32 * cell, top + row as f32 * cell, cell, cell),
                color,
            );
        }
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow;
    }
}
