//! Colours, fills and colour ramps.

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// `0xRRGGBB`, fully opaque.
    pub const fn hex(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Same colour with alpha from a unit-interval opacity.
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Linear blend between two colours, `t` in [0, 1].
    pub fn lerp(a: Rgba, b: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
        Rgba::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
    }

    /// Source-over composite of `self` onto an opaque destination.
    pub fn over(self, dst: Rgba) -> Rgba {
        match self.a {
            255 => self,
            0 => dst,
            _ => {
                let t = self.opacity();
                Rgba::lerp(dst, Rgba { a: 255, ..self }, t)
            }
        }
    }

    /// Multiply RGB by a brightness factor.
    pub fn dim(self, factor: f32) -> Rgba {
        let scale = |c: u8| (c as f32 * factor).clamp(0.0, 255.0).round() as u8;
        Rgba::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }
}

/// Direction a ramp varies along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A precomputed linear gradient: one colour per unit step along an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    pub axis: Axis,
    pub colors: Vec<Rgba>,
}

impl ColorRamp {
    /// Sample `stops` (offset, colour) evenly into `len` entries.
    pub fn new(axis: Axis, len: usize, stops: &[(f32, Rgba)]) -> Self {
        let len = len.max(1);
        let colors = (0..len)
            .map(|i| {
                let t = if len == 1 {
                    0.0
                } else {
                    i as f32 / (len - 1) as f32
                };
                sample_stops(stops, t)
            })
            .collect();
        Self { axis, colors }
    }

    /// Colour at a fractional position along the ramp, `t` in [0, 1].
    pub fn at(&self, t: f32) -> Rgba {
        let last = self.colors.len().saturating_sub(1);
        let idx = (t.clamp(0.0, 1.0) * last as f32).round() as usize;
        self.colors.get(idx).copied().unwrap_or(Rgba::TRANSPARENT)
    }
}

fn sample_stops(stops: &[(f32, Rgba)], t: f32) -> Rgba {
    match stops {
        [] => Rgba::TRANSPARENT,
        [(_, only)] => *only,
        _ => {
            for pair in stops.windows(2) {
                let (t0, c0) = pair[0];
                let (t1, c1) = pair[1];
                if t <= t1 {
                    let span = (t1 - t0).max(f32::EPSILON);
                    return Rgba::lerp(c0, c1, (t - t0) / span);
                }
            }
            stops[stops.len() - 1].1
        }
    }
}

/// How a rectangle is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    Ramp(Arc<ColorRamp>),
}

/// Drop shadow applied to subsequent fills until cleared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    pub offset_x: f32,
    pub offset_y: f32,
}
