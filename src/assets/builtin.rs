//! Procedurally drawn default art.
//!
//! Used when no custom image is configured and as the fallback when a
//! custom background fails to load.

use super::{BuiltinAsset, Image};
use crate::core::player::VisualMode;
use crate::render::color::Rgba;

const SKY_TOP: Rgba = Rgba::rgb(70, 180, 200);
const SKY_BOT: Rgba = Rgba::rgb(190, 232, 245);
const HILL_FAR: Rgba = Rgba::rgb(120, 195, 75);
const HILL_NEAR: Rgba = Rgba::rgb(95, 175, 55);
const CLOUD: Rgba = Rgba::rgb(245, 250, 252);

const BIRD_BODY: Rgba = Rgba::rgb(245, 200, 66);
const BIRD_HI: Rgba = Rgba::rgb(255, 225, 100);
const BIRD_WING: Rgba = Rgba::rgb(215, 165, 35);
const BIRD_EYE: Rgba = Rgba::rgb(255, 255, 255);
const BIRD_PUPIL: Rgba = Rgba::rgb(20, 20, 20);
const BIRD_BEAK: Rgba = Rgba::rgb(225, 75, 35);
const BIRD_DEAD: Rgba = Rgba::rgb(170, 160, 140);

const BACKGROUND_WIDTH: u32 = 192;
const BACKGROUND_HEIGHT: u32 = 128;
const SPRITE_WIDTH: u32 = 24;
const SPRITE_HEIGHT: u32 = 18;

pub fn render(asset: BuiltinAsset) -> Image {
    match asset {
        BuiltinAsset::Background => background(),
        BuiltinAsset::Player(mode) => player(mode),
    }
}

fn background() -> Image {
    let h = BACKGROUND_HEIGHT as f32;
    let clouds = [(30.0, 24.0, 9.0), (110.0, 16.0, 7.0), (160.0, 34.0, 8.0)];
    Image::from_fn(BACKGROUND_WIDTH, BACKGROUND_HEIGHT, |x, y| {
        let (fx, fy) = (x as f32, y as f32);

        let near = (fx * 0.06).sin() * 4.0 + (fx * 0.14).sin() * 2.0;
        if fy > h - 14.0 - near {
            return HILL_NEAR;
        }
        let far = (fx * 0.04).sin() * 6.0 + (fx * 0.07).sin() * 3.0;
        if fy > h - 26.0 - far {
            return HILL_FAR;
        }
        let in_cloud = clouds.iter().any(|&(cx, cy, r)| {
            let dx = (fx - cx) / 1.8;
            let dy = fy - cy;
            dx * dx + dy * dy < r * r
        });
        if in_cloud {
            return CLOUD;
        }
        Rgba::lerp(SKY_TOP, SKY_BOT, fy / h)
    })
}

fn player(mode: VisualMode) -> Image {
    let (w, h) = (SPRITE_WIDTH as f32, SPRITE_HEIGHT as f32);
    let body = if mode == VisualMode::Defeated {
        BIRD_DEAD
    } else {
        BIRD_BODY
    };
    // Wing sits high while flapping, low otherwise.
    let wing_y = if mode == VisualMode::Flapping { 5.0 } else { 10.0 };

    Image::from_fn(SPRITE_WIDTH, SPRITE_HEIGHT, |x, y| {
        let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
        let (cx, cy) = (w * 0.45, h * 0.5);
        let (rx, ry) = (w * 0.38, h * 0.42);
        let nx = (fx - cx) / rx;
        let ny = (fy - cy) / ry;
        let in_body = nx * nx + ny * ny <= 1.0;

        // Beak: triangle on the right
        let beak_left = cx + rx - 2.0;
        if fx >= beak_left && fx < w - 0.5 {
            let half = 2.5 * (1.0 - (fx - beak_left) / (w - beak_left));
            if (fy - cy - 1.0).abs() <= half {
                return BIRD_BEAK;
            }
        }

        if !in_body {
            return Rgba::TRANSPARENT;
        }

        // Eye
        let (ex, ey) = (cx + rx * 0.45, cy - ry * 0.35);
        let (dx, dy) = (fx - ex, fy - ey);
        if dx.abs() <= 2.5 && dy.abs() <= 2.5 {
            if mode == VisualMode::Defeated {
                // Crossed-out eye
                return if (dx.abs() - dy.abs()).abs() < 0.8 {
                    BIRD_PUPIL
                } else {
                    BIRD_EYE
                };
            }
            return if dx > 0.5 && dy.abs() < 1.5 {
                BIRD_PUPIL
            } else {
                BIRD_EYE
            };
        }

        // Wing
        let wx = (fx - (cx - rx * 0.35)) / (rx * 0.5);
        let wy = (fy - wing_y) / 2.5;
        if wx * wx + wy * wy <= 1.0 {
            return BIRD_WING;
        }

        if ny < -0.55 && mode != VisualMode::Defeated {
            return BIRD_HI;
        }
        body
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_opaque() {
        let img = render(BuiltinAsset::Background);
        assert_eq!(img.width, BACKGROUND_WIDTH);
        assert!(img.pixels.iter().all(|p| p.a == 255));
    }

    #[test]
    fn test_sprite_has_transparent_corners() {
        let img = render(BuiltinAsset::Player(VisualMode::Resting));
        assert_eq!(img.get(0, 0).a, 0);
        assert_eq!(img.get(0, SPRITE_HEIGHT - 1).a, 0);
        // Centre of the body is solid
        assert_eq!(img.get(SPRITE_WIDTH / 3, SPRITE_HEIGHT / 2 + 3).a, 255);
    }

    #[test]
    fn test_sprite_variants_differ() {
        let resting = render(BuiltinAsset::Player(VisualMode::Resting));
        let flapping = render(BuiltinAsset::Player(VisualMode::Flapping));
        let defeated = render(BuiltinAsset::Player(VisualMode::Defeated));
        assert_ne!(resting, flapping);
        assert_ne!(resting, defeated);
    }
}
