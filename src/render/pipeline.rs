//! Per-frame draw stages. Each takes the surface and the state it paints;
//! the tick decides the order.

use super::color::{Fill, Rgba, Shadow};
use super::gradient::{GradientCache, BODY_MID};
use super::{ImageFilter, RenderError, Surface};
use crate::assets::Image;
use crate::core::collision::Bounds;
use crate::core::config::GameConfig;
use crate::core::constants::*;
use crate::core::effects::{Effects, ParticleKind};
use crate::core::obstacles::Obstacle;
use crate::core::player::Player;

pub const SKY: Rgba = Rgba::hex(0x70C5CE);
pub const GROUND: Rgba = Rgba::hex(0x996633);
const HIGHLIGHT: Rgba = Rgba::new(255, 255, 255, 26);
const EDGE: Rgba = Rgba::new(0, 0, 0, 26);
const BODY_SHADOW: Rgba = Rgba::new(0, 0, 0, 77);

pub fn particle_color(kind: ParticleKind) -> Rgba {
    match kind {
        ParticleKind::Score => Rgba::hex(0xFFD700),
        ParticleKind::Collision => Rgba::hex(0xFF0000),
        ParticleKind::Flap => Rgba::WHITE,
    }
}

/// Destination that scales an image to cover the surface while keeping its
/// aspect ratio, centred so the overflowing axis is cropped evenly.
pub fn cover_rect(image_width: f32, image_height: f32, width: f32, height: f32) -> Bounds {
    if image_width <= 0.0 || image_height <= 0.0 {
        return Bounds::new(0.0, 0.0, width, height);
    }
    let scale = (width / image_width).max(height / image_height);
    let w = image_width * scale;
    let h = image_height * scale;
    Bounds::new((width - w) / 2.0, (height - h) / 2.0, w, h)
}

/// Backdrop, then the cover-cropped background. The blurred backdrop is
/// only drawn when the config allows it.
pub fn draw_background(
    surface: &mut dyn Surface,
    image: Option<&Image>,
    config: &GameConfig,
) -> Result<(), RenderError> {
    surface.clear(SKY);
    let image = image.ok_or(RenderError::MissingImage("background"))?;
    if image.is_empty() {
        return Err(RenderError::EmptyImage("background"));
    }
    let (width, height) = surface.size();
    if config.features.backdrop_blur {
        surface.draw_image(
            image,
            Bounds::new(0.0, 0.0, width, height),
            ImageFilter::BlurDim {
                radius: BACKDROP_BLUR_RADIUS,
                brightness: BACKDROP_BRIGHTNESS,
            },
        );
    }
    let dest = cover_rect(image.width as f32, image.height as f32, width, height);
    surface.draw_image(image, dest, ImageFilter::None);
    Ok(())
}

pub fn draw_ground(surface: &mut dyn Surface, config: &GameConfig) {
    let (width, _) = surface.size();
    surface.fill_rect(
        Bounds::new(0.0, config.ground_y(), width, config.ground_height),
        &Fill::Solid(GROUND),
    );
}

/// Both segments of one obstacle: shadowed body, cap at the gap-facing end,
/// then the highlight and edge strips.
pub fn draw_obstacle(
    surface: &mut dyn Surface,
    obstacle: &Obstacle,
    config: &GameConfig,
    cache: &mut GradientCache,
) {
    let body = match obstacle.gradient {
        Some(key) => Fill::Ramp(cache.body(key)),
        None => Fill::Solid(BODY_MID),
    };
    let cap = Fill::Ramp(cache.cap());
    let x = obstacle.x;
    let w = obstacle.width as f32;
    let bottom_y = obstacle.bottom_top();

    let segments = [
        (
            Bounds::new(x, 0.0, w, obstacle.top_height),
            obstacle.top_height - CAP_HEIGHT,
        ),
        (
            Bounds::new(x, bottom_y, w, (config.ground_y() - bottom_y).max(0.0)),
            bottom_y,
        ),
    ];
    for (segment, cap_y) in segments {
        if config.features.shadows {
            surface.set_shadow(Some(Shadow {
                color: BODY_SHADOW,
                offset_x: SHADOW_OFFSET,
                offset_y: SHADOW_OFFSET,
            }));
        }
        surface.fill_rect(segment, &body);
        surface.set_shadow(None);

        surface.fill_rect(
            Bounds::new(x - CAP_OVERHANG, cap_y, w + CAP_OVERHANG * 2.0, CAP_HEIGHT),
            &cap,
        );
        surface.fill_rect(
            Bounds::new(x, segment.y, STRIP_WIDTH, segment.height),
            &Fill::Solid(HIGHLIGHT),
        );
        surface.fill_rect(
            Bounds::new(x + w - STRIP_WIDTH, segment.y, STRIP_WIDTH, segment.height),
            &Fill::Solid(EDGE),
        );
    }
}

/// Player sprite for its current mode, rotated about its centre.
pub fn draw_player(
    surface: &mut dyn Surface,
    player: &Player,
    sprite: Option<&Image>,
) -> Result<(), RenderError> {
    let sprite = sprite.ok_or(RenderError::MissingImage("player"))?;
    if sprite.is_empty() {
        return Err(RenderError::EmptyImage("player"));
    }
    surface.draw_image_rotated(sprite, player.bounds(), player.rotation());
    Ok(())
}

pub fn draw_hud(surface: &mut dyn Surface, score: u32) {
    let (width, _) = surface.size();
    surface.draw_text(
        &score.to_string(),
        width / 2.0,
        HUD_SCORE_Y - HUD_SCORE_SIZE,
        HUD_SCORE_SIZE,
        Rgba::WHITE,
    );
}

pub fn draw_effects(surface: &mut dyn Surface, effects: &Effects) {
    for puff in &effects.puffs {
        let color = Rgba::WHITE.with_opacity(puff.opacity);
        for (dx, dy, radius) in puff.bubbles() {
            surface.fill_circle(puff.x + dx, puff.y + dy, radius, color);
        }
    }
    for particle in &effects.particles {
        surface.fill_circle(
            particle.x,
            particle.y,
            particle.kind.size(),
            particle_color(particle.kind).with_opacity(particle.life),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DeviceClass, Viewport};
    use crate::core::obstacles::GradientKey;
    use crate::render::recording::{DrawOp, RecordingSurface};

    fn full() -> GameConfig {
        GameConfig::resolve(DeviceClass::Full, Viewport::new(160, 80))
    }

    fn constrained() -> GameConfig {
        GameConfig::resolve(DeviceClass::Constrained, Viewport::new(60, 40))
    }

    fn obstacle(gradient: Option<GradientKey>) -> Obstacle {
        Obstacle {
            x: 100.0,
            top_height: 200.0,
            gap: 160.0,
            width: 64,
            speed: 3.0,
            passed: false,
            gradient,
        }
    }

    #[test]
    fn test_cover_rect_crops_wider_image() {
        let r = cover_rect(200.0, 100.0, 100.0, 100.0);
        assert_eq!(r, Bounds::new(-50.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_cover_rect_crops_taller_image() {
        let r = cover_rect(100.0, 400.0, 200.0, 100.0);
        assert_eq!(r.width, 200.0);
        assert_eq!(r.height, 800.0);
        assert_eq!(r.y, -350.0);
    }

    #[test]
    fn test_full_background_has_backdrop() {
        let config = full();
        let mut s = RecordingSurface::new(config.surface_width, config.surface_height);
        let img = Image::new(4, 4, Rgba::WHITE);
        draw_background(&mut s, Some(&img), &config).unwrap();
        let images = s.images();
        assert_eq!(images.len(), 2);
        assert!(matches!(
            images[0],
            DrawOp::Image {
                filter: ImageFilter::BlurDim { .. },
                ..
            }
        ));
        assert!(matches!(
            images[1],
            DrawOp::Image {
                filter: ImageFilter::None,
                ..
            }
        ));
    }

    #[test]
    fn test_constrained_background_skips_backdrop() {
        let config = constrained();
        let mut s = RecordingSurface::new(config.surface_width, config.surface_height);
        let img = Image::new(4, 4, Rgba::WHITE);
        draw_background(&mut s, Some(&img), &config).unwrap();
        assert_eq!(s.images().len(), 1);
    }

    #[test]
    fn test_missing_background_is_error() {
        let config = full();
        let mut s = RecordingSurface::new(config.surface_width, config.surface_height);
        assert_eq!(
            draw_background(&mut s, None, &config),
            Err(RenderError::MissingImage("background"))
        );
    }

    #[test]
    fn test_obstacle_shadow_only_on_body() {
        let config = full();
        let mut s = RecordingSurface::new(config.surface_width, config.surface_height);
        let mut cache = GradientCache::new();
        draw_obstacle(&mut s, &obstacle(Some(GradientKey(64))), &config, &mut cache);

        let rects = s.rects();
        // body, cap, highlight, edge for each segment
        assert_eq!(rects.len(), 8);
        let shadowed: Vec<_> = rects.iter().filter(|(_, _, sh)| sh.is_some()).collect();
        assert_eq!(shadowed.len(), 2);
        assert_eq!(*shadowed[0].0, Bounds::new(100.0, 0.0, 64.0, 200.0));
        assert_eq!(
            *shadowed[1].0,
            Bounds::new(100.0, 360.0, 64.0, config.ground_y() - 360.0)
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_caps_face_gap() {
        let config = full();
        let mut s = RecordingSurface::new(config.surface_width, config.surface_height);
        let mut cache = GradientCache::new();
        draw_obstacle(&mut s, &obstacle(None), &config, &mut cache);
        let rects = s.rects();
        assert_eq!(*rects[1].0, Bounds::new(95.0, 175.0, 74.0, 25.0));
        assert_eq!(*rects[5].0, Bounds::new(95.0, 360.0, 74.0, 25.0));
    }

    #[test]
    fn test_flat_body_without_gradient() {
        let config = constrained();
        let mut s = RecordingSurface::new(config.surface_width, config.surface_height);
        let mut cache = GradientCache::new();
        draw_obstacle(&mut s, &obstacle(None), &config, &mut cache);
        assert_eq!(s.rects()[0].1, &Fill::Solid(BODY_MID));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_player_rotation_clamped() {
        let config = full();
        let mut player = Player::new(&config);
        player.velocity = 20.0;
        let mut s = RecordingSurface::new(config.surface_width, config.surface_height);
        let sprite = Image::new(2, 2, Rgba::WHITE);
        draw_player(&mut s, &player, Some(&sprite)).unwrap();
        match s.rotated_images()[0] {
            DrawOp::RotatedImage { angle, dest, .. } => {
                assert_eq!(*angle, 0.5);
                assert_eq!(*dest, player.bounds());
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_player_without_sprite_errors() {
        let config = full();
        let player = Player::new(&config);
        let mut s = RecordingSurface::new(config.surface_width, config.surface_height);
        assert!(draw_player(&mut s, &player, None).is_err());
        assert!(s.ops.is_empty());
    }

    #[test]
    fn test_hud_centred() {
        let mut s = RecordingSurface::new(300.0, 640.0);
        draw_hud(&mut s, 42);
        assert_eq!(
            s.ops,
            vec![DrawOp::Text {
                text: "42".to_string(),
                center_x: 150.0,
                top: 20.0,
            }]
        );
    }

    #[test]
    fn test_effects_draw_nine_bubbles_per_puff() {
        let mut effects = Effects::new();
        effects.puff(10.0, 10.0);
        let mut s = RecordingSurface::new(100.0, 100.0);
        draw_effects(&mut s, &effects);
        assert_eq!(s.circles(), 9);
    }
}
