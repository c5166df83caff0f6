//! Cosmetic particles and flap puffs.
//!
//! Nothing here feeds back into the simulation. The whole subsystem is
//! skipped when the resolved config disables effects.

use super::constants::*;
use rand::Rng;

/// Event that triggered a particle burst. Decides colour and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Score,
    Collision,
    Flap,
}

impl ParticleKind {
    pub fn size(&self) -> f32 {
        match self {
            ParticleKind::Score => 4.0,
            ParticleKind::Collision => 3.0,
            ParticleKind::Flap => 2.0,
        }
    }

    pub fn burst(&self) -> usize {
        match self {
            ParticleKind::Score => SCORE_BURST,
            ParticleKind::Collision => COLLISION_BURST,
            ParticleKind::Flap => FLAP_BURST,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining lifetime in (0, 1]; also the draw alpha.
    pub life: f32,
    pub kind: ParticleKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloudPuff {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
}

impl CloudPuff {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            size: PUFF_START_SIZE,
            opacity: PUFF_START_OPACITY,
        }
    }

    /// Bubble layout approximating a cloud: (dx, dy, radius) per circle.
    pub fn bubbles(&self) -> [(f32, f32, f32); 9] {
        let s = self.size;
        [
            (0.0, 0.0, s),
            (-s / 2.0, 0.0, s * 0.7),
            (s / 2.0, 0.0, s * 0.7),
            (0.0, -s / 3.0, s * 0.6),
            (0.0, s / 3.0, s * 0.6),
            (-s / 1.5, -s / 4.0, s * 0.4),
            (s / 1.5, -s / 4.0, s * 0.4),
            (-s / 3.0, s / 2.0, s * 0.3),
            (s / 3.0, s / 2.0, s * 0.3),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub puffs: Vec<CloudPuff>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a burst of particles at a point with random velocities.
    pub fn emit<R: Rng>(&mut self, kind: ParticleKind, x: f32, y: f32, rng: &mut R) {
        self.emit_count(kind, x, y, kind.burst(), rng);
    }

    pub fn emit_count<R: Rng>(
        &mut self,
        kind: ParticleKind,
        x: f32,
        y: f32,
        count: usize,
        rng: &mut R,
    ) {
        self.particles.extend((0..count).map(|_| Particle {
            x,
            y,
            vx: rng.gen_range(-PARTICLE_SPEED_RANGE..PARTICLE_SPEED_RANGE),
            vy: rng.gen_range(-PARTICLE_SPEED_RANGE..PARTICLE_SPEED_RANGE),
            life: 1.0,
            kind,
        }));
    }

    pub fn puff(&mut self, x: f32, y: f32) {
        self.puffs.push(CloudPuff::new(x, y));
    }

    /// Advance everything one tick and drop what has expired.
    pub fn update(&mut self) {
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.life -= PARTICLE_LIFE_STEP;
            p.life > 0.0
        });
        self.puffs.retain_mut(|puff| {
            puff.size += PUFF_EXPAND_SPEED;
            puff.opacity -= PUFF_FADE_SPEED;
            puff.opacity > 0.0
        });
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.puffs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.puffs.is_empty()
    }
}
