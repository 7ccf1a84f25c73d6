//! Blood particles.
//!
//! Purely cosmetic. The simulation spawns and ages them each step so a
//! renderer can draw whatever is alive; nothing in combat reads them back.

use serde::{Deserialize, Serialize};

use crate::combat::BloodBurst;

/// Dark red, fully opaque.
pub const BLOOD_COLOR: [f32; 4] = [0.667, 0.0, 0.0, 1.0];

/// Largest per-axis launch speed, in px per tick.
const MAX_SPEED: f32 = 7.5;
/// Minimum life in ticks.
const MIN_LIFE: f32 = 20.0;
/// Extra random life in ticks.
const LIFE_SPREAD: f32 = 20.0;
/// Minimum size in px.
const MIN_SIZE: f32 = 3.0;
/// Extra random size in px.
const SIZE_SPREAD: f32 = 6.0;

/// A single particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// X velocity.
    pub vx: f32,
    /// Y velocity, positive is down.
    pub vy: f32,
    /// Ticks left.
    pub life: f32,
    /// RGBA.
    pub color: [f32; 4],
    /// Edge length in px.
    pub size: f32,
}

impl Particle {
    /// Whether the particle should still be drawn.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Owns every live particle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    gravity: f32,
}

impl ParticleSystem {
    /// Create an empty system.
    #[must_use]
    pub fn new(gravity: f32) -> Self {
        Self {
            particles: Vec::new(),
            gravity,
        }
    }

    /// Spray `burst.count` particles from the burst origin.
    pub fn spawn_burst(&mut self, burst: BloodBurst, rng: &mut fastrand::Rng) {
        self.particles.reserve(burst.count as usize);
        for _ in 0..burst.count {
            self.particles.push(Particle {
                x: burst.x,
                y: burst.y,
                vx: (rng.f32() - 0.5) * 2.0 * MAX_SPEED,
                vy: (rng.f32() - 0.5) * 2.0 * MAX_SPEED,
                life: MIN_LIFE + rng.f32() * LIFE_SPREAD,
                color: BLOOD_COLOR,
                size: MIN_SIZE + rng.f32() * SIZE_SPREAD,
            });
        }
    }

    /// Move, pull down and age every particle; drop the dead ones.
    pub fn update(&mut self) {
        let gravity = self.gravity;
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += gravity;
            p.life -= 1.0;
        }
        self.particles.retain(Particle::is_alive);
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Live particles.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Live particles as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if nothing is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
