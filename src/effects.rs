//! Particle effects driven by frame events
//!
//! Purely cosmetic: nothing here feeds back into the simulation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::sim::{GameEvent, ObstacleTag};

/// Hard cap on live particles
pub const MAX_PARTICLES: usize = 512;

/// What a particle is for, so the renderer can color it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParticleTint {
    Dust,
    Obstacle(ObstacleTag),
    Impact,
}

#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tint: ParticleTint,
    pub size: f32,
    /// Seconds this particle lives
    pub lifetime: f32,
    pub age: f32,
}

impl Particle {
    /// 1.0 when fresh, 0.0 at end of life
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

/// Burst parameters per event type
struct Burst {
    count: usize,
    size: f32,
    lifetime: f32,
    spread: f32,
}

const LANDING: Burst = Burst {
    count: 10,
    size: 3.0,
    lifetime: 0.5,
    spread: 0.5,
};
const PASSED: Burst = Burst {
    count: 5,
    size: 2.0,
    lifetime: 0.3,
    spread: 0.3,
};
const IMPACT: Burst = Burst {
    count: 30,
    size: 5.0,
    lifetime: 1.0,
    spread: 2.0,
};

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    /// Downward pull per 60 Hz frame
    gravity: f32,
}

impl ParticleSystem {
    pub fn new(seed: u64, gravity: f32) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            gravity,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn consume(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Landed { pos } => self.emit(*pos, ParticleTint::Dust, &LANDING),
            GameEvent::ObstaclePassed { tag, center, .. } => {
                self.emit(*center, ParticleTint::Obstacle(*tag), &PASSED)
            }
            GameEvent::Collided { pos, .. } => self.emit(*pos, ParticleTint::Impact, &IMPACT),
            GameEvent::PhaseChanged { .. } => {}
        }
    }

    fn emit(&mut self, pos: Vec2, tint: ParticleTint, burst: &Burst) {
        for _ in 0..burst.count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let vel = Vec2::new(
                self.rng.random_range(-burst.spread..=burst.spread),
                self.rng.random_range(-burst.spread..=burst.spread),
            );
            self.particles.push(Particle {
                pos,
                vel,
                tint,
                size: burst.size,
                lifetime: burst.lifetime,
                age: 0.0,
            });
        }
    }

    /// Velocities are per 60 Hz frame; scale by `dt` so effects run the
    /// same at any frame rate.
    pub fn update(&mut self, dt: f32) {
        let frames = dt * 60.0;
        for p in &mut self.particles {
            p.pos += p.vel * frames;
            p.vel.y += self.gravity * frames;
            p.age += dt;
        }
        self.particles.retain(|p| p.age <= p.lifetime);
    }

    pub fn reset(&mut self) {
        self.particles.clear();
    }
}
