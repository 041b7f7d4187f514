//! Success burst particles
//!
//! Visual-only entities: bursts celebrate a passed gate and never feed back
//! into judgement or scoring.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::sim::state::{GameColor, Particle};

/// Emit a radial burst: directions evenly spread over the circle, speeds
/// drawn uniformly from [2, 5).
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    color: GameColor,
    count: usize,
    rng: &mut impl Rng,
) {
    for i in 0..count {
        let angle = TAU * i as f32 / count as f32;
        let speed = rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: PARTICLE_LIFE_TICKS,
            color,
        });
    }
}

/// Advance all particles one tick and drop the expired ones
pub fn integrate(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life = p.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}
