//! Particle effects
//!
//! Purely cosmetic: explosion bursts when a sphere is destroyed and a
//! confetti shower on victory. Particles never influence scoring, picking,
//! or phase transitions.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// A single short-lived point particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Vec3,
    pub age: u32,
    pub lifespan: u32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.age < self.lifespan
    }

    /// Drift one tick. No gravity, no damping.
    pub fn update(&mut self) {
        self.position += self.velocity;
        self.age += 1;
    }

    /// Render alpha: fades linearly from 1 at birth to 0 at expiry.
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age as f32 / self.lifespan as f32).max(0.0)
    }
}

/// Burst of particles at a destroyed sphere's position.
///
/// Primes get a larger, longer-lived green burst; non-primes a small red one.
pub fn spawn_explosion(rng: &mut Pcg32, origin: Vec3, is_prime: bool, out: &mut Vec<Particle>) {
    let (count, lifespan, color) = if is_prime {
        (PRIME_EXPLOSION_COUNT, PRIME_EXPLOSION_LIFESPAN, PRIME_GREEN)
    } else {
        (
            NON_PRIME_EXPLOSION_COUNT,
            NON_PRIME_EXPLOSION_LIFESPAN,
            NON_PRIME_RED,
        )
    };
    for _ in 0..count {
        out.push(Particle {
            position: origin,
            velocity: random_velocity(rng, EXPLOSION_VELOCITY_SPREAD),
            color,
            age: 0,
            lifespan,
        });
    }
}

/// Victory confetti: randomly colored particles scattered through the volume.
pub fn spawn_confetti(rng: &mut Pcg32, bounds: Vec3, out: &mut Vec<Particle>) {
    for _ in 0..CONFETTI_COUNT {
        let position = Vec3::new(
            rng.random_range(-bounds.x..=bounds.x),
            rng.random_range(-bounds.y..=bounds.y),
            rng.random_range(-bounds.z..=bounds.z),
        );
        let color = Vec3::new(
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
        );
        out.push(Particle {
            position,
            velocity: random_velocity(rng, CONFETTI_VELOCITY_SPREAD),
            color,
            age: 0,
            lifespan: CONFETTI_LIFESPAN,
        });
    }
}

/// Advance every particle one tick and drop the expired ones.
pub fn update_all(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.update();
    }
    particles.retain(Particle::is_alive);
}

fn random_velocity(rng: &mut Pcg32, spread: f32) -> Vec3 {
    Vec3::new(
        rng.random_range(-spread..=spread),
        rng.random_range(-spread..=spread),
        rng.random_range(-spread..=spread),
    )
}
