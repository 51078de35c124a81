//! Level generator
//!
//! Produces the sphere population for a level as a pure function of the
//! level number; only the initial position/velocity sampling draws from the
//! session RNG. Called at session construction, on reset, and when
//! advancing to the next level - always replacing the whole collection.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::primes::is_prime;
use crate::sim::state::Sphere;

/// Kinematic and population parameters for one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    pub level: u32,
    pub prime_count: u32,
    pub non_prime_count: u32,
    pub speed_multiplier: f32,
    pub prime_radius: f32,
    pub non_prime_radius: f32,
}

/// Compute the population and kinematics for `level`.
///
/// The prime count is clamped to `[0, total]`; the raw formula alone would
/// let the non-prime count go negative for small totals.
pub fn level_params(level: u32, total_spheres: u32) -> LevelParams {
    let decay = PRIME_DECAY.powi(level as i32 - 1);
    let raw_primes = (BASE_PRIME_COUNT * decay).floor() as u32;
    let prime_count = raw_primes.min(total_spheres);

    let growth_steps = level.saturating_sub(1).min(SPEED_CAP_LEVEL - 1);
    LevelParams {
        level,
        prime_count,
        non_prime_count: total_spheres - prime_count,
        speed_multiplier: SPEED_BASE * SPEED_GROWTH.powi(growth_steps as i32),
        prime_radius: PRIME_RADIUS_BASE * decay,
        non_prime_radius: NON_PRIME_RADIUS,
    }
}

/// Spawn a full sphere population for the given parameters.
///
/// Primes come first, labelled with actual prime numbers; non-primes follow
/// with composite labels, so the displayed number always matches the
/// classification the player is judging.
pub fn spawn_spheres(rng: &mut Pcg32, params: &LevelParams, bounds: Vec3) -> Vec<Sphere> {
    let mut spheres = Vec::with_capacity((params.prime_count + params.non_prime_count) as usize);

    let prime_labels = (2u32..).filter(|&n| is_prime(n));
    for label in prime_labels.take(params.prime_count as usize) {
        spheres.push(spawn_one(
            rng,
            label,
            params.prime_radius,
            true,
            params.speed_multiplier,
            bounds,
        ));
    }

    let composite_labels = (4u32..).filter(|&n| !is_prime(n));
    for label in composite_labels.take(params.non_prime_count as usize) {
        spheres.push(spawn_one(
            rng,
            label,
            params.non_prime_radius,
            false,
            params.speed_multiplier,
            bounds,
        ));
    }

    spheres
}

fn spawn_one(
    rng: &mut Pcg32,
    label: u32,
    radius: f32,
    is_prime: bool,
    speed_multiplier: f32,
    bounds: Vec3,
) -> Sphere {
    let position = Vec3::new(
        rng.random_range(-bounds.x..=bounds.x),
        rng.random_range(-bounds.y..=bounds.y),
        rng.random_range(-bounds.z..=bounds.z),
    );
    let spread = VELOCITY_SPREAD * speed_multiplier;
    let velocity = Vec3::new(
        rng.random_range(-spread..=spread),
        rng.random_range(-spread..=spread),
        rng.random_range(-spread..=spread),
    );
    Sphere {
        label,
        radius,
        position,
        velocity,
        is_prime,
        color_phase: 0.0,
        rotation_angle: 0.0,
        rotation_speed: rng.random_range(ROTATION_SPEED_MIN..ROTATION_SPEED_MAX),
        alive: true,
    }
}
