//! Primes 3D - a 3D arcade game about popping prime-number spheres
//!
//! Core modules:
//! - `sim`: Deterministic simulation (sphere physics, levels, pick testing, session state)
//! - `render`: Draw-command interface consumed by an external rendering backend
//! - `audio`: Audio collaborator trait and the event-driven music director
//! - `assets`: Logical resource loading with degraded fallback
//! - `ui`: Pre-game menu and instructions screens
//! - `app`: Per-frame shell wiring the session to its collaborators

pub mod app;
pub mod assets;
pub mod audio;
pub mod input;
pub mod primes;
pub mod render;
pub mod sim;
pub mod ui;

pub use app::App;
pub use sim::{GamePhase, GameState};

/// Game configuration constants
///
/// There is no configuration file; every tunable is compiled in.
pub mod consts {
    use glam::Vec3;

    /// Target frame rate; one simulation tick per rendered frame
    pub const FRAME_RATE: u32 = 60;

    /// Half-extents of the axis-aligned play volume
    pub const BOUNDS: Vec3 = Vec3::new(9.0, 6.0, 6.0);

    /// Spheres spawned per level
    pub const TOTAL_SPHERES: u32 = 40;
    /// Level-1 prime population; shrinks 5% per level
    pub const BASE_PRIME_COUNT: f32 = 20.0;
    /// Per-level decay applied to both prime count and prime radius
    pub const PRIME_DECAY: f32 = 0.95;

    /// Speed multiplier base and per-level growth; growth saturates at level 16
    pub const SPEED_BASE: f32 = 0.5;
    pub const SPEED_GROWTH: f32 = 1.30;
    pub const SPEED_CAP_LEVEL: u32 = 16;
    /// Initial per-axis velocity spread, scaled by the speed multiplier
    pub const VELOCITY_SPREAD: f32 = 0.05;

    pub const PRIME_RADIUS_BASE: f32 = 0.70;
    pub const NON_PRIME_RADIUS: f32 = 0.90;

    /// Color cycle advance per tick
    pub const COLOR_PHASE_STEP: f32 = 0.01;
    /// Cosmetic spin speed range, degrees per tick
    pub const ROTATION_SPEED_MIN: f32 = 0.5;
    pub const ROTATION_SPEED_MAX: f32 = 2.0;

    /// Scoring
    pub const PRIME_SCORE: i64 = 10;
    pub const NON_PRIME_PENALTY: i64 = 15;
    /// Loss thresholds
    pub const LOSE_SCORE: i64 = -40;
    pub const MAX_NON_PRIME_DESTROYED: u32 = 4;

    /// Countdown timer: 90s at level 1, minus 15s per level, floor of 15s
    pub const BASE_TIME_SECS: u32 = 90;
    pub const TIME_DECREMENT_PER_LEVEL: u32 = 15;
    pub const MIN_TIME_SECS: u32 = 15;

    /// Explosion particles on sphere destruction
    pub const PRIME_EXPLOSION_COUNT: usize = 15;
    pub const PRIME_EXPLOSION_LIFESPAN: u32 = 40;
    pub const NON_PRIME_EXPLOSION_COUNT: usize = 7;
    pub const NON_PRIME_EXPLOSION_LIFESPAN: u32 = 20;
    pub const EXPLOSION_VELOCITY_SPREAD: f32 = 0.1;
    /// Victory confetti
    pub const CONFETTI_COUNT: usize = 50;
    pub const CONFETTI_LIFESPAN: u32 = 60;
    pub const CONFETTI_VELOCITY_SPREAD: f32 = 0.05;

    /// Empirical hit-radius inflation so small spheres stay clickable.
    /// Gameplay was tuned around this exact value; do not change it.
    pub const PICK_SCALE_FACTOR: f32 = 40.0;

    /// Sphere color palette
    pub const PRIME_GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const PRIME_ORANGE: Vec3 = Vec3::new(1.0, 0.5, 0.0);
    pub const PRIME_YELLOW: Vec3 = Vec3::new(1.0, 1.0, 0.0);
    pub const NON_PRIME_RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const NON_PRIME_BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    /// Menu help badge blink interval, in frames
    pub const BLINK_INTERVAL: u64 = 30;
    /// Victory animation frame delay
    pub const GIF_FRAME_DELAY_MS: u64 = 100;
    /// Defeat screen decoration
    pub const SAD_FACE_COUNT: usize = 30;
    pub const SAD_FACE_MIN_SIZE: f32 = 10.0;
    pub const SAD_FACE_MAX_SIZE: f32 = 20.0;
    /// Intro splash duration
    pub const INTRO_DURATION_MS: u64 = 3000;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(mut angle: f32) -> f32 {
    while angle >= 360.0 {
        angle -= 360.0;
    }
    while angle < 0.0 {
        angle += 360.0;
    }
    angle
}

/// Wrap a cyclic phase parameter to [0, 1)
#[inline]
pub fn wrap_phase(mut t: f32) -> f32 {
    while t >= 1.0 {
        t -= 1.0;
    }
    while t < 0.0 {
        t += 1.0;
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert!((wrap_degrees(361.5) - 1.5).abs() < 1e-4);
        assert_eq!(wrap_degrees(-10.0), 350.0);
    }

    #[test]
    fn test_wrap_phase() {
        assert_eq!(wrap_phase(0.25), 0.25);
        assert_eq!(wrap_phase(1.0), 0.0);
        assert!((wrap_phase(1.3) - 0.3).abs() < 1e-6);
    }
}
