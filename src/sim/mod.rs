//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, advanced only while the session is Playing
//! - Seeded RNG only (spawn sampling, confetti)
//! - No rendering, audio, or platform dependencies

pub mod level;
pub mod particles;
pub mod pick;
pub mod state;
pub mod tick;

pub use level::{LevelParams, level_params, spawn_spheres};
pub use particles::Particle;
pub use pick::{Camera, pick_sphere};
pub use state::{DefeatReason, GameEvent, GamePhase, GameState, Sphere};
pub use tick::{TickInput, tick};
