//! Per-frame tick
//!
//! One call per rendered frame. Routes the frame's input to the session
//! according to the current phase, then advances physics, the countdown,
//! and particles - but only while Playing. Paused and terminal phases keep
//! the scene frozen for the renderer.

use glam::Vec2;

use crate::sim::particles;
use crate::sim::pick::{Camera, pick_sphere};
use crate::sim::state::{GamePhase, GameState};

/// Input gathered by the shell for one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause key pressed this frame
    pub pause: bool,
    /// Restart key pressed this frame
    pub restart: bool,
    /// Confirm key pressed this frame (advances past Victory)
    pub confirm: bool,
    /// Click position in window coordinates, if any
    pub click: Option<Vec2>,
}

/// Advance the session by one frame.
///
/// `now_ms` is wall-clock time in milliseconds; only the countdown timer
/// consumes it. Everything else is fixed-step.
pub fn tick(state: &mut GameState, input: &TickInput, camera: &Camera, now_ms: u64) {
    if input.pause {
        state.toggle_pause(now_ms);
    }

    match state.phase {
        GamePhase::Paused => return,
        GamePhase::Victory => {
            if input.confirm {
                state.advance_level(now_ms);
            }
            return;
        }
        GamePhase::Defeat => {
            if input.restart {
                state.restart(now_ms);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    if input.restart {
        state.restart(now_ms);
        return;
    }

    if let Some(pointer) = input.click
        && let Some(index) = pick_sphere(&state.spheres, camera, pointer)
    {
        state.destroy_sphere(index);
    }

    state.update_timer(now_ms);

    let bounds = state.bounds;
    for sphere in &mut state.spheres {
        sphere.update(bounds);
    }

    // fixed intra-tick order: physics, then win/lose checks, then the
    // particle sweep
    state.evaluate();
    particles::update_all(&mut state.particles);
}
