//! Rendering interface
//!
//! The simulation never draws. Each frame the shell assembles a [`Scene`]
//! describing everything visible and hands it to whichever [`Renderer`]
//! backend the platform wired in. Backends own windows, GPU state, fonts
//! and texture uploads; this module only defines the contract and the
//! screen-space dressing (HUD text, timer, defeat decorations).

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::consts::*;
use crate::sim::{GamePhase, GameState};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("lost rendering surface: {0}")]
    SurfaceLost(String),
    #[error("render backend failure: {0}")]
    Backend(String),
}

/// Full-screen state banner drawn over the 3D scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Paused,
    Victory,
    Defeat,
}

/// A sad-face decoration on the defeat screen, in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SadFace {
    pub position: Vec2,
    pub size: f32,
}

/// Everything a backend needs to draw one frame
pub struct Scene<'a> {
    pub state: &'a GameState,
    pub hud_lines: Vec<String>,
    /// Countdown display; hidden on terminal screens
    pub timer_text: Option<String>,
    pub overlay: Overlay,
    /// Populated only while the defeat overlay is up
    pub sad_faces: &'a [SadFace],
    /// Current victory-animation frame, if one is loaded and playing
    pub victory_frame: Option<usize>,
}

pub trait Renderer {
    fn render(&mut self, scene: &Scene<'_>) -> Result<(), RenderError>;
}

/// Backend that draws nothing. Used by headless runs and tests.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _scene: &Scene<'_>) -> Result<(), RenderError> {
        Ok(())
    }
}

/// HUD text block for the top-left corner.
pub fn hud_lines(state: &GameState) -> Vec<String> {
    vec![
        format!("Level: {}", state.level),
        format!("Score: {}", state.score),
        format!("Spheres remaining: {}", state.spheres.len()),
        format!("Primes hit: {}", state.hit_primes.len()),
        format!("Eliminated: {}", state.eliminated_spheres),
        "'P' pause - 'R' restart - 'ESC' quit".to_string(),
    ]
}

/// Countdown as MM:SS.
pub fn format_timer(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Timer display for the current phase; terminal screens drop it.
pub fn timer_text(state: &GameState) -> Option<String> {
    match state.phase {
        GamePhase::Playing | GamePhase::Paused => Some(format_timer(state.remaining_time)),
        GamePhase::Victory | GamePhase::Defeat => None,
    }
}

/// Overlay for the current phase.
pub fn overlay_for(state: &GameState) -> Overlay {
    match state.phase {
        GamePhase::Playing => Overlay::None,
        GamePhase::Paused => Overlay::Paused,
        GamePhase::Victory => Overlay::Victory,
        GamePhase::Defeat => Overlay::Defeat,
    }
}

/// Scatter sad faces across the window for the defeat screen.
pub fn spawn_sad_faces(rng: &mut Pcg32, width: f32, height: f32) -> Vec<SadFace> {
    (0..SAD_FACE_COUNT)
        .map(|_| SadFace {
            position: Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height)),
            size: rng.random_range(SAD_FACE_MIN_SIZE..SAD_FACE_MAX_SIZE),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_format_timer() {
        assert_eq!(format_timer(90), "01:30");
        assert_eq!(format_timer(5), "00:05");
        assert_eq!(format_timer(0), "00:00");
        assert_eq!(format_timer(600), "10:00");
    }

    #[test]
    fn test_hud_reflects_session() {
        let state = GameState::new(1, 0);
        let lines = hud_lines(&state);
        assert_eq!(lines[0], "Level: 1");
        assert_eq!(lines[1], "Score: 0");
        assert_eq!(lines[2], "Spheres remaining: 40");
    }

    #[test]
    fn test_timer_hidden_on_terminal_screens() {
        let mut state = GameState::new(1, 0);
        assert_eq!(timer_text(&state), Some("01:30".to_string()));
        state.phase = GamePhase::Victory;
        assert_eq!(timer_text(&state), None);
        state.phase = GamePhase::Defeat;
        assert_eq!(timer_text(&state), None);
    }

    #[test]
    fn test_overlay_tracks_phase() {
        let mut state = GameState::new(1, 0);
        assert_eq!(overlay_for(&state), Overlay::None);
        state.phase = GamePhase::Paused;
        assert_eq!(overlay_for(&state), Overlay::Paused);
    }

    #[test]
    fn test_sad_faces_within_window() {
        let mut rng = Pcg32::seed_from_u64(9);
        let faces = spawn_sad_faces(&mut rng, 1080.0, 720.0);
        assert_eq!(faces.len(), SAD_FACE_COUNT);
        for f in &faces {
            assert!(f.position.x >= 0.0 && f.position.x <= 1080.0);
            assert!(f.position.y >= 0.0 && f.position.y <= 720.0);
            assert!(f.size >= SAD_FACE_MIN_SIZE && f.size < SAD_FACE_MAX_SIZE);
        }
    }
}
