//! Application shell
//!
//! Owns the session plus its collaborators and runs the per-frame loop:
//! gather input, tick the simulation, route drained events to audio and
//! cosmetics, then hand the assembled scene to the renderer. The shell is
//! the only place simulation state meets platform backends.

use std::mem;

use glam::Vec2;
use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::assets::{AssetLoader, SessionAssets};
use crate::audio::{AudioBackend, AudioDirector, AudioError};
use crate::input::{InputEvent, Key};
use crate::render::{self, RenderError, Renderer, SadFace, Scene};
use crate::sim::{Camera, GameEvent, GamePhase, GameState, TickInput, tick};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// The running game: session state wired to its platform collaborators
pub struct App {
    pub state: GameState,
    camera: Camera,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioBackend>,
    director: AudioDirector,
    assets: SessionAssets,
    sad_faces: Vec<SadFace>,
    input: TickInput,
    /// Screen-dressing randomness, independent of the gameplay RNG
    cosmetic_rng: Pcg32,
    display_width: f32,
    display_height: f32,
    running: bool,
}

impl App {
    pub fn new(
        seed: u64,
        display_width: f32,
        display_height: f32,
        renderer: Box<dyn Renderer>,
        mut audio: Box<dyn AudioBackend>,
        loader: &mut dyn AssetLoader,
        now_ms: u64,
    ) -> Self {
        info!("starting session, seed {seed}, display {display_width}x{display_height}");
        let director = AudioDirector::load(audio.as_mut());
        let assets = SessionAssets::load(loader);
        let mut app = App {
            state: GameState::new(seed, now_ms),
            camera: Camera::new(display_width, display_height),
            renderer,
            audio,
            director,
            assets,
            sad_faces: Vec::new(),
            input: TickInput::default(),
            cosmetic_rng: Pcg32::seed_from_u64(seed ^ 0x5eed_face),
            display_width,
            display_height,
            running: true,
        };
        // announce the first level to the audio layer
        app.drain_events(now_ms);
        app
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Accumulate one platform event into the next frame's input.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => self.running = false,
            InputEvent::KeyDown(Key::Pause) => self.input.pause = true,
            InputEvent::KeyDown(Key::Restart) => self.input.restart = true,
            InputEvent::KeyDown(Key::Confirm) => self.input.confirm = true,
            InputEvent::KeyDown(Key::Left) | InputEvent::KeyDown(Key::Right) => {}
            InputEvent::MouseButtonDown { x, y } => self.input.click = Some(Vec2::new(x, y)),
        }
    }

    /// Run one frame: tick, react to events, render.
    pub fn frame(&mut self, now_ms: u64) -> Result<(), AppError> {
        let input = mem::take(&mut self.input);
        tick(&mut self.state, &input, &self.camera, now_ms);
        self.drain_events(now_ms);

        let victory_frame = match self.state.phase {
            GamePhase::Victory => self.assets.victory_animation.advance(now_ms),
            _ => None,
        };

        let scene = Scene {
            state: &self.state,
            hud_lines: render::hud_lines(&self.state),
            timer_text: render::timer_text(&self.state),
            overlay: render::overlay_for(&self.state),
            sad_faces: &self.sad_faces,
            victory_frame,
        };
        self.renderer.render(&scene)?;
        Ok(())
    }

    /// Stop audio and log the final tally.
    pub fn shutdown(&mut self) {
        self.audio.stop();
        info!(
            "session over: level {}, score {}, {} spheres destroyed lifetime",
            self.state.level, self.state.score, self.state.lifetime_spheres_destroyed
        );
    }

    fn drain_events(&mut self, now_ms: u64) {
        for event in self.state.take_events() {
            debug!("game event: {event:?}");
            self.director.handle_event(&event, self.audio.as_mut());
            match event {
                GameEvent::Victory => self.assets.victory_animation.rewind(now_ms),
                GameEvent::Defeat(reason) => {
                    info!("defeat: {reason:?}");
                    self.sad_faces = render::spawn_sad_faces(
                        &mut self.cosmetic_rng,
                        self.display_width,
                        self.display_height,
                    );
                }
                GameEvent::LevelStarted { level, .. } => {
                    self.sad_faces.clear();
                    debug!("level {level} under way");
                }
                GameEvent::PrimeDestroyed { .. } | GameEvent::NonPrimeDestroyed { .. } => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NullAssetLoader;
    use crate::audio::NullAudio;
    use crate::consts::*;
    use crate::render::NullRenderer;

    fn app() -> App {
        App::new(
            7,
            1080.0,
            720.0,
            Box::new(NullRenderer),
            Box::new(NullAudio),
            &mut NullAssetLoader,
            0,
        )
    }

    #[test]
    fn test_frames_run_headless() {
        let mut app = app();
        for i in 1..=120 {
            app.frame(i * 16).expect("null renderer never fails");
        }
        assert!(app.is_running());
        assert_eq!(app.state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_escape_stops_the_app() {
        let mut app = app();
        app.handle_event(InputEvent::Quit);
        assert!(!app.is_running());
    }

    #[test]
    fn test_key_events_feed_the_next_tick() {
        let mut app = app();
        app.handle_event(InputEvent::KeyDown(Key::Pause));
        app.frame(16).expect("null renderer never fails");
        assert_eq!(app.state.phase, GamePhase::Paused);
        // flag was consumed; the next frame stays paused
        app.frame(32).expect("null renderer never fails");
        assert_eq!(app.state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_defeat_dresses_the_screen() {
        let mut app = app();
        app.state.score = LOSE_SCORE;
        app.frame(16).expect("null renderer never fails");
        assert_eq!(app.state.phase, GamePhase::Defeat);
        assert_eq!(app.sad_faces.len(), SAD_FACE_COUNT);

        // restarting clears the decorations
        app.handle_event(InputEvent::KeyDown(Key::Restart));
        app.frame(32).expect("null renderer never fails");
        assert_eq!(app.state.phase, GamePhase::Playing);
        assert!(app.sad_faces.is_empty());
    }
}
