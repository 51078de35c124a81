//! Audio collaborator and music routing
//!
//! The [`AudioBackend`] trait is the seam to whatever mixer the platform
//! provides. [`AudioDirector`] owns the music policy: which track plays in
//! which phase and which one-shot answers each game event. Missing audio
//! files degrade to silence, never to a startup failure.

use log::warn;
use thiserror::Error;

use crate::sim::GameEvent;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio resource not found: {0}")]
    NotFound(String),
    #[error("audio backend failure: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundId(pub u32);

pub trait AudioBackend {
    fn load_track(&mut self, name: &str) -> Result<TrackId, AudioError>;
    fn load_sound(&mut self, name: &str) -> Result<SoundId, AudioError>;
    /// Stop the current music and start `track`.
    fn play(&mut self, track: TrackId, looped: bool);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn play_one_shot(&mut self, sound: SoundId);
}

/// Backend that swallows everything. Used by headless runs and tests.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn load_track(&mut self, name: &str) -> Result<TrackId, AudioError> {
        Err(AudioError::NotFound(name.to_string()))
    }
    fn load_sound(&mut self, name: &str) -> Result<SoundId, AudioError> {
        Err(AudioError::NotFound(name.to_string()))
    }
    fn play(&mut self, _track: TrackId, _looped: bool) {}
    fn stop(&mut self) {}
    fn set_volume(&mut self, _volume: f32) {}
    fn play_one_shot(&mut self, _sound: SoundId) {}
}

/// Event-driven music selection.
///
/// Every handle is optional: a track that failed to load is logged once at
/// startup and skipped thereafter.
#[derive(Debug, Default)]
pub struct AudioDirector {
    gameplay: Option<TrackId>,
    victory: Option<TrackId>,
    defeat: Option<TrackId>,
    menu: Option<TrackId>,
    intro: Option<TrackId>,
    prime_pop: Option<SoundId>,
    non_prime_pop: Option<SoundId>,
}

impl AudioDirector {
    pub fn load(backend: &mut dyn AudioBackend) -> Self {
        AudioDirector {
            gameplay: load_track(backend, "music/gameplay"),
            victory: load_track(backend, "music/victory"),
            defeat: load_track(backend, "music/defeat"),
            menu: load_track(backend, "music/menu"),
            intro: load_track(backend, "music/intro"),
            prime_pop: load_sound(backend, "sfx/prime_pop"),
            non_prime_pop: load_sound(backend, "sfx/non_prime_pop"),
        }
    }

    /// React to one drained game event.
    pub fn handle_event(&self, event: &GameEvent, backend: &mut dyn AudioBackend) {
        match event {
            GameEvent::LevelStarted { .. } => {
                backend.stop();
                backend.set_volume(0.5);
                if let Some(track) = self.gameplay {
                    backend.play(track, true);
                }
            }
            GameEvent::PrimeDestroyed { .. } => {
                if let Some(sound) = self.prime_pop {
                    backend.play_one_shot(sound);
                }
            }
            GameEvent::NonPrimeDestroyed { .. } => {
                if let Some(sound) = self.non_prime_pop {
                    backend.play_one_shot(sound);
                }
            }
            GameEvent::Victory => {
                backend.stop();
                if let Some(track) = self.victory {
                    backend.play(track, true);
                }
            }
            GameEvent::Defeat(_) => {
                backend.stop();
                if let Some(track) = self.defeat {
                    backend.play(track, false);
                }
            }
        }
    }

    /// Menu music, looped. Used by the pre-game screens.
    pub fn play_menu(&self, backend: &mut dyn AudioBackend) {
        backend.stop();
        if let Some(track) = self.menu {
            backend.play(track, true);
        }
    }

    /// Intro splash jingle, played once.
    pub fn play_intro(&self, backend: &mut dyn AudioBackend) {
        backend.stop();
        if let Some(track) = self.intro {
            backend.play(track, false);
        }
    }
}

fn load_track(backend: &mut dyn AudioBackend, name: &str) -> Option<TrackId> {
    match backend.load_track(name) {
        Ok(id) => Some(id),
        Err(err) => {
            warn!("track '{name}' unavailable, continuing silent: {err}");
            None
        }
    }
}

fn load_sound(backend: &mut dyn AudioBackend, name: &str) -> Option<SoundId> {
    match backend.load_sound(name) {
        Ok(id) => Some(id),
        Err(err) => {
            warn!("sound '{name}' unavailable, continuing silent: {err}");
            None
        }
    }
}
