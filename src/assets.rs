//! Asset loading
//!
//! Resources are addressed by logical name; the [`AssetLoader`] backend maps
//! names to files, archives, or embedded data as it sees fit. Anything
//! decorative that fails to load is logged and skipped so the game still
//! runs on a bare install.

use log::warn;
use thiserror::Error;

use crate::consts::GIF_FRAME_DELAY_MS;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {name}")]
    NotFound { name: String },
    #[error("failed to decode {name}: {reason}")]
    Decode { name: String, reason: String },
}

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub trait AssetLoader {
    fn load_image(&mut self, name: &str) -> Result<ImageData, AssetError>;
    /// Ordered frames of an animation.
    fn load_animation(&mut self, name: &str) -> Result<Vec<ImageData>, AssetError>;
}

/// Logical names for the decorative textures
pub mod names {
    /// Number-cube face textures, one per displayed digit style
    pub const CUBE_FACES: [&str; 5] = [
        "textures/cube_face_1",
        "textures/cube_face_2",
        "textures/cube_face_3",
        "textures/cube_face_4",
        "textures/cube_face_5",
    ];
    pub const VICTORY_ANIMATION: &str = "animations/victory";
    pub const DEFEAT_IMAGE: &str = "textures/defeat";
    pub const INSTRUCTION_PAGES: [&str; 4] = [
        "textures/help_page_1",
        "textures/help_page_2",
        "textures/help_page_3",
        "textures/help_page_4",
    ];
}

/// Frame player for the looping victory animation
#[derive(Debug, Default)]
pub struct VictoryAnimation {
    pub frames: Vec<ImageData>,
    index: usize,
    last_advance_ms: u64,
}

impl VictoryAnimation {
    pub fn new(frames: Vec<ImageData>) -> Self {
        VictoryAnimation {
            frames,
            index: 0,
            last_advance_ms: 0,
        }
    }

    /// Step to the next frame every [`GIF_FRAME_DELAY_MS`], looping.
    /// Returns the current frame index, or `None` when no frames loaded.
    pub fn advance(&mut self, now_ms: u64) -> Option<usize> {
        if self.frames.is_empty() {
            return None;
        }
        if now_ms.saturating_sub(self.last_advance_ms) >= GIF_FRAME_DELAY_MS {
            self.index = (self.index + 1) % self.frames.len();
            self.last_advance_ms = now_ms;
        }
        Some(self.index)
    }

    /// Restart from the first frame.
    pub fn rewind(&mut self, now_ms: u64) {
        self.index = 0;
        self.last_advance_ms = now_ms;
    }
}

/// All decorative assets for one run, each optional
pub struct SessionAssets {
    pub cube_faces: Vec<ImageData>,
    pub defeat_image: Option<ImageData>,
    pub victory_animation: VictoryAnimation,
}

impl SessionAssets {
    pub fn load(loader: &mut dyn AssetLoader) -> Self {
        let cube_faces = names::CUBE_FACES
            .iter()
            .filter_map(|name| load_optional(loader, name))
            .collect();
        let defeat_image = load_optional(loader, names::DEFEAT_IMAGE);
        let victory_frames = match loader.load_animation(names::VICTORY_ANIMATION) {
            Ok(frames) => frames,
            Err(err) => {
                warn!("victory animation unavailable: {err}");
                Vec::new()
            }
        };
        SessionAssets {
            cube_faces,
            defeat_image,
            victory_animation: VictoryAnimation::new(victory_frames),
        }
    }
}

fn load_optional(loader: &mut dyn AssetLoader, name: &str) -> Option<ImageData> {
    match loader.load_image(name) {
        Ok(image) => Some(image),
        Err(err) => {
            warn!("image '{name}' unavailable, continuing without it: {err}");
            None
        }
    }
}

/// Loader with no backing store. Every lookup misses.
#[derive(Debug, Default)]
pub struct NullAssetLoader;

impl AssetLoader for NullAssetLoader {
    fn load_image(&mut self, name: &str) -> Result<ImageData, AssetError> {
        Err(AssetError::NotFound {
            name: name.to_string(),
        })
    }
    fn load_animation(&mut self, name: &str) -> Result<Vec<ImageData>, AssetError> {
        Err(AssetError::NotFound {
            name: name.to_string(),
        })
    }
}
