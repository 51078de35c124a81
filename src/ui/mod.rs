//! Pre-game screens
//!
//! The menu and the paged instructions viewer. Both are plain state
//! machines over [`InputEvent`]; the renderer backend decides how their
//! output actually looks.

use glam::Vec2;
use log::warn;

use crate::assets::names;
use crate::consts::{BLINK_INTERVAL, INTRO_DURATION_MS};
use crate::input::{InputEvent, Key};

/// Timed splash shown before the menu. Any key or click skips it.
#[derive(Debug, Clone, Copy)]
pub struct IntroScreen {
    started_ms: u64,
}

impl IntroScreen {
    pub fn new(now_ms: u64) -> Self {
        IntroScreen { started_ms: now_ms }
    }

    pub fn finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_ms) >= INTRO_DURATION_MS
    }

    /// Returns true when the splash should be dismissed.
    pub fn handle_event(&self, event: &InputEvent) -> bool {
        matches!(
            event,
            InputEvent::KeyDown(_) | InputEvent::MouseButtonDown { .. } | InputEvent::Quit
        )
    }
}

/// Player choice on the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Help,
    Quit,
}

/// Axis-aligned clickable region in window coordinates
#[derive(Debug, Clone, Copy)]
struct Button {
    min: Vec2,
    max: Vec2,
    action: MenuAction,
}

impl Button {
    fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Main menu with a blinking help badge
pub struct MenuScreen {
    frame_count: u64,
    buttons: Vec<Button>,
}

impl MenuScreen {
    /// Lay out the buttons in a vertical column centered in the window.
    pub fn new(display_width: f32, display_height: f32) -> Self {
        let center_x = display_width / 2.0;
        let (w, h, gap) = (220.0, 48.0, 24.0);
        let top = display_height / 2.0 - (3.0 * h + 2.0 * gap) / 2.0;
        let buttons = [MenuAction::Start, MenuAction::Help, MenuAction::Quit]
            .into_iter()
            .enumerate()
            .map(|(i, action)| {
                let y = top + i as f32 * (h + gap);
                Button {
                    min: Vec2::new(center_x - w / 2.0, y),
                    max: Vec2::new(center_x + w / 2.0, y + h),
                    action,
                }
            })
            .collect();
        MenuScreen {
            frame_count: 0,
            buttons,
        }
    }

    /// Called once per frame to drive the blink cycle.
    pub fn update(&mut self) {
        self.frame_count += 1;
    }

    /// Whether the help badge is lit this frame.
    pub fn badge_visible(&self) -> bool {
        (self.frame_count / BLINK_INTERVAL) % 2 == 0
    }

    pub fn handle_event(&self, event: &InputEvent) -> Option<MenuAction> {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => Some(MenuAction::Quit),
            InputEvent::KeyDown(Key::Confirm) => Some(MenuAction::Start),
            InputEvent::MouseButtonDown { x, y } => {
                let p = Vec2::new(*x, *y);
                self.buttons
                    .iter()
                    .find(|b| b.contains(p))
                    .map(|b| b.action)
            }
            InputEvent::KeyDown(_) => None,
        }
    }
}

/// One instructions page: an optional illustration plus its caption
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionPage {
    pub image: Option<String>,
    pub caption: String,
    /// The last page hosts the looping demo animation
    pub animated: bool,
}

/// Paged instructions viewer, navigated with the arrow keys
pub struct InstructionsScreen {
    pub pages: Vec<InstructionPage>,
    index: usize,
}

impl InstructionsScreen {
    pub fn new(pages: Vec<InstructionPage>) -> Self {
        InstructionsScreen { pages, index: 0 }
    }

    pub fn with_default_pages() -> Self {
        Self::new(default_pages())
    }

    pub fn current(&self) -> Option<&InstructionPage> {
        self.pages.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        if self.index + 1 < self.pages.len() {
            self.index += 1;
        } else {
            warn!("already on the last instructions page");
        }
    }

    pub fn prev(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        } else {
            warn!("already on the first instructions page");
        }
    }

    /// Returns true when the player dismissed the screen.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => true,
            InputEvent::KeyDown(Key::Right) => {
                self.next();
                false
            }
            InputEvent::KeyDown(Key::Left) => {
                self.prev();
                false
            }
            _ => false,
        }
    }
}

fn default_pages() -> Vec<InstructionPage> {
    let captions = [
        "Numbered spheres drift inside the cube. Click the primes!",
        "A prime is worth +10 points. Popping a composite costs 15.",
        "Clear every prime before the timer runs out to win the level.",
        "Four composites popped, or a score of -40, ends the game.",
    ];
    names::INSTRUCTION_PAGES
        .iter()
        .zip(captions)
        .enumerate()
        .map(|(i, (image, caption))| InstructionPage {
            image: Some((*image).to_string()),
            caption: caption.to_string(),
            animated: i == names::INSTRUCTION_PAGES.len() - 1,
        })
        .collect()
}
