//! Headless demo binary
//!
//! Runs the game loop against null collaborators: no window, no mixer, no
//! asset store. A real build replaces those with platform backends and a
//! proper event pump; everything else is identical. Useful for smoke-testing
//! the simulation at full frame rate.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{error, info, warn};

use primes3d::app::{App, AppError};
use primes3d::assets::NullAssetLoader;
use primes3d::audio::NullAudio;
use primes3d::consts::FRAME_RATE;
use primes3d::input::{InputEvent, Key};
use primes3d::render::NullRenderer;
use primes3d::ui::{IntroScreen, MenuAction, MenuScreen};

const DISPLAY_WIDTH: f32 = 1080.0;
const DISPLAY_HEIGHT: f32 = 720.0;
/// Headless runs stop after ten seconds of play
const SMOKE_FRAMES: u64 = FRAME_RATE as u64 * 10;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        error!("fatal: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let seed = now_ms();
    info!("seed {seed}");

    // with no window there is no player; stand in for one at the splash
    // and the menu
    let intro = IntroScreen::new(now_ms());
    while !intro.finished(now_ms()) {
        thread::sleep(Duration::from_millis(100));
    }
    info!("intro splash done");

    let mut menu = MenuScreen::new(DISPLAY_WIDTH, DISPLAY_HEIGHT);
    menu.update();
    match menu.handle_event(&InputEvent::KeyDown(Key::Confirm)) {
        Some(MenuAction::Start) => info!("menu: starting a session"),
        other => warn!("menu: unexpected action {other:?}, starting anyway"),
    }

    let mut app = App::new(
        seed,
        DISPLAY_WIDTH,
        DISPLAY_HEIGHT,
        Box::new(NullRenderer),
        Box::new(NullAudio),
        &mut NullAssetLoader,
        now_ms(),
    );

    let frame_budget = Duration::from_micros(1_000_000 / FRAME_RATE as u64);
    for _ in 0..SMOKE_FRAMES {
        if !app.is_running() {
            break;
        }
        if let Err(err) = app.frame(now_ms()) {
            // frame-boundary policy: log and carry on with the next frame
            error!("frame failed: {err}");
        }
        thread::sleep(frame_budget);
    }

    info!(
        "smoke run done: level {}, score {}, {} primes left",
        app.state.level,
        app.state.score,
        app.state.primes_remaining()
    );
    app.shutdown();
    Ok(())
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
