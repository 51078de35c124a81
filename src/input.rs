//! Platform-neutral input events
//!
//! The windowing backend translates its native events into these before
//! handing them to the [`App`](crate::app::App). Keys are already mapped to
//! game actions; the shell never sees raw key codes.

/// Game action bound to a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Toggle pause while in a session
    Pause,
    /// Restart the current level
    Restart,
    /// Dismiss the victory screen and start the next level
    Confirm,
    /// Leave the session / quit
    Escape,
    /// Previous instructions page
    Left,
    /// Next instructions page
    Right,
}

/// One input event delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close request
    Quit,
    KeyDown(Key),
    /// Left mouse button press in window coordinates (origin top-left)
    MouseButtonDown { x: f32, y: f32 },
}
