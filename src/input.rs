//! Keyboard handling for Enduro.
//!
//! Terminal environments usually only produce key-press events (no
//! key-release), so a steer key stays "held" for `INPUT_HOLD_FRAMES` frames
//! after each press. Terminal key-repeat refreshes the window while the key
//! is held down. Terminals with keyboard enhancement also send release
//! events, which clear the direction immediately.

use crate::enduro::Controls;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Frames a steer key stays active after a press.
pub const INPUT_HOLD_FRAMES: u32 = 12;

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnduroInput {
    SteerLeft,  // Left arrow, a, h
    SteerRight, // Right arrow, d, l
    Quit,       // Esc, q, Ctrl+C
}

/// Map a terminal key to an action. Unmapped keys return `None`.
pub fn map_key(key: &KeyEvent) -> Option<EnduroInput> {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') => {
            Some(EnduroInput::SteerLeft)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') => {
            Some(EnduroInput::SteerRight)
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(EnduroInput::Quit)
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(EnduroInput::Quit),
        _ => None,
    }
}

/// Per-frame keyboard state built from press/release events.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    left_hold_frames: u32,
    right_hold_frames: u32,
    quit: bool,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one terminal key event.
    pub fn handle_key(&mut self, key: &KeyEvent) {
        let Some(input) = map_key(key) else {
            return;
        };

        let pressed = !matches!(key.kind, KeyEventKind::Release);
        let hold = if pressed { INPUT_HOLD_FRAMES } else { 0 };

        match input {
            EnduroInput::SteerLeft => self.left_hold_frames = hold,
            EnduroInput::SteerRight => self.right_hold_frames = hold,
            EnduroInput::Quit => {
                if pressed {
                    self.quit = true;
                }
            }
        }
    }

    /// Controls for the current frame. Decays the hold windows by one frame.
    pub fn sample(&mut self) -> Controls {
        let controls = Controls {
            left: self.left_hold_frames > 0,
            right: self.right_hold_frames > 0,
            quit: self.quit,
        };

        self.left_hold_frames = self.left_hold_frames.saturating_sub(1);
        self.right_hold_frames = self.right_hold_frames.saturating_sub(1);

        controls
    }
}
