#![forbid(unsafe_code)]

//! Keyboard map for the focused handle.
//!
//! | Key                    | Action                         |
//! |------------------------|--------------------------------|
//! | Left, `a`, `A`         | step back (fine with Shift)    |
//! | Right, `d`, `D`        | step forward (fine with Shift) |
//! | Home                   | smooth jump to 1               |
//! | End                    | smooth jump to 99              |
//! | Space, Enter           | smooth jump to 50              |
//!
//! Anything else maps to `None` and must not be prevented.

use juxta_core::config::SliderConfig;
use juxta_core::event::{KeyCode, KeyEvent};
use juxta_core::geometry::{POSITION_MAX, POSITION_MIN};

/// Centre position restored by Space and Enter.
pub const RESET_POSITION: f64 = 50.0;

/// What a handled key does to the position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// Move by a signed delta, applied immediately.
    Step(f64),
    /// Animate to an absolute position.
    Jump(f64),
}

/// Map a key event to a slider action.
#[must_use]
pub fn key_action(key: &KeyEvent, config: &SliderConfig) -> Option<KeyAction> {
    let step = if key.shift() {
        config.key_fine_step
    } else {
        config.key_step
    };
    match key.code {
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(KeyAction::Step(-step)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(KeyAction::Step(step)),
        KeyCode::Home => Some(KeyAction::Jump(POSITION_MIN)),
        KeyCode::End => Some(KeyAction::Jump(POSITION_MAX)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(KeyAction::Jump(RESET_POSITION)),
        _ => None,
    }
}
