#![forbid(unsafe_code)]

//! Canonical input events consumed by the comparison slider.
//!
//! Hosts translate their native input (DOM mouse/touch/keyboard events,
//! intersection callbacks, window resizes) into [`InputEvent`] values and hand
//! them to the widget. The widget answers each one with an [`EventOutcome`]
//! that tells the host whether the native default action must be suppressed.
//!
//! # Design Notes
//!
//! - Pointer coordinates are viewport-relative client coordinates in CSS pixels.
//! - Touch input only carries the first touch point.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary press or touch-start on the drag handle.
    PointerDown {
        /// Device that produced the press.
        kind: PointerKind,
        /// Mouse button (always [`MouseButton::Primary`] for touch).
        button: MouseButton,
    },

    /// Pointer or touch movement anywhere on the page.
    PointerMove {
        /// Device that produced the move.
        kind: PointerKind,
        /// Horizontal client coordinate.
        client_x: f64,
    },

    /// Release or touch-end anywhere on the page.
    PointerUp {
        /// Device that produced the release.
        kind: PointerKind,
    },

    /// Click on the wrapper region.
    Click(ClickEvent),

    /// Keydown on the focused handle.
    Key(KeyEvent),

    /// Any user interaction on the container (used to cancel auto-play).
    Interaction(InteractionKind),

    /// The container's visible fraction changed.
    Visibility {
        /// Intersection ratio in `[0, 1]`.
        ratio: f64,
    },

    /// The window was resized.
    Resize,
}

/// Input device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse or pen.
    Mouse,
    /// Touch screen.
    Touch,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Main button (usually left).
    Primary,
    /// Secondary button (usually right).
    Secondary,
    /// Auxiliary button (usually the wheel).
    Auxiliary,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub const fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            _ => Self::Secondary,
        }
    }
}

/// Container-level interaction kinds that cancel the idle sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// Mouse press anywhere in the container.
    Press,
    /// Touch start anywhere in the container.
    TouchStart,
    /// Keydown anywhere in the container.
    KeyDown,
    /// Click anywhere in the container.
    Click,
}

impl InteractionKind {
    /// Whether this interaction begins a new press (and so ends any pending
    /// post-drag click suppression).
    #[must_use]
    pub const fn is_press(self) -> bool {
        matches!(self, Self::Press | Self::TouchStart)
    }
}

/// A click on the wrapper region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// Horizontal client coordinate.
    pub client_x: f64,
    /// Vertical client coordinate.
    pub client_y: f64,
    /// True if the click target was the handle or one of its descendants.
    pub on_handle: bool,
}

impl ClickEvent {
    /// Create a click that did not land on the handle.
    #[must_use]
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            on_handle: false,
        }
    }

    /// Mark the click as originating on the handle.
    #[must_use]
    pub const fn on_handle(mut self) -> Self {
        self.on_handle = true;
        self
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes relevant to the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, including space.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Any other key.
    Other,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "Home" => Self::Home,
            "End" => Self::End,
            "Enter" => Self::Enter,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Self::Char(ch),
                    _ => Self::Other,
                }
            }
        }
    }
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// What the widget did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// The widget changed state in response to the event.
    pub handled: bool,
    /// The host must suppress the native default action.
    pub prevent_default: bool,
}

impl EventOutcome {
    /// The event was not relevant to the widget.
    pub const IGNORED: Self = Self {
        handled: false,
        prevent_default: false,
    };

    /// The event was consumed; native defaults may proceed.
    pub const HANDLED: Self = Self {
        handled: true,
        prevent_default: false,
    };

    /// The event was consumed and its native default must be suppressed.
    pub const CONSUMED: Self = Self {
        handled: true,
        prevent_default: true,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_key_names_map_to_codes() {
        assert_eq!(KeyCode::from_dom_key("ArrowLeft"), KeyCode::Left);
        assert_eq!(KeyCode::from_dom_key("ArrowRight"), KeyCode::Right);
        assert_eq!(KeyCode::from_dom_key("Home"), KeyCode::Home);
        assert_eq!(KeyCode::from_dom_key("End"), KeyCode::End);
        assert_eq!(KeyCode::from_dom_key("Enter"), KeyCode::Enter);
        assert_eq!(KeyCode::from_dom_key(" "), KeyCode::Char(' '));
        assert_eq!(KeyCode::from_dom_key("A"), KeyCode::Char('A'));
    }

    #[test]
    fn unknown_named_keys_are_other() {
        assert_eq!(KeyCode::from_dom_key("Escape"), KeyCode::Other);
        assert_eq!(KeyCode::from_dom_key("ArrowUp"), KeyCode::Other);
        assert_eq!(KeyCode::from_dom_key(""), KeyCode::Other);
    }

    #[test]
    fn key_event_shift() {
        let event = KeyEvent::new(KeyCode::Left).with_modifiers(Modifiers::SHIFT);
        assert!(event.shift());
        assert!(!KeyEvent::new(KeyCode::Left).shift());
    }

    #[test]
    fn key_event_is_char() {
        let event = KeyEvent::new(KeyCode::Char('d'));
        assert!(event.is_char('d'));
        assert!(!event.is_char('D'));
    }

    #[test]
    fn dom_buttons() {
        assert_eq!(MouseButton::from_dom(0), MouseButton::Primary);
        assert_eq!(MouseButton::from_dom(1), MouseButton::Auxiliary);
        assert_eq!(MouseButton::from_dom(2), MouseButton::Secondary);
    }

    #[test]
    fn only_presses_end_click_suppression() {
        assert!(InteractionKind::Press.is_press());
        assert!(InteractionKind::TouchStart.is_press());
        assert!(!InteractionKind::KeyDown.is_press());
        assert!(!InteractionKind::Click.is_press());
    }

    #[test]
    fn click_builder() {
        let click = ClickEvent::new(10.0, 20.0);
        assert!(!click.on_handle);
        assert!(click.on_handle().on_handle);
    }

    #[test]
    fn outcome_constants() {
        assert_eq!(EventOutcome::default(), EventOutcome::IGNORED);
        assert!(EventOutcome::CONSUMED.prevent_default);
        assert!(!EventOutcome::HANDLED.prevent_default);
    }
}
