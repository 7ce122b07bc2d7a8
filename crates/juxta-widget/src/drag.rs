#![forbid(unsafe_code)]

//! Drag session bookkeeping and post-drag click suppression.

use juxta_core::event::{MouseButton, PointerKind};

/// An active press→move→release session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Device that started the session; selects the momentum profile.
    pub kind: PointerKind,
}

impl DragSession {
    /// Start a session if the press qualifies: any touch, or the primary
    /// mouse button.
    #[must_use]
    pub fn start(kind: PointerKind, button: MouseButton) -> Option<Self> {
        match (kind, button) {
            (PointerKind::Touch, _) | (PointerKind::Mouse, MouseButton::Primary) => {
                Some(Self { kind })
            }
            _ => None,
        }
    }
}

/// Swallows the click the browser synthesizes after a drag release.
///
/// Armed on release, disarmed by the next press. A click that finds the gate
/// armed is consumed and disarms it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickGate {
    armed: bool,
}

impl ClickGate {
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Returns `true` (and disarms) if the click must be suppressed.
    pub fn take(&mut self) -> bool {
        core::mem::take(&mut self.armed)
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_primary_mouse_or_touch_starts() {
        assert!(DragSession::start(PointerKind::Mouse, MouseButton::Primary).is_some());
        assert!(DragSession::start(PointerKind::Mouse, MouseButton::Secondary).is_none());
        assert!(DragSession::start(PointerKind::Mouse, MouseButton::Auxiliary).is_none());
        assert_eq!(
            DragSession::start(PointerKind::Touch, MouseButton::Primary),
            Some(DragSession {
                kind: PointerKind::Touch
            })
        );
    }

    #[test]
    fn gate_consumes_one_click() {
        let mut gate = ClickGate::default();
        assert!(!gate.take());
        gate.arm();
        assert!(gate.is_armed());
        assert!(gate.take());
        assert!(!gate.take());
    }

    #[test]
    fn press_disarms_gate() {
        let mut gate = ClickGate::default();
        gate.arm();
        gate.disarm();
        assert!(!gate.take());
    }
}
