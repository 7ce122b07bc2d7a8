#![forbid(unsafe_code)]
#![doc = "Backend traits for juxta: platform abstraction for time, frames, timers, and output."]
#![doc = ""]
#![doc = "This crate defines the boundary between the slider state machine and"]
#![doc = "platform-specific hosts (the browser via `juxta-web`, the deterministic"]
#![doc = "[`headless::HeadlessBackend`] in tests)."]

pub mod headless;

use core::time::Duration;

use juxta_core::geometry::WrapperRect;
use juxta_core::handle::{FrameHandle, RippleId, TimerHandle, TimerKind};
use juxta_core::visual::{AccessibilityAttributes, Ripple, VisualFrame};

/// Monotonic clock abstraction.
///
/// The browser backend reads `performance.now()`; the headless backend is
/// advanced explicitly. The widget never reads wall-clock time directly.
pub trait SliderClock {
    /// Returns elapsed time since an unspecified epoch, monotonically increasing.
    fn now_mono(&self) -> Duration;
}

/// Rendering-frame scheduler.
///
/// The widget keeps at most one frame outstanding: it cancels its previous
/// handle before scheduling a new one.
pub trait AnimationDriver {
    /// Request one callback on the next rendering frame.
    fn schedule_frame(&mut self) -> FrameHandle;

    /// Cancel a pending frame. Cancelling a fired or unknown handle is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// One-shot timer scheduler.
pub trait TimerDriver {
    /// Start a timer that reports `kind` back to the widget after `delay`.
    fn start_timer(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle;

    /// Cancel a pending timer. Cancelling a fired or unknown handle is a no-op.
    fn cancel_timer(&mut self, handle: TimerHandle);
}

/// Presentation surface: everything the widget writes, plus the two layout
/// facts it reads back.
pub trait SliderSurface {
    /// Current bounding box of the wrapper region in client coordinates.
    fn wrapper_rect(&self) -> WrapperRect;

    /// Whether the container carries an instructions element.
    fn has_instructions(&self) -> bool;

    /// Apply one frame of visual state.
    fn present(&mut self, frame: &VisualFrame);

    /// Establish or refresh the handle's accessibility attributes.
    fn set_accessibility(&mut self, attrs: &AccessibilityAttributes);

    /// Toggle drag feedback (grabbing cursor, selection suppression, dragging style).
    fn set_drag_feedback(&mut self, active: bool);

    /// Toggle the keyboard focus-ring highlight.
    fn set_focus_ring(&mut self, active: bool);

    /// Add a click ripple to the wrapper.
    fn spawn_ripple(&mut self, ripple: Ripple);

    /// Remove a click ripple. Removing an unknown ripple is a no-op.
    fn remove_ripple(&mut self, id: RippleId);
}

/// Unified backend combining clock, frame and timer scheduling, and output.
///
/// Implemented automatically for any type providing all four halves.
pub trait Backend: SliderClock + AnimationDriver + TimerDriver + SliderSurface {}

impl<T> Backend for T where T: SliderClock + AnimationDriver + TimerDriver + SliderSurface {}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Moving backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl SliderClock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_clock_advances() {
        let mut clock = DeterministicClock::new();
        assert_eq!(clock.now_mono(), Duration::ZERO);
        clock.advance(Duration::from_millis(16));
        assert_eq!(clock.now_mono(), Duration::from_millis(16));
        clock.set(Duration::from_millis(100));
        assert_eq!(clock.now_mono(), Duration::from_millis(100));
    }

    #[test]
    fn deterministic_clock_is_monotonic() {
        let mut clock = DeterministicClock::new();
        clock.set(Duration::from_millis(100));
        clock.set(Duration::from_millis(50));
        assert_eq!(clock.now_mono(), Duration::from_millis(100));
    }

    #[test]
    fn deterministic_clock_saturates() {
        let mut clock = DeterministicClock::new();
        clock.set(Duration::MAX);
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now_mono(), Duration::MAX);
    }

    // Compile-time check that the blanket impl covers the headless backend.
    fn assert_backend<B: Backend>(_: &B) {}

    #[test]
    fn headless_is_a_backend() {
        let backend = headless::HeadlessBackend::new();
        assert_backend(&backend);
    }
}
