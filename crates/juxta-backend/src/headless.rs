#![forbid(unsafe_code)]

//! Deterministic headless backend.
//!
//! [`HeadlessBackend`] stands in for the browser: frames and timers are queued
//! with virtual deadlines, and everything the widget writes is recorded for
//! inspection. Nothing fires on its own; a driver (see `juxta-harness`) pops
//! due callbacks with [`HeadlessBackend::pop_due`] and hands them to the widget.
//!
//! # Invariants
//!
//! 1. A frame requested at time `t` is due at `t + frame_interval`.
//! 2. A timer started at time `t` with `delay` is due at `t + delay`.
//! 3. Callbacks due at the same instant pop in issue order.
//! 4. Cancelled callbacks never pop.

use core::time::Duration;

use juxta_core::geometry::WrapperRect;
use juxta_core::handle::{FrameHandle, RippleId, TimerHandle, TimerKind};
use juxta_core::visual::{AccessibilityAttributes, Ripple, VisualFrame};

use crate::{AnimationDriver, DeterministicClock, SliderClock, SliderSurface, TimerDriver};

/// Frame interval of a 60 Hz display, rounded to whole milliseconds.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Wrapper geometry used unless overridden: 1000 px wide at the origin, so
/// a client x of `n * 10` lands on position `n`.
pub const DEFAULT_WRAPPER_RECT: WrapperRect = WrapperRect::new(0.0, 0.0, 1000.0, 500.0);

/// A callback that has come due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    Frame(FrameHandle),
    Timer(TimerHandle, TimerKind),
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    seq: u64,
    due_at: Duration,
    due: Due,
}

/// Everything the widget wrote, in order.
#[derive(Debug, Default, Clone)]
pub struct HeadlessOutputs {
    /// Every presented frame.
    pub frames: Vec<VisualFrame>,
    /// Last accessibility attributes written.
    pub accessibility: Option<AccessibilityAttributes>,
    /// Current drag feedback state.
    pub drag_feedback: bool,
    /// Number of drag feedback toggles.
    pub drag_feedback_toggles: usize,
    /// Current focus-ring state.
    pub focus_ring: bool,
    /// Ripples currently attached to the wrapper.
    pub live_ripples: Vec<Ripple>,
    /// Every ripple ever spawned.
    pub spawned_ripples: usize,
}

impl HeadlessOutputs {
    /// The most recently presented frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&VisualFrame> {
        self.frames.last()
    }
}

/// Deterministic backend with virtual time and recorded outputs.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    clock: DeterministicClock,
    frame_interval: Duration,
    wrapper_rect: WrapperRect,
    instructions: bool,
    next_seq: u64,
    pending: Vec<Pending>,
    outputs: HeadlessOutputs,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    /// Create a backend at time zero with a 16 ms frame interval.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: DeterministicClock::new(),
            frame_interval: DEFAULT_FRAME_INTERVAL,
            wrapper_rect: DEFAULT_WRAPPER_RECT,
            instructions: false,
            next_seq: 1,
            pending: Vec::new(),
            outputs: HeadlessOutputs::default(),
        }
    }

    /// Set the frame interval (builder pattern). Zero is clamped to 1 ms.
    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Set the wrapper geometry (builder pattern).
    #[must_use]
    pub const fn with_wrapper_rect(mut self, rect: WrapperRect) -> Self {
        self.wrapper_rect = rect;
        self
    }

    /// Pretend the container has an instructions element (builder pattern).
    #[must_use]
    pub const fn with_instructions(mut self, present: bool) -> Self {
        self.instructions = present;
        self
    }

    /// Change the wrapper geometry, as a window resize would.
    pub fn set_wrapper_rect(&mut self, rect: WrapperRect) {
        self.wrapper_rect = rect;
    }

    /// Frame interval in use.
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Move the clock forward to `now` without firing anything.
    pub fn set_now(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Advance the clock by `dt` without firing anything.
    pub fn advance_clock(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Deadline of the earliest pending callback.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.earliest().map(|index| self.pending[index].due_at)
    }

    /// Remove and return the earliest callback due at or before `until`,
    /// moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<Due> {
        let index = self.earliest()?;
        if self.pending[index].due_at > until {
            return None;
        }
        let pending = self.pending.remove(index);
        self.clock.set(pending.due_at);
        Some(pending.due)
    }

    /// Number of outstanding frame callbacks.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| matches!(p.due, Due::Frame(_)))
            .count()
    }

    /// Number of outstanding timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| matches!(p.due, Due::Timer(..)))
            .count()
    }

    /// Kinds of the outstanding timers, in issue order.
    #[must_use]
    pub fn pending_timer_kinds(&self) -> Vec<TimerKind> {
        let mut timers: Vec<_> = self
            .pending
            .iter()
            .filter_map(|p| match p.due {
                Due::Timer(_, kind) => Some((p.seq, kind)),
                Due::Frame(_) => None,
            })
            .collect();
        timers.sort_by_key(|(seq, _)| *seq);
        timers.into_iter().map(|(_, kind)| kind).collect()
    }

    /// Whether a timer of `kind` is outstanding.
    #[must_use]
    pub fn has_timer(&self, kind: TimerKind) -> bool {
        self.pending
            .iter()
            .any(|p| matches!(p.due, Due::Timer(_, k) if k == kind))
    }

    /// Recorded outputs.
    #[must_use]
    pub const fn outputs(&self) -> &HeadlessOutputs {
        &self.outputs
    }

    /// Clear recorded frames, keeping the current feedback state.
    pub fn clear_frames(&mut self) {
        self.outputs.frames.clear();
    }

    fn earliest(&self) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| (p.due_at, p.seq))
            .map(|(index, _)| index)
    }

    fn push(&mut self, delay: Duration, make: impl FnOnce(u64) -> Due) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due_at = self.clock.now_mono().saturating_add(delay);
        self.pending.push(Pending {
            seq,
            due_at,
            due: make(seq),
        });
        seq
    }
}

impl SliderClock for HeadlessBackend {
    fn now_mono(&self) -> Duration {
        self.clock.now_mono()
    }
}

impl AnimationDriver for HeadlessBackend {
    fn schedule_frame(&mut self) -> FrameHandle {
        let interval = self.frame_interval;
        FrameHandle(self.push(interval, |seq| Due::Frame(FrameHandle(seq))))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|p| p.due != Due::Frame(handle));
    }
}

impl TimerDriver for HeadlessBackend {
    fn start_timer(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle {
        TimerHandle(self.push(delay, |seq| Due::Timer(TimerHandle(seq), kind)))
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        self.pending
            .retain(|p| !matches!(p.due, Due::Timer(h, _) if h == handle));
    }
}

impl SliderSurface for HeadlessBackend {
    fn wrapper_rect(&self) -> WrapperRect {
        self.wrapper_rect
    }

    fn has_instructions(&self) -> bool {
        self.instructions
    }

    fn present(&mut self, frame: &VisualFrame) {
        self.outputs.frames.push(*frame);
        if let Some(attrs) = self.outputs.accessibility.as_mut() {
            attrs.value_now = frame.aria_value_now;
        }
    }

    fn set_accessibility(&mut self, attrs: &AccessibilityAttributes) {
        self.outputs.accessibility = Some(attrs.clone());
    }

    fn set_drag_feedback(&mut self, active: bool) {
        if self.outputs.drag_feedback != active {
            self.outputs.drag_feedback_toggles += 1;
        }
        self.outputs.drag_feedback = active;
    }

    fn set_focus_ring(&mut self, active: bool) {
        self.outputs.focus_ring = active;
    }

    fn spawn_ripple(&mut self, ripple: Ripple) {
        self.outputs.spawned_ripples += 1;
        self.outputs.live_ripples.push(ripple);
    }

    fn remove_ripple(&mut self, id: RippleId) {
        self.outputs.live_ripples.retain(|r| r.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn frame_is_due_one_interval_later() {
        let mut backend = HeadlessBackend::new();
        let handle = backend.schedule_frame();
        assert_eq!(backend.next_deadline(), Some(ms(16)));
        assert_eq!(backend.pop_due(ms(15)), None);
        assert_eq!(backend.pop_due(ms(16)), Some(Due::Frame(handle)));
        assert_eq!(backend.now_mono(), ms(16));
        assert_eq!(backend.pending_frames(), 0);
    }

    #[test]
    fn timers_pop_in_deadline_then_issue_order() {
        let mut backend = HeadlessBackend::new();
        let late = backend.start_timer(TimerKind::AutoPlayArm, ms(100));
        let a = backend.start_timer(TimerKind::FocusRing, ms(50));
        let b = backend.start_timer(TimerKind::ResizeDebounce, ms(50));
        assert_eq!(
            backend.pending_timer_kinds(),
            vec![
                TimerKind::AutoPlayArm,
                TimerKind::FocusRing,
                TimerKind::ResizeDebounce
            ]
        );
        assert_eq!(
            backend.pop_due(ms(1_000)),
            Some(Due::Timer(a, TimerKind::FocusRing))
        );
        assert_eq!(
            backend.pop_due(ms(1_000)),
            Some(Due::Timer(b, TimerKind::ResizeDebounce))
        );
        assert_eq!(
            backend.pop_due(ms(1_000)),
            Some(Due::Timer(late, TimerKind::AutoPlayArm))
        );
        assert_eq!(backend.pop_due(ms(1_000)), None);
    }

    #[test]
    fn cancelled_callbacks_never_pop() {
        let mut backend = HeadlessBackend::new();
        let frame = backend.schedule_frame();
        let timer = backend.start_timer(TimerKind::EntryAnimation, ms(10));
        backend.cancel_frame(frame);
        backend.cancel_timer(timer);
        assert_eq!(backend.pending_frames(), 0);
        assert_eq!(backend.pending_timers(), 0);
        assert_eq!(backend.pop_due(Duration::MAX), None);
    }

    #[test]
    fn cancelling_unknown_handles_is_noop() {
        let mut backend = HeadlessBackend::new();
        backend.start_timer(TimerKind::EntryAnimation, ms(10));
        backend.cancel_timer(TimerHandle(999));
        backend.cancel_frame(FrameHandle(999));
        assert_eq!(backend.pending_timers(), 1);
    }

    #[test]
    fn present_tracks_aria_value() {
        let mut backend = HeadlessBackend::new();
        backend.set_accessibility(&AccessibilityAttributes::slider(50.0, "x", None));
        backend.present(&VisualFrame::compute(72.4, false));
        assert_eq!(
            backend.outputs().accessibility.as_ref().map(|a| a.value_now),
            Some(72)
        );
        assert_eq!(backend.outputs().frames.len(), 1);
    }

    #[test]
    fn ripples_are_tracked() {
        let mut backend = HeadlessBackend::new();
        backend.spawn_ripple(Ripple {
            id: RippleId(1),
            x: 1.0,
            y: 2.0,
        });
        backend.spawn_ripple(Ripple {
            id: RippleId(2),
            x: 3.0,
            y: 4.0,
        });
        backend.remove_ripple(RippleId(1));
        assert_eq!(backend.outputs().live_ripples.len(), 1);
        assert_eq!(backend.outputs().spawned_ripples, 2);
    }

    #[test]
    fn layout_facts_are_configurable() {
        let mut backend = HeadlessBackend::new().with_instructions(true);
        assert!(backend.has_instructions());
        assert_eq!(backend.wrapper_rect(), DEFAULT_WRAPPER_RECT);
        let rect = WrapperRect::new(10.0, 20.0, 300.0, 200.0);
        backend.set_wrapper_rect(rect);
        assert_eq!(backend.wrapper_rect(), rect);
    }

    #[test]
    fn drag_feedback_counts_toggles() {
        let mut backend = HeadlessBackend::new();
        backend.set_drag_feedback(true);
        backend.set_drag_feedback(true);
        backend.set_drag_feedback(false);
        assert_eq!(backend.outputs().drag_feedback_toggles, 2);
        assert!(!backend.outputs().drag_feedback);
    }
}
