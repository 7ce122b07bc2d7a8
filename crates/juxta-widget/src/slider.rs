#![forbid(unsafe_code)]

//! The comparison slider state machine.
//!
//! [`ComparisonSlider`] owns every piece of per-instance state (displayed and
//! target position, drag session, velocity, sweep phase, pending frame and
//! timers). It never touches a platform directly: each operation receives the
//! [`Backend`] it should schedule on and write to, and the host reports frames
//! and timers back through [`ComparisonSlider::on_frame`] and
//! [`ComparisonSlider::on_timer`].
//!
//! # Invariants
//!
//! 1. `position` and `target` always lie in `[1, 99]`.
//! 2. At most one frame is outstanding; scheduling cancels the previous one.
//! 3. Dragging and sweeping are never active together.
//! 4. After [`ComparisonSlider::dispose`] nothing is outstanding on the
//!    backend and every later call is a no-op.
//!
//! # Failure Modes
//!
//! - Stale frame or timer handles (already superseded or cancelled) are
//!   ignored rather than reported.
//! - Pointer input against a zero-width wrapper lands on position 1.

use core::sync::atomic::{AtomicU64, Ordering};

use juxta_backend::Backend;
use juxta_core::animation::{Step, VelocityTracker, approach};
use juxta_core::config::SliderConfig;
use juxta_core::error::Result;
use juxta_core::event::{
    ClickEvent, EventOutcome, InputEvent, InteractionKind, KeyEvent, MouseButton, PointerKind,
};
use juxta_core::geometry::clamp_position;
use juxta_core::handle::{FrameHandle, RippleId, TimerHandle, TimerKind};
use juxta_core::visual::{AccessibilityAttributes, Ripple, VisualFrame};

use crate::autoplay::{AutoPlay, AutoPlayPhase};
use crate::drag::{ClickGate, DragSession};
use crate::keyboard::{KeyAction, key_action};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// One before/after comparison slider.
#[derive(Debug)]
pub struct ComparisonSlider {
    instance: u64,
    config: SliderConfig,
    /// Position currently shown.
    position: f64,
    /// Position the pending frame (or animation) is heading for.
    target: f64,
    /// Whether the pending frame interpolates instead of snapping.
    smoothing: bool,
    frame: Option<FrameHandle>,
    drag: Option<DragSession>,
    tracker: VelocityTracker,
    click_gate: ClickGate,
    auto_play: AutoPlay,
    entry_timer: Option<TimerHandle>,
    resize_timer: Option<TimerHandle>,
    focus_timer: Option<TimerHandle>,
    ripples: Vec<(RippleId, TimerHandle)>,
    next_ripple: u32,
    disposed: bool,
}

impl ComparisonSlider {
    /// Bind a slider to `backend`.
    ///
    /// Validates `config`, establishes the handle's accessibility attributes,
    /// renders the initial position and schedules the entry animation.
    pub fn mount<B: Backend + ?Sized>(config: SliderConfig, backend: &mut B) -> Result<Self> {
        if let Err(err) = config.validate() {
            tracing::warn!(message = "slider.config_rejected", error = %err);
            return Err(err.into());
        }

        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        let position = clamp_position(config.initial_position);
        let described_by = backend
            .has_instructions()
            .then(|| config.instructions_id.clone());
        backend.set_accessibility(&AccessibilityAttributes::slider(
            position,
            config.aria_label.clone(),
            described_by,
        ));

        let entry_timer = Some(backend.start_timer(TimerKind::EntryAnimation, config.entry_delay()));
        let mut slider = Self {
            instance,
            config,
            position,
            target: position,
            smoothing: false,
            frame: None,
            drag: None,
            tracker: VelocityTracker::new(),
            click_gate: ClickGate::default(),
            auto_play: AutoPlay::Idle,
            entry_timer,
            resize_timer: None,
            focus_timer: None,
            ripples: Vec::new(),
            next_ripple: 0,
            disposed: false,
        };
        slider.schedule(position, false, backend);
        tracing::debug!(message = "slider.mount", instance, position);
        Ok(slider)
    }

    /// Move the slider to `target`, clamped to `[1, 99]`.
    ///
    /// With `smooth`, the displayed position approaches the target over
    /// successive frames; otherwise the next frame snaps to it. Reduced
    /// motion always snaps. A programmatic move ends any running sweep.
    pub fn set_position<B: Backend + ?Sized>(&mut self, target: f64, smooth: bool, backend: &mut B) {
        if self.disposed {
            return;
        }
        self.stop_auto_play(backend);
        self.schedule(target, smooth, backend);
    }

    /// Dispatch one input event.
    pub fn handle_event<B: Backend + ?Sized>(
        &mut self,
        event: &InputEvent,
        backend: &mut B,
    ) -> EventOutcome {
        if self.disposed {
            return EventOutcome::IGNORED;
        }
        match *event {
            InputEvent::PointerDown { kind, button } => self.press(kind, button, backend),
            InputEvent::PointerMove { client_x, .. } => self.drag_move(client_x, backend),
            InputEvent::PointerUp { .. } => self.release(backend),
            InputEvent::Click(click) => self.click(click, backend),
            InputEvent::Key(key) => self.key(key, backend),
            InputEvent::Interaction(kind) => self.interaction(kind, backend),
            InputEvent::Visibility { ratio } => self.visibility(ratio, backend),
            InputEvent::Resize => self.resize(backend),
        }
    }

    /// Rendering-frame callback.
    pub fn on_frame<B: Backend + ?Sized>(&mut self, handle: FrameHandle, backend: &mut B) {
        if self.disposed || self.frame != Some(handle) {
            return;
        }
        self.frame = None;
        if self.smoothing {
            match approach(
                self.position,
                self.target,
                self.config.smoothing_factor,
                self.config.settle_epsilon,
            ) {
                Step::Continue(value) => {
                    self.position = value;
                    self.frame = Some(backend.schedule_frame());
                }
                Step::Settled(value) => {
                    self.position = value;
                    self.smoothing = false;
                }
            }
        } else {
            self.position = self.target;
        }
        backend.present(&VisualFrame::compute(self.position, self.is_dragging()));
    }

    /// Timer callback.
    pub fn on_timer<B: Backend + ?Sized>(
        &mut self,
        kind: TimerKind,
        handle: TimerHandle,
        backend: &mut B,
    ) {
        if self.disposed {
            return;
        }
        match kind {
            TimerKind::EntryAnimation => {
                if take_if_current(&mut self.entry_timer, handle) && !self.is_dragging() {
                    self.schedule(self.config.entry_target, true, backend);
                }
            }
            TimerKind::AutoPlayArm => {
                if self.is_dragging() {
                    self.stop_auto_play(backend);
                    return;
                }
                let settings = &self.config.auto_play;
                if self
                    .auto_play
                    .begin_sweep(handle, self.target, settings, backend)
                {
                    self.log_phase(AutoPlayPhase::Armed);
                }
            }
            TimerKind::AutoPlayTick => {
                if let Some(cursor) = self.auto_play.tick(handle, &self.config.auto_play, backend) {
                    self.schedule(cursor, false, backend);
                }
            }
            TimerKind::ResizeDebounce => {
                // A pending frame re-renders against the new geometry anyway.
                if take_if_current(&mut self.resize_timer, handle) && self.frame.is_none() {
                    self.schedule(self.position, false, backend);
                }
            }
            TimerKind::FocusRing => {
                if take_if_current(&mut self.focus_timer, handle) {
                    backend.set_focus_ring(false);
                }
            }
            TimerKind::RippleExpiry(id) => {
                if let Some(index) = self
                    .ripples
                    .iter()
                    .position(|&(rid, timer)| rid == id && timer == handle)
                {
                    self.ripples.swap_remove(index);
                    backend.remove_ripple(id);
                }
            }
        }
    }

    /// Tear the slider down.
    ///
    /// Cancels the pending frame and every timer, removes live ripples, ends a
    /// drag in progress and returns the sweep to idle. Idempotent.
    pub fn dispose<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        if self.disposed {
            return;
        }
        if let Some(frame) = self.frame.take() {
            backend.cancel_frame(frame);
        }
        for timer in [
            self.entry_timer.take(),
            self.resize_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            backend.cancel_timer(timer);
        }
        if let Some(timer) = self.focus_timer.take() {
            backend.cancel_timer(timer);
            backend.set_focus_ring(false);
        }
        for (id, timer) in self.ripples.drain(..) {
            backend.cancel_timer(timer);
            backend.remove_ripple(id);
        }
        if self.drag.take().is_some() {
            backend.set_drag_feedback(false);
        }
        self.auto_play.cancel(backend);
        self.disposed = true;
        tracing::debug!(
            message = "slider.dispose",
            instance = self.instance,
            position = self.position
        );
    }

    // ── accessors ────────────────────────────────────────────────────────

    /// Process-unique id used in log fields.
    #[must_use]
    pub const fn instance(&self) -> u64 {
        self.instance
    }

    /// Displayed position.
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    /// Position the slider is heading for (equal to [`Self::position`] once settled).
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub const fn is_auto_playing(&self) -> bool {
        matches!(self.auto_play.phase(), AutoPlayPhase::Sweeping)
    }

    #[must_use]
    pub const fn auto_play_phase(&self) -> AutoPlayPhase {
        self.auto_play.phase()
    }

    /// Last measured drag velocity in percent per millisecond.
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.tracker.velocity()
    }

    /// Whether a frame is outstanding.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.frame.is_some()
    }

    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[must_use]
    pub const fn config(&self) -> &SliderConfig {
        &self.config
    }

    // ── internals ────────────────────────────────────────────────────────

    fn schedule<B: Backend + ?Sized>(&mut self, target: f64, smooth: bool, backend: &mut B) {
        self.target = clamp_position(target);
        self.smoothing = smooth && !self.config.reduced_motion;
        if let Some(previous) = self.frame.take() {
            backend.cancel_frame(previous);
        }
        self.frame = Some(backend.schedule_frame());
    }

    fn stop_auto_play<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        let left = self.auto_play.cancel(backend);
        if left != AutoPlayPhase::Idle {
            self.log_phase(left);
        }
    }

    fn sweep_allowed(&self) -> bool {
        self.config.auto_play.enabled && !self.config.reduced_motion && !self.is_dragging()
    }

    fn log_phase(&self, from: AutoPlayPhase) {
        tracing::debug!(
            message = "slider.auto_play",
            instance = self.instance,
            from = from.label(),
            phase = self.auto_play.phase().label(),
            position = self.position
        );
    }

    fn press<B: Backend + ?Sized>(
        &mut self,
        kind: PointerKind,
        button: MouseButton,
        backend: &mut B,
    ) -> EventOutcome {
        let Some(session) = DragSession::start(kind, button) else {
            return EventOutcome::IGNORED;
        };
        self.stop_auto_play(backend);
        self.click_gate.disarm();
        self.drag = Some(session);
        // Grabbing the handle stops any animation where it stands.
        let held = self.position;
        self.schedule(held, false, backend);
        self.tracker.begin(backend.now_mono(), held);
        backend.set_drag_feedback(true);
        tracing::debug!(
            message = "slider.drag_start",
            instance = self.instance,
            position = held,
            pointer = ?kind
        );
        EventOutcome::CONSUMED
    }

    fn drag_move<B: Backend + ?Sized>(&mut self, client_x: f64, backend: &mut B) -> EventOutcome {
        if !self.is_dragging() {
            return EventOutcome::IGNORED;
        }
        let sample = backend.wrapper_rect().fraction_percent(client_x);
        self.tracker.sample(sample, backend.now_mono());
        self.schedule(sample, false, backend);
        EventOutcome::CONSUMED
    }

    fn release<B: Backend + ?Sized>(&mut self, backend: &mut B) -> EventOutcome {
        let Some(session) = self.drag.take() else {
            return EventOutcome::IGNORED;
        };
        backend.set_drag_feedback(false);
        self.click_gate.arm();

        let velocity = self.tracker.velocity();
        let momentum = if self.config.reduced_motion {
            None
        } else {
            self.config
                .momentum(session.kind)
                .project(self.target, velocity)
        };
        tracing::debug!(
            message = "slider.drag_end",
            instance = self.instance,
            position = self.target,
            velocity,
            momentum = momentum.is_some()
        );
        match momentum {
            Some(target) => self.schedule(target, true, backend),
            // Re-present so the button scale drops back.
            None => self.schedule(self.target, false, backend),
        }
        EventOutcome::HANDLED
    }

    fn click<B: Backend + ?Sized>(&mut self, click: ClickEvent, backend: &mut B) -> EventOutcome {
        if click.on_handle {
            return EventOutcome::IGNORED;
        }
        self.stop_auto_play(backend);
        if self.click_gate.take() {
            return EventOutcome::HANDLED;
        }
        let rect = backend.wrapper_rect();
        self.schedule(rect.fraction_percent(click.client_x), true, backend);

        let id = RippleId(self.next_ripple);
        self.next_ripple = self.next_ripple.wrapping_add(1);
        let (x, y) = rect.local_point(click.client_x, click.client_y);
        backend.spawn_ripple(Ripple { id, x, y });
        let timer = backend.start_timer(TimerKind::RippleExpiry(id), self.config.ripple());
        self.ripples.push((id, timer));
        EventOutcome::HANDLED
    }

    fn key<B: Backend + ?Sized>(&mut self, key: KeyEvent, backend: &mut B) -> EventOutcome {
        let Some(action) = key_action(&key, &self.config) else {
            return EventOutcome::IGNORED;
        };
        self.stop_auto_play(backend);
        match action {
            KeyAction::Step(delta) => {
                // Repeated keys within one frame accumulate on the committed target.
                let base = if self.frame.is_some() && !self.smoothing {
                    self.target
                } else {
                    self.position
                };
                self.schedule(base + delta, false, backend);
            }
            KeyAction::Jump(target) => self.schedule(target, true, backend),
        }
        if let Some(previous) = self.focus_timer.take() {
            backend.cancel_timer(previous);
        }
        backend.set_focus_ring(true);
        self.focus_timer = Some(backend.start_timer(TimerKind::FocusRing, self.config.focus_ring()));
        EventOutcome::CONSUMED
    }

    fn interaction<B: Backend + ?Sized>(
        &mut self,
        kind: InteractionKind,
        backend: &mut B,
    ) -> EventOutcome {
        if kind.is_press() {
            self.click_gate.disarm();
        }
        if self.auto_play.phase() == AutoPlayPhase::Idle {
            return EventOutcome::IGNORED;
        }
        self.stop_auto_play(backend);
        EventOutcome::HANDLED
    }

    fn visibility<B: Backend + ?Sized>(&mut self, ratio: f64, backend: &mut B) -> EventOutcome {
        if ratio >= self.config.auto_play.visibility_threshold {
            if !self.sweep_allowed() {
                return EventOutcome::IGNORED;
            }
            if self.auto_play.arm(&self.config.auto_play, backend) {
                self.log_phase(AutoPlayPhase::Idle);
                return EventOutcome::HANDLED;
            }
            EventOutcome::IGNORED
        } else if self.auto_play.phase() != AutoPlayPhase::Idle {
            self.stop_auto_play(backend);
            EventOutcome::HANDLED
        } else {
            EventOutcome::IGNORED
        }
    }

    fn resize<B: Backend + ?Sized>(&mut self, backend: &mut B) -> EventOutcome {
        if let Some(previous) = self.resize_timer.take() {
            backend.cancel_timer(previous);
        }
        self.resize_timer =
            Some(backend.start_timer(TimerKind::ResizeDebounce, self.config.resize_debounce()));
        EventOutcome::HANDLED
    }
}

fn take_if_current(slot: &mut Option<TimerHandle>, handle: TimerHandle) -> bool {
    if *slot == Some(handle) {
        *slot = None;
        true
    } else {
        false
    }
}
