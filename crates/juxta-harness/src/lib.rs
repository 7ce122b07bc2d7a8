#![forbid(unsafe_code)]

//! Deterministic driver for the comparison slider.
//!
//! [`Harness`] ties one [`ComparisonSlider`] to a [`HeadlessBackend`] and
//! plays the host's role: it advances virtual time, delivers due frames and
//! timers in deadline order, and offers press/drag/release helpers that
//! sample at explicit virtual times. Every delivered item is appended to a
//! trace that can be exported as JSONL for debugging failed scenarios.
//!
//! ```
//! use core::time::Duration;
//! use juxta_core::config::SliderConfig;
//! use juxta_harness::Harness;
//!
//! let mut h = Harness::new(SliderConfig::default()).unwrap();
//! h.set_position(150.0, false);
//! h.advance(Duration::from_millis(16));
//! assert_eq!(h.position(), 99.0);
//! ```

use core::time::Duration;

use juxta_backend::{SliderClock, SliderSurface};
use juxta_backend::headless::{Due, HeadlessBackend};
use juxta_core::config::SliderConfig;
use juxta_core::error::Result;
use juxta_core::event::{
    ClickEvent, EventOutcome, InputEvent, KeyCode, KeyEvent, Modifiers, MouseButton, PointerKind,
};
use juxta_widget::ComparisonSlider;

/// Upper bound on frames delivered by [`Harness::settle`].
pub const SETTLE_FRAME_LIMIT: usize = 1_000;

/// One delivered input, frame, or timer.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    /// Virtual time of delivery in milliseconds.
    pub t_ms: u64,
    /// `event`, `frame`, or `timer`.
    pub kind: &'static str,
    pub detail: String,
    /// Displayed position after delivery.
    pub position: f64,
    /// Sweep phase after delivery.
    pub phase: &'static str,
    pub dragging: bool,
}

impl TraceEntry {
    /// Serialize as one JSONL line.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        serde_json::json!({
            "t_ms": self.t_ms,
            "kind": self.kind,
            "detail": self.detail,
            "position": self.position,
            "phase": self.phase,
            "dragging": self.dragging,
        })
        .to_string()
    }
}

/// A slider mounted on a headless backend.
#[derive(Debug)]
pub struct Harness {
    slider: ComparisonSlider,
    backend: HeadlessBackend,
    trace: Vec<TraceEntry>,
}

impl Harness {
    /// Mount a slider with `config` on a fresh [`HeadlessBackend`].
    pub fn new(config: SliderConfig) -> Result<Self> {
        Self::with_backend(config, HeadlessBackend::new())
    }

    /// Mount a slider on a pre-configured backend.
    pub fn with_backend(config: SliderConfig, mut backend: HeadlessBackend) -> Result<Self> {
        let slider = ComparisonSlider::mount(config, &mut backend)?;
        Ok(Self {
            slider,
            backend,
            trace: Vec::new(),
        })
    }

    #[must_use]
    pub const fn slider(&self) -> &ComparisonSlider {
        &self.slider
    }

    #[must_use]
    pub const fn backend(&self) -> &HeadlessBackend {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut HeadlessBackend {
        &mut self.backend
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.backend.now_mono()
    }

    /// Displayed position.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.slider.position()
    }

    // ── time ─────────────────────────────────────────────────────────────

    /// Deliver everything due within `dt` and move the clock to `now + dt`.
    /// Returns the number of callbacks delivered.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let until = self.now().saturating_add(dt);
        self.advance_to(until)
    }

    /// Deliver everything due up to `until` and move the clock there.
    pub fn advance_to(&mut self, until: Duration) -> usize {
        let mut delivered = 0;
        while let Some(due) = self.backend.pop_due(until) {
            self.deliver(due);
            delivered += 1;
        }
        self.backend.set_now(until);
        delivered
    }

    /// Run until no frame is outstanding, delivering timers that fall due on
    /// the way. Returns the number of frames delivered.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.slider.is_animating() && frames < SETTLE_FRAME_LIMIT {
            let Some(deadline) = self.backend.next_deadline() else {
                break;
            };
            if let Some(due) = self.backend.pop_due(deadline) {
                if matches!(due, Due::Frame(_)) {
                    frames += 1;
                }
                self.deliver(due);
            }
        }
        frames
    }

    // ── input ────────────────────────────────────────────────────────────

    /// Deliver one input event at the current virtual time.
    pub fn send(&mut self, event: InputEvent) -> EventOutcome {
        let outcome = self.slider.handle_event(&event, &mut self.backend);
        self.record("event", format!("{event:?}"));
        outcome
    }

    /// Programmatic move, as a host API call would make it.
    pub fn set_position(&mut self, target: f64, smooth: bool) {
        self.slider.set_position(target, smooth, &mut self.backend);
        self.record("event", format!("SetPosition({target}, {smooth})"));
    }

    /// Primary press on the handle.
    pub fn press(&mut self, kind: PointerKind) -> EventOutcome {
        self.send(InputEvent::PointerDown {
            kind,
            button: MouseButton::Primary,
        })
    }

    /// Move the pointer to `percent` of the wrapper width.
    pub fn drag_to(&mut self, kind: PointerKind, percent: f64) -> EventOutcome {
        let client_x = self.client_x(percent);
        self.send(InputEvent::PointerMove { kind, client_x })
    }

    pub fn release(&mut self, kind: PointerKind) -> EventOutcome {
        self.send(InputEvent::PointerUp { kind })
    }

    /// Click the wrapper at `percent` of its width, vertically centred.
    pub fn click_at(&mut self, percent: f64) -> EventOutcome {
        let rect = self.backend.wrapper_rect();
        let client_x = self.client_x(percent);
        self.send(InputEvent::Click(ClickEvent::new(
            client_x,
            rect.top + rect.height / 2.0,
        )))
    }

    pub fn key(&mut self, code: KeyCode) -> EventOutcome {
        self.send(InputEvent::Key(KeyEvent::new(code)))
    }

    pub fn key_with(&mut self, code: KeyCode, modifiers: Modifiers) -> EventOutcome {
        self.send(InputEvent::Key(KeyEvent::new(code).with_modifiers(modifiers)))
    }

    /// Report the container's visible fraction.
    pub fn show(&mut self, ratio: f64) -> EventOutcome {
        self.send(InputEvent::Visibility { ratio })
    }

    pub fn dispose(&mut self) {
        self.slider.dispose(&mut self.backend);
        self.record("event", "Dispose".to_string());
    }

    // ── trace ────────────────────────────────────────────────────────────

    #[must_use]
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Whole trace as JSONL.
    #[must_use]
    pub fn trace_jsonl(&self) -> String {
        self.trace
            .iter()
            .map(TraceEntry::to_jsonl)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn client_x(&self, percent: f64) -> f64 {
        let rect = self.backend.wrapper_rect();
        rect.left + rect.width * percent / 100.0
    }

    fn deliver(&mut self, due: Due) {
        match due {
            Due::Frame(handle) => {
                self.slider.on_frame(handle, &mut self.backend);
                self.record("frame", format!("{}", handle.0));
            }
            Due::Timer(handle, kind) => {
                self.slider.on_timer(kind, handle, &mut self.backend);
                self.record("timer", kind.label().to_string());
            }
        }
    }

    fn record(&mut self, kind: &'static str, detail: String) {
        let entry = TraceEntry {
            t_ms: u64::try_from(self.now().as_millis()).unwrap_or(u64::MAX),
            kind,
            detail,
            position: self.slider.position(),
            phase: self.slider.auto_play_phase().label(),
            dragging: self.slider.is_dragging(),
        };
        tracing::trace!(
            message = "harness.deliver",
            t_ms = entry.t_ms,
            kind,
            position = entry.position
        );
        self.trace.push(entry);
    }
}
