#![forbid(unsafe_code)]

//! Opaque handles for scheduled frames and timers.
//!
//! Handles are issued by the backend and only compared for equality by the
//! widget. A handle that no longer matches the widget's record is stale and
//! its callback is ignored.

/// A pending rendering-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// A pending timer callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Identifier of one transient click ripple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RippleId(pub u32);

/// Purpose of a timer, delivered back to the widget when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Settle delay before the entry animation.
    EntryAnimation,
    /// Delay between becoming visible and starting the idle sweep.
    AutoPlayArm,
    /// One step of the idle sweep.
    AutoPlayTick,
    /// Quiet period after the last window resize.
    ResizeDebounce,
    /// Keyboard focus-ring highlight duration.
    FocusRing,
    /// Lifetime of one click ripple.
    RippleExpiry(RippleId),
}

impl TimerKind {
    /// Short label for logging.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EntryAnimation => "entry_animation",
            Self::AutoPlayArm => "auto_play_arm",
            Self::AutoPlayTick => "auto_play_tick",
            Self::ResizeDebounce => "resize_debounce",
            Self::FocusRing => "focus_ring",
            Self::RippleExpiry(_) => "ripple_expiry",
        }
    }
}
