#![forbid(unsafe_code)]

//! Pointer velocity tracking and release momentum.
//!
//! Velocity is measured in position-percent per millisecond between
//! consecutive drag samples. On release, a [`MomentumProfile`] decides
//! whether the last measured velocity is large enough to carry the slider
//! further, and by how much.
//!
//! # Invariants
//!
//! 1. The first sample after [`VelocityTracker::clear`] reports zero velocity.
//! 2. A sample with zero elapsed time reports zero velocity.
//! 3. Momentum only projects when `|velocity| > threshold` (strict).

use core::time::Duration;

use crate::event::PointerKind;

/// Tracks the rate of position change between drag samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelocityTracker {
    last: Option<(Duration, f64)>,
    velocity: f64,
}

impl VelocityTracker {
    /// Create a tracker with no baseline.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: None,
            velocity: 0.0,
        }
    }

    /// Record the press position and time as the baseline and zero the velocity.
    pub fn begin(&mut self, now: Duration, position: f64) {
        self.last = Some((now, position));
        self.velocity = 0.0;
    }

    /// Drop the baseline. The next sample reports zero.
    pub fn clear(&mut self) {
        self.last = None;
        self.velocity = 0.0;
    }

    /// Record a drag sample and return the updated velocity.
    pub fn sample(&mut self, position: f64, now: Duration) -> f64 {
        self.velocity = match self.last {
            None => 0.0,
            Some((last_time, last_position)) => {
                let elapsed_ms = now.saturating_sub(last_time).as_secs_f64() * 1000.0;
                if elapsed_ms > 0.0 {
                    (position - last_position) / elapsed_ms
                } else {
                    0.0
                }
            }
        };
        self.last = Some((now, position));
        self.velocity
    }

    /// Most recently computed velocity (percent per millisecond).
    #[inline]
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }
}

/// Release-momentum tuning for one input device.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MomentumProfile {
    /// Minimum `|velocity|` (percent/ms) required to project momentum.
    pub threshold: f64,
    /// Milliseconds of travel projected past the release point.
    pub multiplier: f64,
}

impl MomentumProfile {
    /// Mouse release momentum.
    pub const MOUSE: Self = Self {
        threshold: 0.1,
        multiplier: 10.0,
    };

    /// Touch release momentum.
    pub const TOUCH: Self = Self {
        threshold: 0.2,
        multiplier: 15.0,
    };

    /// Default profile for a pointer kind.
    #[must_use]
    pub const fn for_kind(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Mouse => Self::MOUSE,
            PointerKind::Touch => Self::TOUCH,
        }
    }

    /// Target position after release, or `None` when the velocity is too small.
    ///
    /// The result is not clamped.
    #[must_use]
    pub fn project(&self, current: f64, velocity: f64) -> Option<f64> {
        if velocity.abs() > self.threshold {
            Some(current + velocity * self.multiplier)
        } else {
            None
        }
    }
}
