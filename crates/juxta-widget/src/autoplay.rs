#![forbid(unsafe_code)]

//! Idle demonstration sweep.
//!
//! ```text
//!           visible ≥ threshold            arm delay elapsed
//!   Idle ─────────────────────────▶ Armed ───────────────────▶ Sweeping ─┐
//!    ▲                                │                          │  ▲     │ tick
//!    └──── interaction / hidden ──────┴──────────────────────────┘  └─────┘
//! ```
//!
//! # Invariants
//!
//! 1. Exactly one timer is outstanding in `Armed` and `Sweeping`; none in `Idle`.
//! 2. Every transition back to `Idle` cancels the outstanding timer.
//! 3. A timer callback only advances the machine when its handle matches the
//!    one recorded for the current phase.
//!
//! Whether arming is allowed at all (dragging, reduced motion, disabled
//! sweep) is decided by the caller.

use juxta_backend::TimerDriver;
use juxta_core::config::AutoPlayConfig;
use juxta_core::handle::{TimerHandle, TimerKind};

/// Sign of the sweep's position change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Forward,
    Backward,
}

impl SweepDirection {
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Observable phase of the sweep, without timer bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoPlayPhase {
    Idle,
    Armed,
    Sweeping,
}

impl AutoPlayPhase {
    /// Short label for logging.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Armed => "armed",
            Self::Sweeping => "sweeping",
        }
    }
}

/// Sweep state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AutoPlay {
    #[default]
    Idle,
    /// Waiting out the arm delay.
    Armed { timer: TimerHandle },
    /// Stepping the position every tick interval.
    Sweeping {
        direction: SweepDirection,
        cursor: f64,
        timer: TimerHandle,
    },
}

impl AutoPlay {
    #[must_use]
    pub const fn phase(&self) -> AutoPlayPhase {
        match self {
            Self::Idle => AutoPlayPhase::Idle,
            Self::Armed { .. } => AutoPlayPhase::Armed,
            Self::Sweeping { .. } => AutoPlayPhase::Sweeping,
        }
    }

    /// `Idle → Armed`. Returns `false` if not idle.
    pub fn arm<T: TimerDriver + ?Sized>(&mut self, settings: &AutoPlayConfig, timers: &mut T) -> bool {
        if !matches!(self, Self::Idle) {
            return false;
        }
        let timer = timers.start_timer(TimerKind::AutoPlayArm, settings.arm_delay());
        *self = Self::Armed { timer };
        true
    }

    /// `Armed → Sweeping`, starting from `cursor`. Returns `false` if the
    /// handle is stale or the machine is not armed.
    pub fn begin_sweep<T: TimerDriver + ?Sized>(
        &mut self,
        handle: TimerHandle,
        cursor: f64,
        settings: &AutoPlayConfig,
        timers: &mut T,
    ) -> bool {
        match *self {
            Self::Armed { timer } if timer == handle => {
                let timer = timers.start_timer(TimerKind::AutoPlayTick, settings.tick_interval());
                *self = Self::Sweeping {
                    direction: SweepDirection::Forward,
                    cursor,
                    timer,
                };
                true
            }
            _ => false,
        }
    }

    /// One sweep step. Returns the new cursor, or `None` for a stale handle.
    ///
    /// The direction flips to backward once the cursor reaches the upper turn
    /// point and to forward once it reaches the lower one.
    pub fn tick<T: TimerDriver + ?Sized>(
        &mut self,
        handle: TimerHandle,
        settings: &AutoPlayConfig,
        timers: &mut T,
    ) -> Option<f64> {
        let Self::Sweeping {
            direction, cursor, timer,
        } = *self
        else {
            return None;
        };
        if timer != handle {
            return None;
        }
        let cursor = cursor + settings.step * direction.sign();
        let direction = if cursor >= settings.upper_turn {
            SweepDirection::Backward
        } else if cursor <= settings.lower_turn {
            SweepDirection::Forward
        } else {
            direction
        };
        let timer = timers.start_timer(TimerKind::AutoPlayTick, settings.tick_interval());
        *self = Self::Sweeping {
            direction,
            cursor,
            timer,
        };
        Some(cursor)
    }

    /// Any phase `→ Idle`, cancelling the outstanding timer. Returns the
    /// phase that was left.
    pub fn cancel<T: TimerDriver + ?Sized>(&mut self, timers: &mut T) -> AutoPlayPhase {
        let left = self.phase();
        match core::mem::take(self) {
            Self::Idle => {}
            Self::Armed { timer } | Self::Sweeping { timer, .. } => timers.cancel_timer(timer),
        }
        left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    #[derive(Default)]
    struct FakeTimers {
        next: u64,
        started: Vec<(TimerKind, Duration)>,
        cancelled: Vec<TimerHandle>,
    }

    impl TimerDriver for FakeTimers {
        fn start_timer(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle {
            self.next += 1;
            self.started.push((kind, delay));
            TimerHandle(self.next)
        }

        fn cancel_timer(&mut self, handle: TimerHandle) {
            self.cancelled.push(handle);
        }
    }

    fn sweeping(direction: SweepDirection, cursor: f64, timer: u64) -> AutoPlay {
        AutoPlay::Sweeping {
            direction,
            cursor,
            timer: TimerHandle(timer),
        }
    }

    #[test]
    fn arm_then_sweep() {
        let settings = AutoPlayConfig::default();
        let mut timers = FakeTimers::default();
        let mut auto = AutoPlay::default();

        assert!(auto.arm(&settings, &mut timers));
        assert_eq!(auto.phase(), AutoPlayPhase::Armed);
        assert_eq!(
            timers.started,
            vec![(TimerKind::AutoPlayArm, Duration::from_millis(3_000))]
        );
        assert!(!auto.arm(&settings, &mut timers), "already armed");

        assert!(!auto.begin_sweep(TimerHandle(99), 50.0, &settings, &mut timers));
        assert!(auto.begin_sweep(TimerHandle(1), 50.0, &settings, &mut timers));
        assert_eq!(auto, sweeping(SweepDirection::Forward, 50.0, 2));
        assert_eq!(
            timers.started[1],
            (TimerKind::AutoPlayTick, Duration::from_millis(50))
        );
    }

    #[test]
    fn tick_steps_and_reschedules() {
        let settings = AutoPlayConfig::default();
        let mut timers = FakeTimers {
            next: 10,
            ..FakeTimers::default()
        };
        let mut auto = sweeping(SweepDirection::Forward, 50.0, 10);
        assert_eq!(auto.tick(TimerHandle(10), &settings, &mut timers), Some(50.5));
        assert_eq!(auto, sweeping(SweepDirection::Forward, 50.5, 11));
        assert_eq!(auto.tick(TimerHandle(10), &settings, &mut timers), None, "stale");
    }

    #[test]
    fn turns_exactly_at_bounds() {
        let settings = AutoPlayConfig::default();
        let mut timers = FakeTimers::default();

        let mut auto = sweeping(SweepDirection::Forward, 89.5, 0);
        assert_eq!(auto.tick(TimerHandle(0), &settings, &mut timers), Some(90.0));
        assert!(matches!(
            auto,
            AutoPlay::Sweeping {
                direction: SweepDirection::Backward,
                ..
            }
        ));

        let mut auto = sweeping(SweepDirection::Backward, 10.5, 0);
        assert_eq!(auto.tick(TimerHandle(0), &settings, &mut timers), Some(10.0));
        assert!(matches!(
            auto,
            AutoPlay::Sweeping {
                direction: SweepDirection::Forward,
                ..
            }
        ));
    }

    #[test]
    fn cancel_releases_timer() {
        let mut timers = FakeTimers::default();
        let mut auto = AutoPlay::Armed {
            timer: TimerHandle(7),
        };
        assert_eq!(auto.cancel(&mut timers), AutoPlayPhase::Armed);
        assert_eq!(auto, AutoPlay::Idle);
        assert_eq!(timers.cancelled, vec![TimerHandle(7)]);

        assert_eq!(auto.cancel(&mut timers), AutoPlayPhase::Idle);
        assert_eq!(timers.cancelled.len(), 1);
    }
}
