#![forbid(unsafe_code)]

//! Exponential smoothing toward a target.
//!
//! Each frame moves the displayed value a fixed fraction of the remaining
//! distance:
//!
//!   current' = current + (target - current) × factor
//!
//! # Invariants
//!
//! 1. With `factor` in `(0, 1]`, the distance to target shrinks every frame
//!    to exactly `(1 - factor)` of its previous value.
//! 2. Once the distance is within `epsilon`, the value snaps to `target` and
//!    the approach reports [`Step::Settled`].
//! 3. A value already within `epsilon` settles without moving past `target`.
//!
//! # Failure Modes
//!
//! - Non-finite inputs settle immediately on `target`.

/// Outcome of one smoothing frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Still approaching; the new displayed value.
    Continue(f64),
    /// Reached the target exactly.
    Settled(f64),
}

impl Step {
    /// The displayed value after this step.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Continue(v) | Self::Settled(v) => v,
        }
    }

    /// Whether another frame is required.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Settled(_))
    }
}

/// Advance `current` one frame toward `target`.
#[must_use]
pub fn approach(current: f64, target: f64, factor: f64, epsilon: f64) -> Step {
    if !current.is_finite() || !factor.is_finite() {
        return Step::Settled(target);
    }
    let next = current + (target - current) * factor;
    if (next - target).abs() <= epsilon {
        Step::Settled(target)
    } else {
        Step::Continue(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_covers_factor_of_distance() {
        let step = approach(50.0, 99.0, 0.15, 0.1);
        assert_eq!(step, Step::Continue(50.0 + 49.0 * 0.15));
    }

    #[test]
    fn snaps_within_epsilon() {
        let step = approach(98.95, 99.0, 0.15, 0.1);
        assert_eq!(step, Step::Settled(99.0));
        assert!(step.is_settled());
    }

    #[test]
    fn already_at_target_settles() {
        assert_eq!(approach(50.0, 50.0, 0.15, 0.1), Step::Settled(50.0));
    }

    #[test]
    fn converges_within_bounded_frames() {
        let mut current = 1.0;
        let mut frames = 0;
        loop {
            frames += 1;
            match approach(current, 99.0, 0.15, 0.1) {
                Step::Continue(v) => current = v,
                Step::Settled(v) => {
                    assert_eq!(v, 99.0);
                    break;
                }
            }
            assert!(frames < 100, "smoothing did not converge");
        }
        // ln(0.1 / 98) / ln(0.85) ≈ 42.4
        assert_eq!(frames, 43);
    }

    #[test]
    fn non_finite_current_settles() {
        assert_eq!(approach(f64::NAN, 10.0, 0.15, 0.1), Step::Settled(10.0));
    }
}
