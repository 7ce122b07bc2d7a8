//! Property-based invariant tests for the slider's animation math.
//!
//! 1. Clamping always lands in [1, 99] and is the identity inside the domain
//! 2. Smoothing shrinks the distance to target by exactly 0.85 per frame
//! 3. Smoothing always settles exactly on the target
//! 4. Label opacities stay in [0, 1] and offsets keep their sign
//! 5. Pointer fractions stay in [0, 100]

use juxta_core::animation::{Step, approach};
use juxta_core::geometry::{POSITION_MAX, POSITION_MIN, WrapperRect, clamp_position};
use juxta_core::visual::{LabelVisual, VisualFrame};
use proptest::prelude::*;

const FACTOR: f64 = 0.15;
const EPSILON: f64 = 0.1;

fn position_strategy() -> impl Strategy<Value = f64> {
    POSITION_MIN..=POSITION_MAX
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Clamping
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamp_lands_in_domain(value in any::<f64>()) {
        let clamped = clamp_position(value);
        prop_assert!((POSITION_MIN..=POSITION_MAX).contains(&clamped));
    }

    #[test]
    fn clamp_is_identity_inside_domain(value in position_strategy()) {
        prop_assert_eq!(clamp_position(value), value);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2–3. Smoothing
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn smoothing_distance_ratio_is_constant(
        start in position_strategy(),
        target in position_strategy(),
    ) {
        let mut current = start;
        for _ in 0..200 {
            let before = (target - current).abs();
            match approach(current, target, FACTOR, EPSILON) {
                Step::Continue(next) => {
                    let after = (target - next).abs();
                    prop_assert!(after < before, "distance must shrink");
                    prop_assert!((after - before * (1.0 - FACTOR)).abs() < 1e-9);
                    current = next;
                }
                Step::Settled(value) => {
                    prop_assert_eq!(value, target);
                    return Ok(());
                }
            }
        }
        prop_assert!(false, "did not settle within 200 frames");
    }

    #[test]
    fn smoothing_stays_between_start_and_target(
        start in position_strategy(),
        target in position_strategy(),
    ) {
        let (lo, hi) = if start < target { (start, target) } else { (target, start) };
        let mut current = start;
        loop {
            let step = approach(current, target, FACTOR, EPSILON);
            prop_assert!(step.value() >= lo && step.value() <= hi);
            match step {
                Step::Continue(next) => current = next,
                Step::Settled(_) => break,
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Labels and frames
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn label_visuals_are_bounded(position in position_strategy()) {
        let before = LabelVisual::before(position);
        let after = LabelVisual::after(position);
        prop_assert!((0.0..=1.0).contains(&before.opacity));
        prop_assert!((0.0..=1.0).contains(&after.opacity));
        prop_assert!(before.offset_px >= 0.0);
        prop_assert!(after.offset_px <= 0.0);
    }

    #[test]
    fn frame_clip_and_offset_are_consistent(position in position_strategy(), dragging in any::<bool>()) {
        let frame = VisualFrame::compute(position, dragging);
        prop_assert!((frame.after_clip_right + frame.handle_offset - 50.0).abs() < 1e-9);
        prop_assert!(frame.aria_value_now >= 1 && frame.aria_value_now <= 99);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Pointer fractions
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fraction_is_bounded(
        left in -1_000.0f64..1_000.0,
        width in 1.0f64..4_000.0,
        client_x in -5_000.0f64..5_000.0,
    ) {
        let rect = WrapperRect::new(left, 0.0, width, 100.0);
        let fraction = rect.fraction_percent(client_x);
        prop_assert!((0.0..=100.0).contains(&fraction));
    }
}
