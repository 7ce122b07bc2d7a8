//! Property-based invariant tests for the slider state machine.
//!
//! 1. Immediate moves land exactly on the clamped target
//! 2. Smooth moves converge exactly on the clamped target
//! 3. Repeating an immediate move is observably idempotent
//! 4. Across arbitrary interaction sequences:
//!    - dragging and sweeping are never both active
//!    - position and target stay inside [1, 99]
//!    - at most one frame is outstanding
//! 5. Disposal after any sequence leaves nothing pending

use core::time::Duration;

use juxta_core::config::SliderConfig;
use juxta_core::event::{ClickEvent, InputEvent, InteractionKind, KeyCode, PointerKind};
use juxta_core::geometry::{POSITION_MAX, POSITION_MIN, clamp_position};
use juxta_harness::Harness;
use proptest::prelude::*;

fn harness() -> Harness {
    let mut h = Harness::new(SliderConfig::default()).expect("mount");
    h.advance(Duration::from_millis(600));
    h
}

#[derive(Debug, Clone)]
enum Op {
    Press(PointerKind),
    Move(f64),
    Release,
    Click(f64),
    Key(KeyCode),
    Interaction(InteractionKind),
    Show(f64),
    Resize,
    SetPosition(f64, bool),
    Advance(u64),
}

fn pointer_kind() -> impl Strategy<Value = PointerKind> {
    prop_oneof![Just(PointerKind::Mouse), Just(PointerKind::Touch)]
}

fn key_code() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        Just(KeyCode::Left),
        Just(KeyCode::Right),
        Just(KeyCode::Home),
        Just(KeyCode::End),
        Just(KeyCode::Enter),
        Just(KeyCode::Char(' ')),
        Just(KeyCode::Char('a')),
        Just(KeyCode::Char('D')),
        Just(KeyCode::Other),
    ]
}

fn interaction() -> impl Strategy<Value = InteractionKind> {
    prop_oneof![
        Just(InteractionKind::Press),
        Just(InteractionKind::TouchStart),
        Just(InteractionKind::KeyDown),
        Just(InteractionKind::Click),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        pointer_kind().prop_map(Op::Press),
        (-20.0f64..120.0).prop_map(Op::Move),
        Just(Op::Release),
        (0.0f64..100.0).prop_map(Op::Click),
        key_code().prop_map(Op::Key),
        interaction().prop_map(Op::Interaction),
        (0.0f64..=1.0).prop_map(Op::Show),
        Just(Op::Resize),
        (-50.0f64..150.0, any::<bool>()).prop_map(|(t, s)| Op::SetPosition(t, s)),
        (0u64..4_000).prop_map(Op::Advance),
    ]
}

fn apply(h: &mut Harness, op: &Op) {
    match *op {
        Op::Press(kind) => {
            h.press(kind);
        }
        Op::Move(percent) => {
            h.drag_to(PointerKind::Mouse, percent);
        }
        Op::Release => {
            h.release(PointerKind::Mouse);
        }
        Op::Click(percent) => {
            let x = percent * 10.0;
            h.send(InputEvent::Click(ClickEvent::new(x, 10.0)));
        }
        Op::Key(code) => {
            h.key(code);
        }
        Op::Interaction(kind) => {
            h.send(InputEvent::Interaction(kind));
        }
        Op::Show(ratio) => {
            h.show(ratio);
        }
        Op::Resize => {
            h.send(InputEvent::Resize);
        }
        Op::SetPosition(target, smooth) => h.set_position(target, smooth),
        Op::Advance(ms) => {
            h.advance(Duration::from_millis(ms));
        }
    }
}

fn in_domain(value: f64) -> bool {
    (POSITION_MIN..=POSITION_MAX).contains(&value)
}

// ═══════════════════════════════════════════════════════════════════════
// 1–3. set_position
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn immediate_move_lands_on_clamped_target(target in -1_000.0f64..1_000.0) {
        let mut h = harness();
        h.set_position(target, false);
        h.advance(Duration::from_millis(16));
        prop_assert_eq!(h.position(), clamp_position(target));
        prop_assert!(!h.slider().is_animating());
    }

    #[test]
    fn smooth_move_converges_exactly(target in -1_000.0f64..1_000.0) {
        let mut h = harness();
        h.set_position(target, true);
        let frames = h.settle();
        prop_assert!(frames < 100, "took {} frames", frames);
        prop_assert_eq!(h.position(), clamp_position(target));
    }

    #[test]
    fn immediate_move_is_idempotent(target in -200.0f64..200.0) {
        let mut once = harness();
        once.set_position(target, false);
        once.advance(Duration::from_millis(16));

        let mut twice = harness();
        twice.set_position(target, false);
        twice.set_position(target, false);
        twice.advance(Duration::from_millis(16));

        prop_assert_eq!(once.position(), twice.position());
        prop_assert_eq!(once.slider().target(), twice.slider().target());
        prop_assert_eq!(
            once.backend().outputs().last_frame(),
            twice.backend().outputs().last_frame()
        );
        prop_assert_eq!(once.backend().pending_frames(), twice.backend().pending_frames());
        prop_assert_eq!(once.backend().pending_timers(), twice.backend().pending_timers());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4–5. Arbitrary interaction sequences
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn state_invariants_hold_across_sequences(ops in proptest::collection::vec(op(), 1..60)) {
        let mut h = harness();
        for op in &ops {
            apply(&mut h, op);
            let slider = h.slider();
            prop_assert!(
                !(slider.is_dragging() && slider.is_auto_playing()),
                "dragging and sweeping after {:?}", op
            );
            prop_assert!(in_domain(slider.position()), "position {}", slider.position());
            prop_assert!(in_domain(slider.target()), "target {}", slider.target());
            prop_assert!(h.backend().pending_frames() <= 1);
        }
    }

    #[test]
    fn dispose_leaves_nothing_pending(ops in proptest::collection::vec(op(), 0..40)) {
        let mut h = harness();
        for op in &ops {
            apply(&mut h, op);
        }
        h.dispose();
        prop_assert_eq!(h.backend().pending_frames(), 0);
        prop_assert_eq!(h.backend().pending_timers(), 0);
        prop_assert!(h.backend().outputs().live_ripples.is_empty());
        prop_assert!(!h.backend().outputs().drag_feedback);

        let position = h.position();
        h.advance(Duration::from_millis(10_000));
        prop_assert_eq!(h.position(), position);
    }
}
