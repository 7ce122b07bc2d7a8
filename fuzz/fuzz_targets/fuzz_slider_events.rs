#![no_main]

use core::time::Duration;

use arbitrary::Arbitrary;
use juxta_core::config::SliderConfig;
use juxta_core::event::{
    ClickEvent, InputEvent, InteractionKind, KeyCode, KeyEvent, Modifiers, MouseButton,
    PointerKind,
};
use juxta_core::geometry::{POSITION_MAX, POSITION_MIN};
use juxta_harness::Harness;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Press { touch: bool, button: u8 },
    Move { touch: bool, x: i16 },
    Release { touch: bool },
    Click { x: i16, y: i16, on_handle: bool },
    Key { code: u8, shift: bool },
    Interaction(u8),
    Show(u8),
    Resize,
    SetPosition { target: i16, smooth: bool },
    Advance(u16),
}

fn kind(touch: bool) -> PointerKind {
    if touch {
        PointerKind::Touch
    } else {
        PointerKind::Mouse
    }
}

fn key_code(code: u8) -> KeyCode {
    match code % 8 {
        0 => KeyCode::Left,
        1 => KeyCode::Right,
        2 => KeyCode::Home,
        3 => KeyCode::End,
        4 => KeyCode::Enter,
        5 => KeyCode::Char(' '),
        6 => KeyCode::Char(char::from(b'a' + code % 26)),
        _ => KeyCode::Other,
    }
}

fn event(op: &Op) -> Option<InputEvent> {
    Some(match *op {
        Op::Press { touch, button } => InputEvent::PointerDown {
            kind: kind(touch),
            button: MouseButton::from_dom(i16::from(button % 3)),
        },
        Op::Move { touch, x } => InputEvent::PointerMove {
            kind: kind(touch),
            client_x: f64::from(x),
        },
        Op::Release { touch } => InputEvent::PointerUp { kind: kind(touch) },
        Op::Click { x, y, on_handle } => {
            let click = ClickEvent::new(f64::from(x), f64::from(y));
            InputEvent::Click(if on_handle { click.on_handle() } else { click })
        }
        Op::Key { code, shift } => {
            let modifiers = if shift { Modifiers::SHIFT } else { Modifiers::NONE };
            InputEvent::Key(KeyEvent::new(key_code(code)).with_modifiers(modifiers))
        }
        Op::Interaction(n) => InputEvent::Interaction(match n % 4 {
            0 => InteractionKind::Press,
            1 => InteractionKind::TouchStart,
            2 => InteractionKind::KeyDown,
            _ => InteractionKind::Click,
        }),
        Op::Show(ratio) => InputEvent::Visibility {
            ratio: f64::from(ratio) / 255.0,
        },
        Op::Resize => InputEvent::Resize,
        Op::SetPosition { .. } | Op::Advance(_) => return None,
    })
}

fuzz_target!(|ops: Vec<Op>| {
    let mut h = Harness::new(SliderConfig::default()).expect("default config mounts");
    for op in ops.iter().take(256) {
        match *op {
            Op::SetPosition { target, smooth } => h.set_position(f64::from(target), smooth),
            Op::Advance(ms) => {
                h.advance(Duration::from_millis(u64::from(ms)));
            }
            _ => {
                if let Some(event) = event(op) {
                    h.send(event);
                }
            }
        }

        let slider = h.slider();
        assert!((POSITION_MIN..=POSITION_MAX).contains(&slider.position()));
        assert!((POSITION_MIN..=POSITION_MAX).contains(&slider.target()));
        assert!(!(slider.is_dragging() && slider.is_auto_playing()));
        assert!(h.backend().pending_frames() <= 1);
    }

    h.dispose();
    assert_eq!(h.backend().pending_frames(), 0);
    assert_eq!(h.backend().pending_timers(), 0);
});
