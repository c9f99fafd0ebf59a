//! End-to-end behaviour of the session and injector over the in-memory
//! backends.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use hookbridge_core::clock::MonotonicClock;
use hookbridge_core::coords::ScreenSize;
use hookbridge_core::event::{Channel, InputEvent, MouseButton, Point};
use hookbridge_core::inject::{Injector, InjectorConfig, SyntheticInput};
use hookbridge_core::mock::{MockHookBackend, RecordingSink};
use hookbridge_core::session::{EventFn, HookSession};
use hookbridge_core::translate::{RawMouse, WM_MOUSEWHEEL};

const SCREEN: ScreenSize = ScreenSize {
    width: 65535,
    height: 65535,
};

fn leaked_clock() -> &'static MonotonicClock {
    Box::leak(Box::new(MonotonicClock::new()))
}

fn injector_at(start: Point) -> Injector<RecordingSink> {
    Injector::with_config(
        RecordingSink::new(start, SCREEN),
        leaked_clock(),
        InjectorConfig::default(),
    )
}

#[derive(Clone, Copy, Debug)]
enum Op {
    StartMouse,
    StartKeyboard,
    Stop,
}

#[test]
fn is_active_matches_channel_states_for_all_short_sequences() {
    let ops = [Op::StartMouse, Op::StartKeyboard, Op::Stop];
    let listener = Arc::new(EventFn(|_evt: InputEvent| {}));

    // Every sequence of up to four operations.
    for len in 0..=4u32 {
        for mut code in 0..3usize.pow(len) {
            let session = HookSession::new(MockHookBackend::new(), leaked_clock());
            let (mut mouse, mut keyboard) = (false, false);
            for _ in 0..len {
                let op = ops[code % 3];
                code /= 3;
                match op {
                    Op::StartMouse => {
                        assert_eq!(session.start_mouse(&listener).is_ok(), !mouse, "{op:?}");
                        mouse = true;
                    }
                    Op::StartKeyboard => {
                        assert_eq!(session.start_keyboard(&listener).is_ok(), !keyboard);
                        keyboard = true;
                    }
                    Op::Stop => {
                        session.stop();
                        mouse = false;
                        keyboard = false;
                    }
                }
                assert_eq!(session.is_active(), mouse || keyboard);
                assert_eq!(session.is_channel_active(Channel::Mouse), mouse);
                assert_eq!(session.is_channel_active(Channel::Keyboard), keyboard);
            }
        }
    }
}

#[test]
fn smooth_move_emits_exact_step_count_ending_on_target() {
    let inj = injector_at(Point::new(0, 0));
    inj.move_mouse_smooth(100, 100, 10, 0).unwrap();

    // With a 65535px screen, absolute coordinates equal pixels.
    let moves: Vec<(i32, i32)> = inj
        .sink()
        .inputs()
        .into_iter()
        .map(|input| match input {
            SyntheticInput::MoveAbsolute { abs_x, abs_y } => (abs_x, abs_y),
            other => panic!("unexpected {other:?}"),
        })
        .collect();

    assert_eq!(moves.len(), 10);
    assert_eq!(moves[9], (100, 100));
    assert!(moves.windows(2).all(|w| w[0].0 <= w[1].0 && w[0].1 <= w[1].1));
}

#[test]
fn smooth_move_starts_from_current_cursor() {
    let inj = injector_at(Point::new(50, 80));
    inj.move_mouse_smooth(0, 0, 2, 0).unwrap();
    assert_eq!(
        inj.sink().inputs(),
        vec![
            SyntheticInput::MoveAbsolute { abs_x: 25, abs_y: 40 },
            SyntheticInput::MoveAbsolute { abs_x: 0, abs_y: 0 },
        ]
    );
}

#[test]
fn smooth_move_delays_between_but_not_after_moves() {
    let inj = injector_at(Point::new(0, 0));
    inj.move_mouse_smooth(30, 0, 3, 5).unwrap();

    let timed = inj.sink().timed_inputs();
    assert_eq!(timed.len(), 3);
    for pair in timed.windows(2) {
        assert!(pair[1].0 - pair[0].0 >= Duration::from_millis(5));
    }
}

#[test]
fn click_holds_button_at_least_ten_ms() {
    let inj = injector_at(Point::new(0, 0));
    inj.mouse_click(0).unwrap();

    let timed = inj.sink().timed_inputs();
    assert_eq!(timed.len(), 2);
    assert_eq!(
        timed[0].1,
        SyntheticInput::Button { button: MouseButton::Left, is_down: true }
    );
    assert_eq!(
        timed[1].1,
        SyntheticInput::Button { button: MouseButton::Left, is_down: false }
    );
    assert!(timed[1].0 - timed[0].0 >= Duration::from_millis(10));
}

#[test]
fn configured_key_hold_is_honoured() {
    let inj = Injector::with_config(
        RecordingSink::new(Point::default(), SCREEN),
        leaked_clock(),
        InjectorConfig {
            click_hold_ms: 10.0,
            key_hold_ms: 25.0,
        },
    );
    inj.key_press(0x20).unwrap();
    let timed = inj.sink().timed_inputs();
    assert!(timed[1].0 - timed[0].0 >= Duration::from_millis(25));
}

#[test]
fn invalid_click_emits_nothing() {
    let inj = injector_at(Point::new(0, 0));
    inj.mouse_click(99).unwrap();
    assert!(inj.sink().inputs().is_empty());
}

#[test]
fn wheel_delta_sign_survives_both_directions() {
    let inj = injector_at(Point::new(0, 0));
    inj.mouse_wheel(-120).unwrap();
    assert_eq!(inj.sink().inputs(), vec![SyntheticInput::Wheel { delta: -120 }]);

    // Capture side: the OS packs the same delta into the high word.
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let listener = Arc::new(EventFn(move |evt: InputEvent| sink.lock().push(evt)));
    let session = HookSession::new(MockHookBackend::new(), leaked_clock());
    session.start_mouse(&listener).unwrap();

    let packed = ((-120i16 as u16 as u32) << 16) | 0x0000_0001;
    session.dispatch_mouse(0, WM_MOUSEWHEEL, RawMouse { x: 7, y: 9, mouse_data: packed });
    assert!(matches!(
        seen.lock()[0],
        InputEvent::MouseWheel { delta: -120, x: 7, y: 9, .. }
    ));
}

#[test]
fn capture_and_injection_run_concurrently() {
    let session: &'static HookSession<MockHookBackend> =
        Box::leak(Box::new(HookSession::new(MockHookBackend::new(), leaked_clock())));
    let count = Arc::new(Mutex::new(0u32));
    let counter = Arc::clone(&count);
    let listener = Arc::new(EventFn(move |_evt: InputEvent| *counter.lock() += 1));
    session.start_mouse(&listener).unwrap();

    let capture = std::thread::spawn(move || {
        for i in 0..100 {
            session.dispatch_mouse(
                0,
                hookbridge_core::translate::WM_MOUSEMOVE,
                RawMouse { x: i, y: i, mouse_data: 0 },
            );
        }
    });

    let inj = injector_at(Point::new(0, 0));
    inj.move_mouse_smooth(500, 500, 20, 1).unwrap();
    capture.join().unwrap();

    assert_eq!(*count.lock(), 100);
    assert_eq!(inj.sink().inputs().len(), 20);
}
