//! Synthetic input exports.  All calls block the calling thread for their
//! full duration.

use hookbridge_core::errors::HookBridgeError;
use hookbridge_core::inject::Injector;
use hookbridge_core::win32::send::SendInputSink;

fn injector() -> Injector<SendInputSink> {
    Injector::new(SendInputSink)
}

/// The host ABI has no error channel for injection; failures are logged.
fn report(op: &str, result: Result<(), HookBridgeError>) {
    if let Err(e) = result {
        log::debug!("{op}: {e}");
    }
}

#[no_mangle]
pub extern "C" fn MoveMouse(x: i32, y: i32) {
    report("MoveMouse", injector().move_mouse(x, y));
}

#[no_mangle]
pub extern "C" fn MoveMouseSmooth(target_x: i32, target_y: i32, steps: i32, delay_ms: i32) {
    report(
        "MoveMouseSmooth",
        injector().move_mouse_smooth(target_x, target_y, steps, delay_ms),
    );
}

/// `button`: 0 left, 1 right, 2 middle.  Other values are ignored.
#[no_mangle]
pub extern "C" fn MouseButtonDown(button: i32) {
    report("MouseButtonDown", injector().mouse_button_down(button));
}

#[no_mangle]
pub extern "C" fn MouseButtonUp(button: i32) {
    report("MouseButtonUp", injector().mouse_button_up(button));
}

#[no_mangle]
pub extern "C" fn MouseClick(button: i32) {
    report("MouseClick", injector().mouse_click(button));
}

/// `delta` in WHEEL_DELTA units (120 = one notch away from the user).
#[no_mangle]
pub extern "C" fn MouseWheel(delta: i32) {
    report("MouseWheel", injector().mouse_wheel(delta));
}

#[no_mangle]
pub extern "C" fn KeyDown(key_code: i32) {
    report("KeyDown", injector().key_down(key_code as u16));
}

#[no_mangle]
pub extern "C" fn KeyUp(key_code: i32) {
    report("KeyUp", injector().key_up(key_code as u16));
}

#[no_mangle]
pub extern "C" fn KeyPress(key_code: i32) {
    report("KeyPress", injector().key_press(key_code as u16));
}
