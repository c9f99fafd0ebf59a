//! Hook lifecycle exports.

use std::sync::Arc;

use parking_lot::Mutex;

use hookbridge_core::win32::hooks::session;

use crate::listener::{
    CallbackKeyboardListener, CallbackMouseListener, KeyboardCallback, MouseButtonCallback,
    MouseMoveCallback, MouseWheelCallback,
};
use crate::{clear_last_error, set_last_error};

// Strong references for the listeners the session holds weakly.
static MOUSE_LISTENER: Mutex<Option<Arc<CallbackMouseListener>>> = Mutex::new(None);
static KEYBOARD_LISTENER: Mutex<Option<Arc<CallbackKeyboardListener>>> = Mutex::new(None);

/// Install the low-level mouse hook.
///
/// Returns `false` if the mouse hook is already active (existing callbacks
/// stay registered) or Windows refused the hook.
#[no_mangle]
pub extern "C" fn StartMouseHook(
    move_callback: Option<MouseMoveCallback>,
    button_callback: Option<MouseButtonCallback>,
    wheel_callback: Option<MouseWheelCallback>,
) -> bool {
    let listener = Arc::new(CallbackMouseListener {
        on_move: move_callback,
        on_button: button_callback,
        on_wheel: wheel_callback,
    });
    match session().start_mouse(&listener) {
        Ok(()) => {
            *MOUSE_LISTENER.lock() = Some(listener);
            clear_last_error();
            true
        }
        Err(e) => {
            log::warn!("StartMouseHook: {e}");
            set_last_error(&e.to_string());
            false
        }
    }
}

/// Install the low-level keyboard hook.
#[no_mangle]
pub extern "C" fn StartKeyboardHook(key_callback: Option<KeyboardCallback>) -> bool {
    let listener = Arc::new(CallbackKeyboardListener {
        on_key: key_callback,
    });
    match session().start_keyboard(&listener) {
        Ok(()) => {
            *KEYBOARD_LISTENER.lock() = Some(listener);
            clear_last_error();
            true
        }
        Err(e) => {
            log::warn!("StartKeyboardHook: {e}");
            set_last_error(&e.to_string());
            false
        }
    }
}

/// Remove both hooks and forget the callbacks.  Safe to call repeatedly.
#[no_mangle]
pub extern "C" fn StopHooks() {
    session().stop();
    MOUSE_LISTENER.lock().take();
    KEYBOARD_LISTENER.lock().take();
}

/// `true` while either hook is installed.
#[no_mangle]
pub extern "C" fn IsHookActive() -> bool {
    session().is_active()
}
