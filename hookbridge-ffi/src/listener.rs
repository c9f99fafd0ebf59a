//! Adapters from host function pointers to the core listener traits.
//!
//! A null pointer disables that event kind.  The adapters are held
//! strongly by the DLL's globals; the session only sees `Weak` references.

use hookbridge_core::event::MouseButton;
use hookbridge_core::session::{KeyboardListener, MouseListener};

pub type MouseMoveCallback = extern "system" fn(x: i32, y: i32, timestamp: f64);
pub type MouseButtonCallback =
    extern "system" fn(button: i32, is_down: bool, x: i32, y: i32, timestamp: f64);
pub type MouseWheelCallback = extern "system" fn(delta: i32, x: i32, y: i32, timestamp: f64);
pub type KeyboardCallback = extern "system" fn(key_code: i32, is_down: bool, timestamp: f64);

pub struct CallbackMouseListener {
    pub on_move: Option<MouseMoveCallback>,
    pub on_button: Option<MouseButtonCallback>,
    pub on_wheel: Option<MouseWheelCallback>,
}

impl MouseListener for CallbackMouseListener {
    fn on_move(&self, x: i32, y: i32, t: f64) {
        if let Some(cb) = self.on_move {
            cb(x, y, t);
        }
    }

    fn on_button(&self, button: MouseButton, is_down: bool, x: i32, y: i32, t: f64) {
        if let Some(cb) = self.on_button {
            cb(button.id(), is_down, x, y, t);
        }
    }

    fn on_wheel(&self, delta: i32, x: i32, y: i32, t: f64) {
        if let Some(cb) = self.on_wheel {
            cb(delta, x, y, t);
        }
    }
}

pub struct CallbackKeyboardListener {
    pub on_key: Option<KeyboardCallback>,
}

impl KeyboardListener for CallbackKeyboardListener {
    fn on_key(&self, code: u32, is_down: bool, t: f64) {
        if let Some(cb) = self.on_key {
            // Virtual-key codes fit in a byte; the host ABI takes int.
            cb(code as i32, is_down, t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use hookbridge_core::clock::MonotonicClock;
    use hookbridge_core::mock::MockHookBackend;
    use hookbridge_core::session::HookSession;
    use hookbridge_core::translate::{
        RawKey, RawMouse, WM_KEYUP, WM_MOUSEWHEEL, WM_RBUTTONDOWN,
    };
    use parking_lot::Mutex;

    // Host callbacks are plain fn pointers, so they report through statics.
    static BUTTONS: Mutex<Vec<(i32, bool, i32, i32)>> = Mutex::new(Vec::new());
    static WHEELS: Mutex<Vec<i32>> = Mutex::new(Vec::new());
    static KEYS: Mutex<Vec<(i32, bool)>> = Mutex::new(Vec::new());

    extern "system" fn record_button(button: i32, is_down: bool, x: i32, y: i32, _t: f64) {
        BUTTONS.lock().push((button, is_down, x, y));
    }

    extern "system" fn record_wheel(delta: i32, _x: i32, _y: i32, _t: f64) {
        WHEELS.lock().push(delta);
    }

    extern "system" fn record_key(key_code: i32, is_down: bool, _t: f64) {
        KEYS.lock().push((key_code, is_down));
    }

    fn session() -> HookSession<MockHookBackend> {
        let clock: &'static MonotonicClock = Box::leak(Box::new(MonotonicClock::new()));
        HookSession::new(MockHookBackend::new(), clock)
    }

    #[test]
    fn test_mouse_callbacks_receive_host_ids() {
        let s = session();
        let listener = Arc::new(CallbackMouseListener {
            on_move: None,
            on_button: Some(record_button),
            on_wheel: Some(record_wheel),
        });
        s.start_mouse(&listener).unwrap();

        s.dispatch_mouse(0, WM_RBUTTONDOWN, RawMouse { x: 4, y: 5, mouse_data: 0 });
        s.dispatch_mouse(0, WM_MOUSEWHEEL, RawMouse { x: 0, y: 0, mouse_data: 0xFF88_0000 });

        assert!(BUTTONS.lock().contains(&(1, true, 4, 5)));
        assert!(WHEELS.lock().contains(&-120));
    }

    #[test]
    fn test_null_callback_is_skipped() {
        let s = session();
        let listener = Arc::new(CallbackMouseListener {
            on_move: None,
            on_button: None,
            on_wheel: None,
        });
        s.start_mouse(&listener).unwrap();
        s.dispatch_mouse(0, WM_RBUTTONDOWN, RawMouse { x: 0, y: 0, mouse_data: 0 });
        assert!(s.is_active());
    }

    #[test]
    fn test_key_callback_passes_code_through() {
        let s = session();
        let listener = Arc::new(CallbackKeyboardListener {
            on_key: Some(record_key),
        });
        s.start_keyboard(&listener).unwrap();
        s.dispatch_keyboard(0, WM_KEYUP, RawKey { vk_code: 0xA2 });
        assert!(KEYS.lock().contains(&(0xA2, false)));
    }
}
