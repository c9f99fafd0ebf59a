//! Raw hook notification -> [`InputEvent`] translation.
//!
//! The low-level hook procs hand over the window-message id from `wParam`
//! and the fields read out of `MSLLHOOKSTRUCT` / `KBDLLHOOKSTRUCT`.  The
//! translation itself is pure so it can be tested without installing hooks.

use crate::event::{InputEvent, MouseButton};

// Window message ids delivered in `wParam` to low-level hooks (winuser.h).
pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_MBUTTONDOWN: u32 = 0x0207;
pub const WM_MBUTTONUP: u32 = 0x0208;
pub const WM_MOUSEWHEEL: u32 = 0x020A;
pub const WM_KEYDOWN: u32 = 0x0100;
pub const WM_KEYUP: u32 = 0x0101;
pub const WM_SYSKEYDOWN: u32 = 0x0104;
pub const WM_SYSKEYUP: u32 = 0x0105;

/// Fields of `MSLLHOOKSTRUCT` the translator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMouse {
    pub x: i32,
    pub y: i32,
    pub mouse_data: u32,
}

/// Fields of `KBDLLHOOKSTRUCT` the translator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKey {
    pub vk_code: u32,
}

/// Signed wheel delta packed in the high word of `mouseData`
/// (`GET_WHEEL_DELTA_WPARAM`).
#[inline]
pub fn wheel_delta(mouse_data: u32) -> i32 {
    ((mouse_data >> 16) as u16 as i16) as i32
}

/// Translate a mouse hook notification.
///
/// Returns `None` for messages outside the event model (X buttons,
/// horizontal wheel, ...).
pub fn translate_mouse(msg: u32, raw: RawMouse, t: f64) -> Option<InputEvent> {
    let RawMouse { x, y, mouse_data } = raw;
    let button = |button, is_down| InputEvent::MouseButton {
        button,
        is_down,
        x,
        y,
        t,
    };

    let event = match msg {
        WM_MOUSEMOVE => InputEvent::MouseMove { x, y, t },
        WM_LBUTTONDOWN => button(MouseButton::Left, true),
        WM_LBUTTONUP => button(MouseButton::Left, false),
        WM_RBUTTONDOWN => button(MouseButton::Right, true),
        WM_RBUTTONUP => button(MouseButton::Right, false),
        WM_MBUTTONDOWN => button(MouseButton::Middle, true),
        WM_MBUTTONUP => button(MouseButton::Middle, false),
        WM_MOUSEWHEEL => InputEvent::MouseWheel {
            delta: wheel_delta(mouse_data),
            x,
            y,
            t,
        },
        _ => return None,
    };
    Some(event)
}

/// Translate a keyboard hook notification.  `WM_SYS*` variants count as
/// ordinary key transitions.
pub fn translate_keyboard(msg: u32, raw: RawKey, t: f64) -> Option<InputEvent> {
    let is_down = match msg {
        WM_KEYDOWN | WM_SYSKEYDOWN => true,
        WM_KEYUP | WM_SYSKEYUP => false,
        _ => return None,
    };
    Some(InputEvent::Key {
        code: raw.vk_code,
        is_down,
        t,
    })
}
