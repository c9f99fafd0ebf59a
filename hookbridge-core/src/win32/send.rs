//! Synthetic input submission via Win32 `SendInput`.
//!
//! Each [`SyntheticInput`] becomes exactly one `INPUT` record and one
//! `SendInput` call, so the event stream the OS sees matches the order and
//! spacing the injector produces.

use windows::Win32::Foundation::POINT;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_KEYUP, MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
    MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_MOVE, MOUSEEVENTF_RIGHTDOWN,
    MOUSEEVENTF_RIGHTUP, MOUSEEVENTF_WHEEL, MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN,
};

use crate::coords::ScreenSize;
use crate::errors::HookBridgeError;
use crate::event::{MouseButton, Point};
use crate::inject::{InputSink, SyntheticInput};

/// Pre-computed size of `INPUT` struct for `SendInput` calls.
const INPUT_SIZE: i32 = std::mem::size_of::<INPUT>() as i32;

/// Flags for an absolute move on the primary screen.
const ABSOLUTE_MOVE: MOUSE_EVENT_FLAGS =
    MOUSE_EVENT_FLAGS(MOUSEEVENTF_ABSOLUTE.0 | MOUSEEVENTF_MOVE.0);

// ---------------------------------------------------------------------------
// Helpers: build INPUT structs
// ---------------------------------------------------------------------------

fn virtual_key_input(vk: u16, key_up: bool) -> INPUT {
    let flags = if key_up {
        KEYEVENTF_KEYUP
    } else {
        KEYBD_EVENT_FLAGS(0)
    };

    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(vk),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn mouse_input(dx: i32, dy: i32, data: i32, flags: MOUSE_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx,
                dy,
                // Win32 treats mouseData as signed for WHEEL events.
                // `as u32` is a bitwise reinterpret, preserving the sign bits.
                mouseData: data as u32,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn button_flags(button: MouseButton, is_down: bool) -> MOUSE_EVENT_FLAGS {
    match (button, is_down) {
        (MouseButton::Left, true) => MOUSEEVENTF_LEFTDOWN,
        (MouseButton::Left, false) => MOUSEEVENTF_LEFTUP,
        (MouseButton::Right, true) => MOUSEEVENTF_RIGHTDOWN,
        (MouseButton::Right, false) => MOUSEEVENTF_RIGHTUP,
        (MouseButton::Middle, true) => MOUSEEVENTF_MIDDLEDOWN,
        (MouseButton::Middle, false) => MOUSEEVENTF_MIDDLEUP,
    }
}

fn to_win32(input: SyntheticInput) -> INPUT {
    match input {
        SyntheticInput::MoveAbsolute { abs_x, abs_y } => mouse_input(abs_x, abs_y, 0, ABSOLUTE_MOVE),
        SyntheticInput::Button { button, is_down } => {
            mouse_input(0, 0, 0, button_flags(button, is_down))
        }
        SyntheticInput::Wheel { delta } => mouse_input(0, 0, delta, MOUSEEVENTF_WHEEL),
        SyntheticInput::Key { code, is_down } => virtual_key_input(code, !is_down),
    }
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// [`InputSink`] backed by `SendInput`, `GetCursorPos` and
/// `GetSystemMetrics`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendInputSink;

impl InputSink for SendInputSink {
    fn submit(&self, input: SyntheticInput) -> Result<(), HookBridgeError> {
        let sent = unsafe { SendInput(&[to_win32(input)], INPUT_SIZE) };
        if sent == 1 {
            Ok(())
        } else {
            // Blocked by UIPI or another process holding the input desktop.
            let err = windows::core::Error::from_win32();
            log::debug!("SendInput rejected {input:?}: {err}");
            Err(err.into())
        }
    }

    fn cursor_pos(&self) -> Result<Point, HookBridgeError> {
        let mut pt = POINT::default();
        unsafe { GetCursorPos(&mut pt)? };
        Ok(Point::new(pt.x, pt.y))
    }

    fn screen_size(&self) -> ScreenSize {
        unsafe {
            ScreenSize {
                width: GetSystemMetrics(SM_CXSCREEN),
                height: GetSystemMetrics(SM_CYSCREEN),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_sign_bits_survive() {
        let input = to_win32(SyntheticInput::Wheel { delta: -120 });
        let mi = unsafe { input.Anonymous.mi };
        assert_eq!(mi.mouseData as i32, -120);
        assert_eq!(mi.dwFlags, MOUSEEVENTF_WHEEL);
    }

    #[test]
    fn test_key_up_flag() {
        let up = to_win32(SyntheticInput::Key { code: 0x41, is_down: false });
        let down = to_win32(SyntheticInput::Key { code: 0x41, is_down: true });
        unsafe {
            assert_eq!(up.Anonymous.ki.dwFlags, KEYEVENTF_KEYUP);
            assert_eq!(down.Anonymous.ki.dwFlags, KEYBD_EVENT_FLAGS(0));
            assert_eq!(down.Anonymous.ki.wVk, VIRTUAL_KEY(0x41));
        }
    }

    #[test]
    fn test_absolute_move_flags() {
        let input = to_win32(SyntheticInput::MoveAbsolute { abs_x: 100, abs_y: 200 });
        let mi = unsafe { input.Anonymous.mi };
        assert_eq!((mi.dx, mi.dy), (100, 200));
        assert_eq!(mi.dwFlags, ABSOLUTE_MOVE);
    }
}
