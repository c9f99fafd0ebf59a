//! C ABI DLL for hookbridge -- loadable by P/Invoke, ctypes, or any FFI consumer.
//!
//! Export names match what existing hosts import (`StartMouseHook`,
//! `MoveMouse`, ...).  Conventions:
//! - Exports use the C calling convention; host callbacks use `stdcall`
//!   (`extern "system"`).
//! - `Start*` return `false` on failure; the reason is retrievable via
//!   `HookBridgeLastError()` on the same thread.
//! - Injection exports return nothing; submission failures are logged and
//!   dropped.
//! - Hook callbacks run on the thread that called `Start*`, which must pump
//!   messages.

#![allow(non_snake_case)]

use std::cell::RefCell;
use std::ffi::{c_char, CString};
use std::ptr;

use hookbridge_core::{clock, wait};

pub mod listener;

#[cfg(windows)]
mod capture;
#[cfg(windows)]
mod synth;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

#[cfg_attr(not(windows), allow(dead_code))]
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

#[cfg_attr(not(windows), allow(dead_code))]
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Retrieve the last error message (thread-local).
///
/// Returns a pointer valid until the next hookbridge call on this thread
/// that reports an error.  Returns null if the last `Start*` call succeeded.
#[no_mangle]
pub extern "C" fn HookBridgeLastError() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(ptr::null())
    })
}

/// Milliseconds since the session clock epoch (first use in this process).
#[no_mangle]
pub extern "C" fn GetTimestamp() -> f64 {
    clock::global().now_ms()
}

/// Block for `milliseconds`, sleeping coarsely then spinning the last
/// millisecond.  Non-positive values return immediately.
#[no_mangle]
pub extern "C" fn PreciseSleep(milliseconds: f64) {
    wait::precise_sleep(milliseconds);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::time::{Duration, Instant};

    #[test]
    fn test_last_error_round_trip() {
        set_last_error("AlreadyActive: mouse hook is already installed");
        let msg = unsafe { CStr::from_ptr(HookBridgeLastError()) };
        assert_eq!(msg.to_str().unwrap(), "AlreadyActive: mouse hook is already installed");

        clear_last_error();
        assert!(HookBridgeLastError().is_null());
    }

    #[test]
    fn test_timestamp_non_decreasing() {
        let a = GetTimestamp();
        let b = GetTimestamp();
        assert!(b >= a);
    }

    #[test]
    fn test_precise_sleep_non_positive_is_instant() {
        let start = Instant::now();
        PreciseSleep(0.0);
        PreciseSleep(-5.0);
        assert!(start.elapsed() < Duration::from_millis(1));
    }
}
