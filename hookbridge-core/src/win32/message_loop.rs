//! Message pump for threads that host the low-level hooks.
//!
//! A `WH_*_LL` hook proc only runs while its installing thread pumps
//! messages.  Hosts with their own UI loop do not need this; the CLI
//! recorder does.

use std::sync::atomic::{AtomicU32, Ordering};

use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, PostThreadMessageW, TranslateMessage, MSG, WM_QUIT,
};

/// Thread currently inside [`run_message_loop`], or 0.
static PUMP_THREAD_ID: AtomicU32 = AtomicU32::new(0);

/// Pump messages on the calling thread until `WM_QUIT` arrives.
pub fn run_message_loop() {
    let thread_id = unsafe { GetCurrentThreadId() };
    PUMP_THREAD_ID.store(thread_id, Ordering::SeqCst);
    log::debug!("message loop starting on thread {thread_id}");

    let mut msg = MSG::default();
    unsafe {
        // GetMessageW: >0 message, 0 WM_QUIT, -1 error.
        loop {
            match GetMessageW(&mut msg, None, 0, 0).0 {
                0 => break,
                -1 => {
                    log::error!(
                        "GetMessageW failed: {}",
                        windows::core::Error::from_win32()
                    );
                    break;
                }
                _ => {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            }
        }
    }

    PUMP_THREAD_ID.store(0, Ordering::SeqCst);
    log::debug!("message loop exited");
}

/// Ask the pumping thread to leave [`run_message_loop`].  Callable from any
/// thread, including signal handlers.
pub fn post_quit_message(exit_code: i32) {
    let thread_id = PUMP_THREAD_ID.load(Ordering::SeqCst);
    if thread_id == 0 {
        log::warn!("no message loop running; quit request ignored");
        return;
    }

    let posted = unsafe {
        PostThreadMessageW(thread_id, WM_QUIT, WPARAM(exit_code as usize), LPARAM(0))
    };
    if let Err(e) = posted {
        log::error!("failed to post WM_QUIT to thread {thread_id}: {e}");
    }
}
