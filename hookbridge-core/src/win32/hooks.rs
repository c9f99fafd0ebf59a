//! `WH_MOUSE_LL` / `WH_KEYBOARD_LL` installation and the hook procedures.
//!
//! The hook procs feed the process-wide [`session()`].  Windows delivers
//! them on the thread that installed the hook, inside its message pump, and
//! removes a hook whose proc takes longer than `LowLevelHooksTimeout`.
//!
//! # Safety
//!
//! `unsafe` is confined to Win32 FFI calls and to reading the hook structs
//! Windows passes in `lParam`.

use std::sync::OnceLock;

use parking_lot::Mutex;
use windows::Win32::Foundation::{HINSTANCE, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, SetWindowsHookExW, UnhookWindowsHookEx, HHOOK, HOOKPROC, KBDLLHOOKSTRUCT,
    MSLLHOOKSTRUCT, WH_KEYBOARD_LL, WH_MOUSE_LL, WINDOWS_HOOK_ID,
};

use crate::clock;
use crate::errors::HookBridgeError;
use crate::event::Channel;
use crate::session::{HookBackend, HookSession};
use crate::translate::{RawKey, RawMouse};

static SESSION: OnceLock<HookSession<Win32Hooks>> = OnceLock::new();

/// The process-wide hook session the hook procs dispatch into.
pub fn session() -> &'static HookSession<Win32Hooks> {
    SESSION.get_or_init(|| HookSession::new(Win32Hooks::default(), clock::global()))
}

// ---------------------------------------------------------------------------
// RAII hook handle
// ---------------------------------------------------------------------------

/// Installed hook; unhooked on drop.
struct HookGuard {
    handle: HHOOK,
    channel: Channel,
}

// SAFETY: an HHOOK is a process-wide identifier, and UnhookWindowsHookEx
// may be called from any thread.
unsafe impl Send for HookGuard {}

impl HookGuard {
    fn install(
        channel: Channel,
        hook_id: WINDOWS_HOOK_ID,
        callback: HOOKPROC,
    ) -> Result<Self, HookBridgeError> {
        let install_failed = |e: windows::core::Error| HookBridgeError::InstallFailed {
            channel,
            reason: e.to_string(),
        };

        // SAFETY: plain Win32 calls; `callback` is a 'static extern "system" fn.
        let handle = unsafe {
            let module = GetModuleHandleW(None).map_err(install_failed)?;
            SetWindowsHookExW(hook_id, callback, HINSTANCE(module.0), 0).map_err(install_failed)?
        };
        log::debug!("{channel} hook installed");
        Ok(Self { handle, channel })
    }
}

impl Drop for HookGuard {
    fn drop(&mut self) {
        // SAFETY: `handle` came from SetWindowsHookExW and is unhooked once.
        match unsafe { UnhookWindowsHookEx(self.handle) } {
            Ok(()) => log::debug!("{} hook uninstalled", self.channel),
            Err(e) => log::warn!("{} hook: UnhookWindowsHookEx failed: {e}", self.channel),
        }
    }
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Win32 low-level hook installer.
#[derive(Default)]
pub struct Win32Hooks {
    mouse: Mutex<Option<HookGuard>>,
    keyboard: Mutex<Option<HookGuard>>,
}

impl Win32Hooks {
    fn slot(&self, channel: Channel) -> &Mutex<Option<HookGuard>> {
        match channel {
            Channel::Mouse => &self.mouse,
            Channel::Keyboard => &self.keyboard,
        }
    }
}

impl HookBackend for Win32Hooks {
    fn install(&self, channel: Channel) -> Result<(), HookBridgeError> {
        let mut slot = self.slot(channel).lock();
        if slot.is_some() {
            return Err(HookBridgeError::AlreadyActive(channel));
        }
        let guard = match channel {
            Channel::Mouse => HookGuard::install(channel, WH_MOUSE_LL, Some(mouse_hook_proc))?,
            Channel::Keyboard => {
                HookGuard::install(channel, WH_KEYBOARD_LL, Some(keyboard_hook_proc))?
            }
        };
        *slot = Some(guard);
        Ok(())
    }

    fn uninstall(&self, channel: Channel) {
        // Dropping the guard unhooks.
        self.slot(channel).lock().take();
    }
}

// ---------------------------------------------------------------------------
// Hook procedures
// ---------------------------------------------------------------------------

/// Low-level mouse hook procedure.
///
/// # Safety
///
/// Called by Windows only.  For `code >= 0`, `lparam` points to a valid
/// `MSLLHOOKSTRUCT`.
unsafe extern "system" fn mouse_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 {
        let info = &*(lparam.0 as *const MSLLHOOKSTRUCT);
        session().dispatch_mouse(
            code,
            wparam.0 as u32,
            RawMouse {
                x: info.pt.x,
                y: info.pt.y,
                mouse_data: info.mouseData,
            },
        );
    }
    // Always forward, whatever the dispatch did.
    CallNextHookEx(None, code, wparam, lparam)
}

/// Low-level keyboard hook procedure.
///
/// # Safety
///
/// Called by Windows only.  For `code >= 0`, `lparam` points to a valid
/// `KBDLLHOOKSTRUCT`.
unsafe extern "system" fn keyboard_hook_proc(
    code: i32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if code >= 0 {
        let info = &*(lparam.0 as *const KBDLLHOOKSTRUCT);
        session().dispatch_keyboard(code, wparam.0 as u32, RawKey { vk_code: info.vkCode });
    }
    CallNextHookEx(None, code, wparam, lparam)
}
