//! Error types for `hookbridge_core`.
//!
//! All Rust-side failures are funnelled through [`HookBridgeError`], which
//! uses `thiserror` for `Display` and `Error` derives.  The C ABI in
//! `hookbridge-ffi` projects these onto `bool` returns plus a thread-local
//! last-error message.

use thiserror::Error;

use crate::event::Channel;

/// Top-level error type for the `hookbridge_core` library.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HookBridgeError {
    /// A `start_*` call on a channel that already has a live hook.
    #[error("AlreadyActive: {0} hook is already installed")]
    AlreadyActive(Channel),

    /// The OS refused to install the interception point.
    #[error("InstallFailed: {channel} hook: {reason}")]
    InstallFailed { channel: Channel, reason: String },

    /// Synthetic input submission failure (SendInput).
    #[error("InputError: {0}")]
    InputError(String),
}

/// Convert a `windows::core::Error` (Win32 failure) into a
/// `HookBridgeError::InputError`.
#[cfg(windows)]
impl From<windows::core::Error> for HookBridgeError {
    fn from(err: windows::core::Error) -> Self {
        HookBridgeError::InputError(format!("Win32 error: {err}"))
    }
}
