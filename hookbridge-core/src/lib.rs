//! `hookbridge_core` -- Pure Rust core library for hookbridge.
//!
//! Observes system-wide mouse and keyboard activity through low-level hooks
//! and synthesizes input through `SendInput`.  It can be consumed by:
//! - `hookbridge-ffi` (C ABI DLL for P/Invoke / ctypes hosts)
//! - `hookbridge-cli` (standalone CLI tools)
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`errors`] | `HookBridgeError` enum via `thiserror` |
//! | [`clock`] | Monotonic millisecond session clock |
//! | [`event`] | Typed `InputEvent` model |
//! | [`translate`] | Raw hook notification -> `InputEvent` |
//! | [`session`] | Hook lifecycle and listener dispatch |
//! | [`coords`] | Pixel -> absolute coordinate mapping |
//! | [`motion`] | Linear motion planning |
//! | [`wait`] | Precision sleep |
//! | [`inject`] | Move / click / scroll / key primitives |
//! | [`mock`] | In-memory hook backend and input sink |
//! | `win32` | Windows hooks, `SendInput`, message pump (Windows only) |

pub mod clock;
pub mod coords;
pub mod errors;
pub mod event;
pub mod inject;
pub mod mock;
pub mod motion;
pub mod session;
pub mod translate;
pub mod wait;

#[cfg(windows)]
pub mod win32;
