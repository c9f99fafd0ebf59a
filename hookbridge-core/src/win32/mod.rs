//! Win32 backends: low-level hooks, `SendInput`, and the message pump.

pub mod hooks;
pub mod message_loop;
pub mod send;
