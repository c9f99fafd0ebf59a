//! Hook session: lifecycle of the mouse and keyboard interception points
//! and synchronous dispatch of translated events to the host's listeners.
//!
//! # Hot path
//!
//! [`HookSession::dispatch_mouse`] and [`HookSession::dispatch_keyboard`]
//! run inline in the OS hook callback on the thread pumping the host's
//! message loop.  Windows silently unhooks a callback that stalls, so the
//! dispatch path takes a read lock only long enough to upgrade the listener,
//! never allocates, and never logs unless a listener panics.
//!
//! # Listener ownership
//!
//! The session keeps a `Weak` reference to each listener.  The host owns the
//! strong `Arc`; if it drops it early, events are silently discarded.  After
//! [`HookSession::stop`] returns no listener is invoked again from a later
//! notification.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::clock::MonotonicClock;
use crate::errors::HookBridgeError;
use crate::event::{Channel, InputEvent, MouseButton};
use crate::translate::{self, RawKey, RawMouse};

// ---------------------------------------------------------------------------
// Seams
// ---------------------------------------------------------------------------

/// Receiver for mouse events.  Every method defaults to a no-op so hosts
/// only implement what they consume.
pub trait MouseListener: Send + Sync {
    fn on_move(&self, _x: i32, _y: i32, _t: f64) {}
    fn on_button(&self, _button: MouseButton, _is_down: bool, _x: i32, _y: i32, _t: f64) {}
    fn on_wheel(&self, _delta: i32, _x: i32, _y: i32, _t: f64) {}
}

/// Receiver for keyboard events.
pub trait KeyboardListener: Send + Sync {
    fn on_key(&self, code: u32, is_down: bool, t: f64);
}

/// Adapter that routes every event kind into one closure.
///
/// ```
/// use std::sync::Arc;
/// use hookbridge_core::event::InputEvent;
/// use hookbridge_core::session::EventFn;
///
/// let listener = Arc::new(EventFn(|evt: InputEvent| println!("{evt:?}")));
/// # let _ = listener;
/// ```
pub struct EventFn<F>(pub F);

impl<F: Fn(InputEvent) + Send + Sync> MouseListener for EventFn<F> {
    fn on_move(&self, x: i32, y: i32, t: f64) {
        (self.0)(InputEvent::MouseMove { x, y, t })
    }

    fn on_button(&self, button: MouseButton, is_down: bool, x: i32, y: i32, t: f64) {
        (self.0)(InputEvent::MouseButton { button, is_down, x, y, t })
    }

    fn on_wheel(&self, delta: i32, x: i32, y: i32, t: f64) {
        (self.0)(InputEvent::MouseWheel { delta, x, y, t })
    }
}

impl<F: Fn(InputEvent) + Send + Sync> KeyboardListener for EventFn<F> {
    fn on_key(&self, code: u32, is_down: bool, t: f64) {
        (self.0)(InputEvent::Key { code, is_down, t })
    }
}

/// Installs and removes OS interception points.
///
/// The Win32 implementation is [`crate::win32::hooks::Win32Hooks`]; tests
/// use [`crate::mock::MockHookBackend`].
pub trait HookBackend: Send + Sync {
    fn install(&self, channel: Channel) -> Result<(), HookBridgeError>;

    /// Remove the interception point.  Must be a no-op when none is
    /// installed.
    fn uninstall(&self, channel: Channel);
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A channel is Active exactly when its slot holds a listener.
#[derive(Default)]
struct Slots {
    mouse: Option<Weak<dyn MouseListener>>,
    keyboard: Option<Weak<dyn KeyboardListener>>,
}

/// Owner of at most one mouse hook and one keyboard hook.
pub struct HookSession<B: HookBackend> {
    backend: B,
    clock: &'static MonotonicClock,
    slots: RwLock<Slots>,
}

impl<B: HookBackend> HookSession<B> {
    pub fn new(backend: B, clock: &'static MonotonicClock) -> Self {
        Self {
            backend,
            clock,
            slots: RwLock::new(Slots::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn clock(&self) -> &'static MonotonicClock {
        self.clock
    }

    /// Register `listener` and install the mouse hook.
    ///
    /// Fails with [`HookBridgeError::AlreadyActive`] (existing listener left
    /// untouched) or with the backend's install error (channel stays
    /// Inactive).
    pub fn start_mouse<L: MouseListener + 'static>(
        &self,
        listener: &Arc<L>,
    ) -> Result<(), HookBridgeError> {
        let weak = Arc::downgrade(listener) as Weak<dyn MouseListener>;
        let mut slots = self.slots.write();
        if slots.mouse.is_some() {
            return Err(HookBridgeError::AlreadyActive(Channel::Mouse));
        }
        self.clock.init();
        self.backend.install(Channel::Mouse)?;
        slots.mouse = Some(weak);
        log::debug!("mouse hook session started");
        Ok(())
    }

    /// Register `listener` and install the keyboard hook.
    pub fn start_keyboard<L: KeyboardListener + 'static>(
        &self,
        listener: &Arc<L>,
    ) -> Result<(), HookBridgeError> {
        let weak = Arc::downgrade(listener) as Weak<dyn KeyboardListener>;
        let mut slots = self.slots.write();
        if slots.keyboard.is_some() {
            return Err(HookBridgeError::AlreadyActive(Channel::Keyboard));
        }
        self.clock.init();
        self.backend.install(Channel::Keyboard)?;
        slots.keyboard = Some(weak);
        log::debug!("keyboard hook session started");
        Ok(())
    }

    /// Deactivate both channels.  Idempotent.
    pub fn stop(&self) {
        let mut slots = self.slots.write();
        if slots.mouse.take().is_some() {
            self.backend.uninstall(Channel::Mouse);
            log::debug!("mouse hook session stopped");
        }
        if slots.keyboard.take().is_some() {
            self.backend.uninstall(Channel::Keyboard);
            log::debug!("keyboard hook session stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        let slots = self.slots.read();
        slots.mouse.is_some() || slots.keyboard.is_some()
    }

    pub fn is_channel_active(&self, channel: Channel) -> bool {
        let slots = self.slots.read();
        match channel {
            Channel::Mouse => slots.mouse.is_some(),
            Channel::Keyboard => slots.keyboard.is_some(),
        }
    }

    /// Handle one mouse hook notification.  The caller forwards the
    /// notification down the hook chain afterwards, whatever happens here.
    pub fn dispatch_mouse(&self, code: i32, msg: u32, raw: RawMouse) {
        if code < 0 {
            return;
        }
        // The read guard is a temporary; it is released before the listener runs.
        let Some(listener) = self.slots.read().mouse.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        let Some(event) = translate::translate_mouse(msg, raw, self.clock.now_ms()) else {
            return;
        };
        contain_panic(Channel::Mouse, || match event {
            InputEvent::MouseMove { x, y, t } => listener.on_move(x, y, t),
            InputEvent::MouseButton { button, is_down, x, y, t } => {
                listener.on_button(button, is_down, x, y, t)
            }
            InputEvent::MouseWheel { delta, x, y, t } => listener.on_wheel(delta, x, y, t),
            InputEvent::Key { .. } => {}
        });
    }

    /// Handle one keyboard hook notification.
    pub fn dispatch_keyboard(&self, code: i32, msg: u32, raw: RawKey) {
        if code < 0 {
            return;
        }
        let Some(listener) = self.slots.read().keyboard.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        if let Some(InputEvent::Key { code, is_down, t }) =
            translate::translate_keyboard(msg, raw, self.clock.now_ms())
        {
            contain_panic(Channel::Keyboard, || listener.on_key(code, is_down, t));
        }
    }
}

impl<B: HookBackend> Drop for HookSession<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Run a listener callback, swallowing any panic so it never unwinds into
/// the OS hook chain.
fn contain_panic<F: FnOnce()>(channel: Channel, f: F) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(f)) {
        log::error!("{channel} listener panicked: {}", panic_message(&*payload));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
