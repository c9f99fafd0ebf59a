//! In-memory backends for testing without hooks or `SendInput`.
//!
//! [`MockHookBackend`] stands in for the Win32 hook installer and
//! [`RecordingSink`] records synthetic input instead of submitting it.

use std::collections::HashMap;
use std::time::Instant;

use parking_lot::Mutex;

use crate::coords::ScreenSize;
use crate::errors::HookBridgeError;
use crate::event::{Channel, Point};
use crate::inject::{InputSink, SyntheticInput};
use crate::session::HookBackend;

// ---------------------------------------------------------------------------
// Hook backend
// ---------------------------------------------------------------------------

/// Hook backend that tracks install state in memory.
#[derive(Default)]
pub struct MockHookBackend {
    installed: Mutex<Vec<Channel>>,
    installs: Mutex<HashMap<Channel, u32>>,
    uninstalls: Mutex<HashMap<Channel, u32>>,
    fail_next: Mutex<Option<String>>,
}

impl MockHookBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `install` call fail with `reason`.
    pub fn fail_next_install(&self, reason: &str) {
        *self.fail_next.lock() = Some(reason.to_owned());
    }

    /// Channels with a live (mock) hook.
    pub fn installed(&self) -> Vec<Channel> {
        self.installed.lock().clone()
    }

    pub fn install_count(&self, channel: Channel) -> u32 {
        self.installs.lock().get(&channel).copied().unwrap_or(0)
    }

    pub fn uninstall_count(&self, channel: Channel) -> u32 {
        self.uninstalls.lock().get(&channel).copied().unwrap_or(0)
    }
}

impl HookBackend for MockHookBackend {
    fn install(&self, channel: Channel) -> Result<(), HookBridgeError> {
        if let Some(reason) = self.fail_next.lock().take() {
            return Err(HookBridgeError::InstallFailed { channel, reason });
        }
        *self.installs.lock().entry(channel).or_default() += 1;
        self.installed.lock().push(channel);
        Ok(())
    }

    fn uninstall(&self, channel: Channel) {
        let mut installed = self.installed.lock();
        if let Some(pos) = installed.iter().position(|c| *c == channel) {
            installed.remove(pos);
            *self.uninstalls.lock().entry(channel).or_default() += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Input sink
// ---------------------------------------------------------------------------

/// Input sink that records each submission with the instant it arrived.
pub struct RecordingSink {
    cursor: Mutex<Point>,
    screen: ScreenSize,
    log: Mutex<Vec<(Instant, SyntheticInput)>>,
    failure: Mutex<Option<String>>,
}

impl RecordingSink {
    pub fn new(cursor: Point, screen: ScreenSize) -> Self {
        Self {
            cursor: Mutex::new(cursor),
            screen,
            log: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    pub fn set_cursor(&self, cursor: Point) {
        *self.cursor.lock() = cursor;
    }

    /// Reject every later submission with `reason`.
    pub fn fail_submissions(&self, reason: &str) {
        *self.failure.lock() = Some(reason.to_owned());
    }

    pub fn inputs(&self) -> Vec<SyntheticInput> {
        self.log.lock().iter().map(|(_, input)| *input).collect()
    }

    pub fn timed_inputs(&self) -> Vec<(Instant, SyntheticInput)> {
        self.log.lock().clone()
    }
}

impl InputSink for RecordingSink {
    fn submit(&self, input: SyntheticInput) -> Result<(), HookBridgeError> {
        if let Some(reason) = self.failure.lock().as_ref() {
            return Err(HookBridgeError::InputError(reason.clone()));
        }
        self.log.lock().push((Instant::now(), input));
        Ok(())
    }

    fn cursor_pos(&self) -> Result<Point, HookBridgeError> {
        Ok(*self.cursor.lock())
    }

    fn screen_size(&self) -> ScreenSize {
        self.screen
    }
}
