//! Synthetic mouse and keyboard input.
//!
//! [`Injector`] composes the coordinate mapper, motion planner and
//! precision waiter on top of an [`InputSink`] that performs the actual
//! submission.  On Windows the sink is [`crate::win32::send::SendInputSink`];
//! tests use [`crate::mock::RecordingSink`].
//!
//! Every call is synchronous: smooth moves, clicks and key presses occupy
//! the calling thread for their full duration and cannot be cancelled.

use crate::clock::{self, MonotonicClock};
use crate::coords::{self, ScreenSize};
use crate::errors::HookBridgeError;
use crate::event::{MouseButton, Point};
use crate::motion;
use crate::wait;

/// One synthetic event, in the shape the OS submission call expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticInput {
    /// Absolute move in 0..65535 space.
    MoveAbsolute { abs_x: i32, abs_y: i32 },
    Button { button: MouseButton, is_down: bool },
    /// Vertical wheel, signed, in WHEEL_DELTA units (120 = one notch).
    Wheel { delta: i32 },
    Key { code: u16, is_down: bool },
}

/// OS access needed by the injector.
pub trait InputSink: Send + Sync {
    fn submit(&self, input: SyntheticInput) -> Result<(), HookBridgeError>;

    /// Current pointer position in screen pixels.
    fn cursor_pos(&self) -> Result<Point, HookBridgeError>;

    /// Primary screen size, queried fresh on every call.
    fn screen_size(&self) -> ScreenSize;
}

/// Timing knobs for the composite primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InjectorConfig {
    /// Hold time between button down and up in [`Injector::mouse_click`].
    pub click_hold_ms: f64,
    /// Hold time between key down and up in [`Injector::key_press`].
    pub key_hold_ms: f64,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            click_hold_ms: 10.0,
            key_hold_ms: 10.0,
        }
    }
}

pub struct Injector<S: InputSink> {
    sink: S,
    clock: &'static MonotonicClock,
    config: InjectorConfig,
}

impl<S: InputSink> Injector<S> {
    /// Injector on the session clock with default timings.
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, clock::global(), InjectorConfig::default())
    }

    pub fn with_config(sink: S, clock: &'static MonotonicClock, config: InjectorConfig) -> Self {
        Self { sink, clock, config }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Move the pointer to pixel `(x, y)` with one absolute move.
    pub fn move_mouse(&self, x: i32, y: i32) -> Result<(), HookBridgeError> {
        let (abs_x, abs_y) = coords::to_absolute(x, y, self.sink.screen_size());
        self.sink.submit(SyntheticInput::MoveAbsolute { abs_x, abs_y })
    }

    /// Glide from the current pointer position to `(target_x, target_y)` in
    /// `steps` linear moves, pausing `delay_ms` between moves.
    ///
    /// `steps <= 0` submits nothing.
    pub fn move_mouse_smooth(
        &self,
        target_x: i32,
        target_y: i32,
        steps: i32,
        delay_ms: i32,
    ) -> Result<(), HookBridgeError> {
        let start = self.sink.cursor_pos()?;
        let path = motion::plan(start, Point::new(target_x, target_y), steps.max(0) as u32);
        let last = path.len().saturating_sub(1);

        for (i, p) in path.into_iter().enumerate() {
            self.move_mouse(p.x, p.y)?;
            if delay_ms > 0 && i < last {
                self.wait(delay_ms as f64);
            }
        }
        Ok(())
    }

    /// Press button `id` (0 left, 1 right, 2 middle).  Unknown ids are
    /// ignored.
    pub fn mouse_button_down(&self, id: i32) -> Result<(), HookBridgeError> {
        self.button(id, true)
    }

    pub fn mouse_button_up(&self, id: i32) -> Result<(), HookBridgeError> {
        self.button(id, false)
    }

    /// Down, hold, up.
    pub fn mouse_click(&self, id: i32) -> Result<(), HookBridgeError> {
        self.mouse_button_down(id)?;
        self.wait(self.config.click_hold_ms);
        self.mouse_button_up(id)
    }

    pub fn mouse_wheel(&self, delta: i32) -> Result<(), HookBridgeError> {
        self.sink.submit(SyntheticInput::Wheel { delta })
    }

    pub fn key_down(&self, code: u16) -> Result<(), HookBridgeError> {
        self.sink.submit(SyntheticInput::Key { code, is_down: true })
    }

    pub fn key_up(&self, code: u16) -> Result<(), HookBridgeError> {
        self.sink.submit(SyntheticInput::Key { code, is_down: false })
    }

    pub fn key_press(&self, code: u16) -> Result<(), HookBridgeError> {
        self.key_down(code)?;
        self.wait(self.config.key_hold_ms);
        self.key_up(code)
    }

    fn button(&self, id: i32, is_down: bool) -> Result<(), HookBridgeError> {
        match MouseButton::from_id(id) {
            Some(button) => self.sink.submit(SyntheticInput::Button { button, is_down }),
            None => Ok(()),
        }
    }

    fn wait(&self, ms: f64) {
        wait::precise_sleep_on(self.clock, ms);
    }
}
