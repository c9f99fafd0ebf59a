//! Typed input event model shared by the capture and injection sides.
//!
//! Events are transient: one is built per OS notification, handed to the
//! listener, then dropped.  Nothing here is buffered or persisted.

use std::fmt;

use serde::Serialize;

/// Hook channel.  Each channel is installed and removed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Mouse,
    Keyboard,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Mouse => f.write_str("mouse"),
            Channel::Keyboard => f.write_str("keyboard"),
        }
    }
}

/// Mouse button identity.  The numeric ids are part of the host ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Map a host button id (`0`, `1`, `2`) to a button.  Any other id is
    /// `None`.
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Right),
            2 => Some(MouseButton::Middle),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }
}

/// Screen position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One translated input notification.
///
/// `t` is milliseconds since the session clock epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    MouseMove {
        x: i32,
        y: i32,
        t: f64,
    },
    MouseButton {
        button: MouseButton,
        is_down: bool,
        x: i32,
        y: i32,
        t: f64,
    },
    MouseWheel {
        /// Positive = away from the user, negative = toward.
        delta: i32,
        x: i32,
        y: i32,
        t: f64,
    },
    Key {
        /// Native virtual-key code, unmodified.
        code: u32,
        is_down: bool,
        t: f64,
    },
}

impl InputEvent {
    /// The hook channel this event arrives on.
    pub fn channel(&self) -> Channel {
        match self {
            InputEvent::Key { .. } => Channel::Keyboard,
            _ => Channel::Mouse,
        }
    }

    pub fn timestamp(&self) -> f64 {
        match *self {
            InputEvent::MouseMove { t, .. }
            | InputEvent::MouseButton { t, .. }
            | InputEvent::MouseWheel { t, .. }
            | InputEvent::Key { t, .. } => t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_ids_round_trip() {
        for id in 0..3 {
            let button = MouseButton::from_id(id).unwrap();
            assert_eq!(button.id(), id);
        }
    }

    #[test]
    fn test_unknown_button_id() {
        assert_eq!(MouseButton::from_id(3), None);
        assert_eq!(MouseButton::from_id(-1), None);
        assert_eq!(MouseButton::from_id(99), None);
    }

    #[test]
    fn test_event_channel() {
        let key = InputEvent::Key { code: 0x41, is_down: true, t: 1.0 };
        let wheel = InputEvent::MouseWheel { delta: -120, x: 0, y: 0, t: 2.0 };
        assert_eq!(key.channel(), Channel::Keyboard);
        assert_eq!(wheel.channel(), Channel::Mouse);
        assert_eq!(wheel.timestamp(), 2.0);
    }

    #[test]
    fn test_event_serialization() {
        let evt = InputEvent::MouseButton {
            button: MouseButton::Right,
            is_down: false,
            x: 10,
            y: 20,
            t: 1.5,
        };
        let json = serde_json::to_string(&evt).unwrap();
        assert!(json.contains("\"kind\":\"mouse_button\""));
        assert!(json.contains("\"button\":\"right\""));
        assert!(json.contains("\"is_down\":false"));
    }
}
