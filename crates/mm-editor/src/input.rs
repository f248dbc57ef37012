//! Input abstraction layer.
//!
//! Normalizes pointer, wheel, and keyboard events into a unified
//! `InputEvent` enum consumed by the canvas session. Pointer positions are
//! client coordinates; the session maps them through the surface rectangle
//! and the viewport.

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Platform command key: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Button pressed.
    PointerDown {
        x: f32,
        y: f32,
        button: PointerButton,
        modifiers: Modifiers,
    },

    /// Pointer moved, with or without a button held.
    PointerMove { x: f32, y: f32 },

    /// Button released.
    PointerUp { x: f32, y: f32, button: PointerButton },

    /// Pointer left the surface. Ends any drag or pan.
    PointerLeave,

    /// Press and release on the same spot.
    Click {
        x: f32,
        y: f32,
        button: PointerButton,
        modifiers: Modifiers,
    },

    /// Double activation (double click or double tap).
    DoubleClick { x: f32, y: f32 },

    /// Wheel scroll. Positive `delta_y` scrolls down, which zooms out.
    Wheel { x: f32, y: f32, delta_y: f32 },

    /// Key pressed. `key` is the `KeyboardEvent.key` value
    /// (e.g. `"d"`, `"Delete"`, `"Escape"`).
    Key { key: String, modifiers: Modifiers },

    /// The text-edit field changed to `text`.
    EditText { text: String },

    /// The text-edit field lost focus.
    FocusLost,
}

impl InputEvent {
    pub fn key(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.into(),
            modifiers,
        }
    }

    pub fn primary_down(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PointerButton::Primary,
            modifiers,
        }
    }

    pub fn primary_up(x: f32, y: f32) -> Self {
        Self::PointerUp {
            x,
            y,
            button: PointerButton::Primary,
        }
    }

    pub fn primary_click(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::Click {
            x,
            y,
            button: PointerButton::Primary,
            modifiers,
        }
    }

    /// Extract the client position if this is a pointer event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y, .. }
            | Self::Click { x, y, .. }
            | Self::DoubleClick { x, y }
            | Self::Wheel { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }
}
