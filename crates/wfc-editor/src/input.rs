//! Input abstraction layer.
//!
//! Normalizes host pointer, wheel, keyboard and drag-and-drop events into a
//! unified `InputEvent` enum consumed by the editor. Coordinates are canvas
//! screen pixels.

use crate::palette::DragPayload;
use wfc_core::Point;

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Platform command key: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    PointerDown { x: f32, y: f32, modifiers: Modifiers },

    /// Pointer moved, with or without a button held.
    PointerMove { x: f32, y: f32, modifiers: Modifiers },

    /// Primary button released.
    PointerUp { x: f32, y: f32, modifiers: Modifiers },

    /// Wheel notch at the cursor. Positive `delta_y` scrolls down (zoom out).
    Wheel {
        x: f32,
        y: f32,
        delta_y: f32,
        modifiers: Modifiers,
    },

    /// Key press; `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    Key { key: String, modifiers: Modifiers },

    /// External drag released over the canvas.
    Drop { x: f32, y: f32, payload: DragPayload },
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.to_owned(),
            modifiers,
        }
    }

    /// Screen position, for events that have one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::Wheel { x, y, .. }
            | Self::Drop { x, y, .. } => Some(Point::new(*x, *y)),
            Self::Key { .. } => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::PointerDown { modifiers, .. }
            | Self::PointerMove { modifiers, .. }
            | Self::PointerUp { modifiers, .. }
            | Self::Wheel { modifiers, .. }
            | Self::Key { modifiers, .. } => *modifiers,
            Self::Drop { .. } => Modifiers::NONE,
        }
    }
}
