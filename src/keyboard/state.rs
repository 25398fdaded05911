// SPDX-License-Identifier: GPL-3.0-only

//! Transient button state and the events emitted when it changes.

use crate::layout::ButtonId;

/// Pressed and latched flags of a button.
///
/// The default state (neither pressed nor locked) is what the cached keyboard
/// image shows; any other state is painted on top of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ButtonState {
    pub pressed: bool,
    pub locked: bool,
}

impl ButtonState {
    pub const DEFAULT: ButtonState = ButtonState {
        pressed: false,
        locked: false,
    };

    pub const PRESSED: ButtonState = ButtonState {
        pressed: true,
        locked: false,
    };

    /// Returns `true` if the state matches the cached default image.
    pub fn is_default(&self) -> bool {
        !self.pressed && !self.locked
    }
}

/// Notification sent to keyboard listeners.
///
/// Every state transition produces exactly one event per listener; repeated
/// requests that do not change the state produce none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardEvent {
    /// A button went down
    Pressed {
        view: usize,
        id: ButtonId,
        keycode: Option<u32>,
    },
    /// A button went up
    Released {
        view: usize,
        id: ButtonId,
        keycode: Option<u32>,
    },
    /// A button was latched or unlatched
    LockChanged {
        view: usize,
        id: ButtonId,
        locked: bool,
    },
    /// The active view changed
    ViewChanged { from: usize, to: usize },
    /// The keysym group or shift level changed
    KeysymIndexChanged { group: u32, level: u32 },
}
