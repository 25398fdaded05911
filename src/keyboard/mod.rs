// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard model: the layout, the active view and transient button state.
//!
//! The [`Keyboard`] is the single owner of pressed/locked flags. Listeners
//! subscribe to a typed event stream and receive exactly one
//! [`KeyboardEvent`] per state transition. The renderer queries the keyboard
//! through [`ChangeTracker`] to find the buttons that must be painted over
//! the cached default image.

pub mod state;

pub use state::{ButtonState, KeyboardEvent};

use std::collections::BTreeMap;
use std::fmt;

use futures::channel::mpsc;

use crate::backend::ChangeTracker;
use crate::layout::{ButtonId, ButtonPlace, Layout, View};

/// Result type for keyboard operations.
pub type KeyboardResult<T> = Result<T, KeyboardError>;

/// Errors that can occur when driving the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardError {
    /// The layout has no views to show
    EmptyLayout(String),
    /// No view with the given name exists
    UnknownView(String),
    /// The button address is out of range for the active view
    UnknownButton(ButtonId),
}

impl fmt::Display for KeyboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyboardError::EmptyLayout(name) => write!(f, "layout '{}' has no views", name),
            KeyboardError::UnknownView(name) => write!(f, "no view named '{}'", name),
            KeyboardError::UnknownButton(id) => {
                write!(f, "no button at row {} index {}", id.row, id.button)
            }
        }
    }
}

impl std::error::Error for KeyboardError {}

/// A layout together with its runtime state.
#[derive(Debug)]
pub struct Keyboard {
    layout: Layout,
    view: usize,
    /// Non-default states only, keyed by view index and button address
    states: BTreeMap<(usize, ButtonId), ButtonState>,
    /// Keysym group and shift level selecting the labels shown
    group: u32,
    level: u32,
    listeners: Vec<mpsc::UnboundedSender<KeyboardEvent>>,
}

impl Keyboard {
    /// Creates a keyboard showing the first view of `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyboardError::EmptyLayout`] if the layout has no views.
    pub fn new(layout: Layout) -> KeyboardResult<Self> {
        if layout.views.is_empty() {
            return Err(KeyboardError::EmptyLayout(layout.name));
        }
        Ok(Self {
            layout,
            view: 0,
            states: BTreeMap::new(),
            group: 0,
            level: 0,
            listeners: Vec::new(),
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Index of the active view.
    pub fn view_index(&self) -> usize {
        self.view
    }

    /// The active view.
    pub fn view(&self) -> &View {
        // `new` guarantees at least one view and `view` only ever holds a
        // validated index.
        &self.layout.views[self.view]
    }

    /// Switches to the view called `name`.
    ///
    /// Returns `true` if the active view changed. Button states of every view
    /// are kept, so switching back shows latched buttons again.
    pub fn set_view(&mut self, name: &str) -> KeyboardResult<bool> {
        let index = self
            .layout
            .view_index(name)
            .ok_or_else(|| KeyboardError::UnknownView(name.to_string()))?;
        if index == self.view {
            return Ok(false);
        }
        let from = self.view;
        self.view = index;
        tracing::debug!("Switched view {} -> {} ('{}')", from, index, name);
        self.emit(KeyboardEvent::ViewChanged { from, to: index });
        Ok(true)
    }

    /// Current `(group, level)` keysym index.
    pub fn keysym_index(&self) -> (u32, u32) {
        (self.group, self.level)
    }

    /// Selects the keysym group and shift level for every button.
    ///
    /// Returns `true` if either changed; listeners then receive one
    /// [`KeyboardEvent::KeysymIndexChanged`].
    pub fn set_keysym_index(&mut self, group: u32, level: u32) -> bool {
        if (group, level) == (self.group, self.level) {
            return false;
        }
        self.group = group;
        self.level = level;
        tracing::debug!("Keysym index set to group {} level {}", group, level);
        self.emit(KeyboardEvent::KeysymIndexChanged { group, level });
        true
    }

    /// Current state of a button in the active view.
    pub fn state(&self, id: ButtonId) -> ButtonState {
        self.states
            .get(&(self.view, id))
            .copied()
            .unwrap_or_default()
    }

    /// Marks a button as pressed. Returns `true` if the state changed.
    pub fn press(&mut self, id: ButtonId) -> KeyboardResult<bool> {
        let keycode = self.keycode(id)?;
        let changed = self.update(id, |state| state.pressed = true);
        if changed {
            self.emit(KeyboardEvent::Pressed {
                view: self.view,
                id,
                keycode,
            });
        }
        Ok(changed)
    }

    /// Marks a button as released. Returns `true` if the state changed.
    pub fn release(&mut self, id: ButtonId) -> KeyboardResult<bool> {
        let keycode = self.keycode(id)?;
        let changed = self.update(id, |state| state.pressed = false);
        if changed {
            self.emit(KeyboardEvent::Released {
                view: self.view,
                id,
                keycode,
            });
        }
        Ok(changed)
    }

    /// Latches or unlatches a button. Returns `true` if the state changed.
    pub fn set_locked(&mut self, id: ButtonId, locked: bool) -> KeyboardResult<bool> {
        self.keycode(id)?;
        let changed = self.update(id, |state| state.locked = locked);
        if changed {
            self.emit(KeyboardEvent::LockChanged {
                view: self.view,
                id,
                locked,
            });
        }
        Ok(changed)
    }

    /// Flips the latch of a button and returns the new value.
    pub fn toggle_locked(&mut self, id: ButtonId) -> KeyboardResult<bool> {
        let locked = !self.state(id).locked;
        self.set_locked(id, locked)?;
        Ok(locked)
    }

    /// Releases every pressed button of every view, emitting one release
    /// event per button. Latches are kept.
    pub fn release_all(&mut self) {
        let pressed: Vec<(usize, ButtonId)> = self
            .states
            .iter()
            .filter(|(_, state)| state.pressed)
            .map(|(key, _)| *key)
            .collect();
        for (view, id) in pressed {
            let keycode = self
                .layout
                .views
                .get(view)
                .and_then(|v| v.place(id))
                .and_then(|place| place.button.keycode);
            self.update_in(view, id, |state| state.pressed = false);
            self.emit(KeyboardEvent::Released { view, id, keycode });
        }
    }

    /// Finds the first button in the active view that emits `keycode`.
    pub fn find_button_by_keycode(&self, keycode: u32) -> Option<ButtonPlace<'_>> {
        self.view()
            .places()
            .find(|place| place.button.keycode == Some(keycode))
    }

    /// Registers a listener and returns its event stream.
    ///
    /// Dropping the receiver unsubscribes; closed listeners are pruned on the
    /// next event.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<KeyboardEvent> {
        let (tx, rx) = mpsc::unbounded();
        self.listeners.push(tx);
        rx
    }

    fn keycode(&self, id: ButtonId) -> KeyboardResult<Option<u32>> {
        self.view()
            .place(id)
            .map(|place| place.button.keycode)
            .ok_or(KeyboardError::UnknownButton(id))
    }

    fn update(&mut self, id: ButtonId, change: impl FnOnce(&mut ButtonState)) -> bool {
        self.update_in(self.view, id, change)
    }

    fn update_in(&mut self, view: usize, id: ButtonId, change: impl FnOnce(&mut ButtonState)) -> bool {
        let before = self.states.get(&(view, id)).copied().unwrap_or_default();
        let mut after = before;
        change(&mut after);
        if after == before {
            return false;
        }
        if after.is_default() {
            self.states.remove(&(view, id));
        } else {
            self.states.insert((view, id), after);
        }
        true
    }

    fn emit(&mut self, event: KeyboardEvent) {
        self.listeners.retain(|listener| {
            if let Err(e) = listener.unbounded_send(event.clone()) {
                tracing::debug!("Dropping closed keyboard listener: {}", e);
                return false;
            }
            true
        });
    }
}

impl ChangeTracker for Keyboard {
    fn changed_buttons(&self) -> Vec<(ButtonId, ButtonState)> {
        self.states
            .range((self.view, ButtonId::new(0, 0))..=(self.view, ButtonId::new(usize::MAX, usize::MAX)))
            .map(|((_, id), state)| (*id, *state))
            .collect()
    }
}
