// SPDX-License-Identifier: GPL-3.0-only

//! Built-in theme and the style engine that serves it.
//!
//! [`Theme`] is a flat set of colours that can be loaded from the renderer
//! configuration. [`ThemeStyle`] resolves button and view styles from it:
//!
//! - `key_background`: default key background
//! - `key_pressed`: key background while pressed
//! - `key_locked`: background of latched keys (Shift, Ctrl, etc.)
//! - `special_background`: background of keys with a non-default outline
//! - `key_text`: labels and icons
//! - `border`: key frame
//! - `keyboard_background`: the view behind the keys

use serde::{Deserialize, Serialize};

use crate::backend::{BackendError, ButtonStyle, Color, Edges, StyleEngine, StyleQuery, ViewStyle};
use crate::layout::ArrangementKind;

/// Outline classes painted with the regular key background.
const PLAIN_OUTLINES: [&str; 2] = ["", "default"];

// ============================================================================
// Theme Colours
// ============================================================================

/// Colours used by [`ThemeStyle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub keyboard_background: Color,
    pub key_background: Color,
    pub key_pressed: Color,
    pub key_locked: Color,
    pub special_background: Color,
    pub key_text: Color,
    pub border: Color,
}

impl Default for Theme {
    /// A dark theme.
    fn default() -> Self {
        Self {
            keyboard_background: Color::from_rgba8(0x1b, 0x1b, 0x1b, 0xff),
            key_background: Color::from_rgba8(0x3a, 0x3a, 0x3a, 0xff),
            key_pressed: Color::from_rgba8(0x63, 0xd0, 0xdf, 0xff),
            key_locked: Color::from_rgba8(0x92, 0xcf, 0x9c, 0xff),
            special_background: Color::from_rgba8(0x2a, 0x2a, 0x2a, 0xff),
            key_text: Color::from_rgba8(0xe4, 0xe4, 0xe4, 0xff),
            border: Color::from_rgba8(0x12, 0x12, 0x12, 0xff),
        }
    }
}

impl Theme {
    /// Background for a button in the given state.
    ///
    /// Pressed wins over locked; locked wins over the outline class.
    pub fn button_background(&self, query: &StyleQuery<'_>) -> Color {
        if query.pressed {
            self.key_pressed
        } else if query.locked {
            self.key_locked
        } else if PLAIN_OUTLINES.contains(&query.outline) {
            self.key_background
        } else {
            self.special_background
        }
    }

    /// Frame colour for a button in the given state.
    pub fn button_border(&self, query: &StyleQuery<'_>) -> Color {
        if query.pressed {
            self.key_pressed.scale_alpha(0.8)
        } else {
            self.border
        }
    }
}

// ============================================================================
// Style Engine
// ============================================================================

/// [`StyleEngine`] over a [`Theme`] with uniform margin and border widths.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeStyle {
    pub theme: Theme,
    pub margin: f64,
    pub border_width: f64,
}

impl ThemeStyle {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            margin: crate::app_settings::DEFAULT_KEY_MARGIN,
            border_width: crate::app_settings::DEFAULT_BORDER_WIDTH,
        }
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_border_width(mut self, border_width: f64) -> Self {
        self.border_width = border_width;
        self
    }
}

impl Default for ThemeStyle {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl StyleEngine for ThemeStyle {
    fn view_style(&self, _arrangement: ArrangementKind) -> Result<ViewStyle, BackendError> {
        Ok(ViewStyle {
            background: self.theme.keyboard_background,
            border: Edges::default(),
            border_color: self.theme.border,
        })
    }

    fn button_style(&self, query: &StyleQuery<'_>) -> Result<ButtonStyle, BackendError> {
        if query.name.is_empty() {
            return Err(BackendError::style("<unnamed>", "buttons need a name to be styled"));
        }
        // Wide arrangements get tighter gaps between keys.
        let margin = match query.arrangement {
            ArrangementKind::Base => self.margin,
            ArrangementKind::Wide => self.margin / 2.0,
        };
        Ok(ButtonStyle {
            margin: Edges::uniform(margin),
            border: Edges::uniform(self.border_width),
            background: self.theme.button_background(query),
            border_color: self.theme.button_border(query),
            foreground: self.theme.key_text,
        })
    }
}
