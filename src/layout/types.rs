// SPDX-License-Identifier: GPL-3.0-only

//! Core data types of the keyboard layout tree.
//!
//! A [`Layout`] holds one or more [`View`]s (e.g. letters, symbols); each view
//! holds [`Row`]s and each row holds [`Button`]s. Bounds are nested: rows are
//! positioned relative to the view origin and buttons relative to the row
//! origin. A row can be rotated about its own origin.

use serde::{Deserialize, Serialize};

use crate::geometry::{get_button_bounds, Bounds};

// ============================================================================
// Arrangement
// ============================================================================

/// Arrangement variant of a layout.
///
/// Selects extra style classes applied to the view and to every button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrangementKind {
    /// Regular arrangement
    #[default]
    Base,
    /// Wide arrangement, used on landscape outputs
    Wide,
}

impl ArrangementKind {
    /// Style class added by this arrangement, if any.
    pub fn style_class(&self) -> Option<&'static str> {
        match self {
            ArrangementKind::Base => None,
            ArrangementKind::Wide => Some(crate::app_settings::WIDE_CLASS),
        }
    }
}

// ============================================================================
// Layout Data Structures
// ============================================================================

/// A keyboard button.
///
/// `name` identifies the button to the style engine and `outline` names its
/// outline style class (e.g. `"default"`, `"special"`). A button shows its
/// icon when one is set and can be found, and its label otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Button {
    /// Style identifier
    pub name: String,

    /// Outline style class
    #[serde(default)]
    pub outline: String,

    /// Bounds relative to the row origin
    pub bounds: Bounds,

    /// Text shown on the button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Icon name shown instead of the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Hardware keycode emitted by the button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keycode: Option<u32>,

    /// Labels per shift level; an empty or missing entry falls back to `label`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub level_labels: Vec<String>,
}

impl Button {
    /// Creates a button with the `default` outline and no label or icon.
    pub fn new(name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            outline: "default".into(),
            bounds,
            ..Default::default()
        }
    }

    pub fn with_outline(mut self, outline: impl Into<String>) -> Self {
        self.outline = outline.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_keycode(mut self, keycode: u32) -> Self {
        self.keycode = Some(keycode);
        self
    }

    pub fn with_level_labels<I, L>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.level_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Label shown at shift `level`.
    pub fn label_at(&self, level: u32) -> Option<&str> {
        self.level_labels
            .get(level as usize)
            .map(String::as_str)
            .filter(|label| !label.is_empty())
            .or(self.label.as_deref())
    }
}

/// A row of buttons, optionally rotated about its origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Bounds relative to the view origin
    pub bounds: Bounds,

    /// Rotation in degrees; positive angles turn clockwise on screen
    #[serde(default)]
    pub angle: i32,

    /// Buttons in this row
    #[serde(default)]
    pub buttons: Vec<Button>,
}

impl Row {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    pub fn with_angle(mut self, angle: i32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }
}

/// A complete keyboard surface (e.g. letters or symbols).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Unique name within the layout
    pub name: String,

    /// Bounds of the view; `x` and `y` act as a symmetric padding
    pub bounds: Bounds,

    /// Rows in painting order
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl View {
    pub fn new(name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            bounds,
            rows: Vec::new(),
        }
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Iterates over every button in row/button order.
    pub fn places(&self) -> impl Iterator<Item = ButtonPlace<'_>> + '_ {
        self.rows.iter().enumerate().flat_map(|(row_index, row)| {
            row.buttons
                .iter()
                .enumerate()
                .map(move |(button_index, button)| ButtonPlace {
                    id: ButtonId::new(row_index, button_index),
                    row,
                    button,
                })
        })
    }

    /// Resolves a button address, or `None` if it is out of range.
    pub fn place(&self, id: ButtonId) -> Option<ButtonPlace<'_>> {
        let row = self.rows.get(id.row)?;
        let button = row.buttons.get(id.button)?;
        Some(ButtonPlace { id, row, button })
    }

    /// Total number of buttons in the view.
    pub fn button_count(&self) -> usize {
        self.rows.iter().map(|row| row.buttons.len()).sum()
    }
}

/// A keyboard layout with its views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Display name of the layout
    pub name: String,

    /// Arrangement variant
    #[serde(default)]
    pub kind: ArrangementKind,

    /// Views; the first one is active initially
    pub views: Vec<View>,
}

impl Layout {
    pub fn new(name: impl Into<String>, kind: ArrangementKind) -> Self {
        Self {
            name: name.into(),
            kind,
            views: Vec::new(),
        }
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.views.push(view);
        self
    }

    /// Index of the view called `name`.
    pub fn view_index(&self, name: &str) -> Option<usize> {
        self.views.iter().position(|view| view.name == name)
    }
}

// ============================================================================
// Button Addressing
// ============================================================================

/// Index address of a button inside a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ButtonId {
    pub row: usize,
    pub button: usize,
}

impl ButtonId {
    pub const fn new(row: usize, button: usize) -> Self {
        Self { row, button }
    }
}

/// A button together with the row that contains it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPlace<'a> {
    pub id: ButtonId,
    pub row: &'a Row,
    pub button: &'a Button,
}

impl ButtonPlace<'_> {
    /// Axis-aligned bounds of the button in view space.
    pub fn bounds(&self, view_bounds: Bounds) -> Bounds {
        get_button_bounds(view_bounds, self.row.bounds, self.row.angle, self.button.bounds)
    }
}
