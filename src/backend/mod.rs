// SPDX-License-Identifier: GPL-3.0-only

//! Contracts with the external paint, style, text and icon collaborators.
//!
//! The renderer owns the geometry and the caching policy; everything that
//! turns a styled rectangle into pixels is delegated through the traits in
//! this module:
//!
//! - [`Canvas`] and [`Surface`]: the paint context and the cached surface.
//! - [`StyleEngine`]: resolves colours and border/margin widths for the view
//!   and for each button in a given pressed/locked state.
//! - [`TextShaper`]: measures a label and produces its coverage mask.
//! - [`IconLookup`]: resolves an icon name to an alpha bitmap.
//! - [`ChangeTracker`]: reports buttons whose transient state differs from the
//!   default state painted into the cache.
//!
//! Reference implementations live in the sub-modules: [`raster`] (tiny-skia
//! surfaces), [`glyph`] (ab_glyph text) and [`icons`] (PNG icon directories).

pub mod glyph;
pub mod icons;
pub mod raster;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Affine, Bounds, Point};
use crate::keyboard::ButtonState;
use crate::layout::{ArrangementKind, ButtonId};

// ============================================================================
// Error Handling Types
// ============================================================================

/// Error reported by a collaborator.
///
/// None of these abort a render: the renderer logs them and skips the
/// affected visual element.
#[derive(Debug)]
pub enum BackendError {
    /// The style engine could not resolve a style
    StyleUnavailable {
        /// Style identifier that was queried
        name: String,
        /// Why the lookup failed
        reason: String,
    },

    /// No icon with the given name exists at the requested size
    IconNotFound {
        /// Icon name that was queried
        name: String,
        /// Optional detail from the lookup (e.g. a decoding error)
        reason: Option<String>,
    },

    /// The text shaping engine failed to lay out a label
    TextShaping {
        /// The label text
        text: String,
        /// Why shaping failed
        reason: String,
    },

    /// A surface of the requested size could not be allocated
    SurfaceAllocation {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// A font file could not be read or parsed
    FontLoad {
        /// Font file path
        path: String,
        /// Why loading failed
        reason: String,
    },

    /// Writing an image failed
    Encode {
        /// Destination that was being written
        path: String,
        /// Why encoding failed
        reason: String,
    },
}

impl BackendError {
    /// Creates a style error.
    pub fn style(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StyleUnavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an icon-not-found error without further detail.
    pub fn icon_not_found(name: impl Into<String>) -> Self {
        Self::IconNotFound {
            name: name.into(),
            reason: None,
        }
    }

    /// Creates a text shaping error.
    pub fn text(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TextShaping {
            text: text.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::StyleUnavailable { name, reason } => {
                write!(f, "style for '{}' unavailable: {}", name, reason)
            }
            BackendError::IconNotFound { name, reason } => {
                write!(f, "icon '{}' not found", name)?;
                if let Some(reason) = reason {
                    write!(f, ": {}", reason)?;
                }
                Ok(())
            }
            BackendError::TextShaping { text, reason } => {
                write!(f, "can't shape label '{}': {}", text, reason)
            }
            BackendError::SurfaceAllocation { width, height } => {
                write!(f, "can't allocate a {}x{} surface", width, height)
            }
            BackendError::FontLoad { path, reason } => {
                write!(f, "can't load font '{}': {}", path, reason)
            }
            BackendError::Encode { path, reason } => {
                write!(f, "can't write image '{}': {}", path, reason)
            }
        }
    }
}

impl std::error::Error for BackendError {}

// ============================================================================
// Style Types
// ============================================================================

/// An RGBA colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    /// Returns this colour with its alpha multiplied by `factor`.
    pub fn scale_alpha(self, factor: f64) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Returns this colour with every component clamped to `0.0..=1.0`.
    pub fn clamped(self) -> Self {
        Self::rgba(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Widths of the four sides of a margin or border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    /// The same width on every side.
    pub const fn uniform(width: f64) -> Self {
        Self {
            top: width,
            right: width,
            bottom: width,
            left: width,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

/// Resolved style of the view background.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewStyle {
    pub background: Color,
    pub border: Edges,
    pub border_color: Color,
}

/// Resolved style of a single button in a given state.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyle {
    pub margin: Edges,
    pub border: Edges,
    pub background: Color,
    pub border_color: Color,
    pub foreground: Color,
}

/// Everything a style engine needs to resolve a button style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleQuery<'a> {
    /// Button name (widget name in style-sheet terms)
    pub name: &'a str,
    /// Outline class of the button
    pub outline: &'a str,
    /// Whether the button is being pressed
    pub pressed: bool,
    /// Whether the button is latched
    pub locked: bool,
    /// Arrangement of the active layout
    pub arrangement: ArrangementKind,
}

impl StyleQuery<'_> {
    /// Style classes that apply to the button, outermost first.
    ///
    /// The arrangement class (e.g. `wide`) comes first, followed by the
    /// outline class and the `locked` class when latched.
    pub fn classes(&self) -> Vec<&str> {
        let mut classes = Vec::with_capacity(3);
        if let Some(class) = self.arrangement.style_class() {
            classes.push(class);
        }
        if !self.outline.is_empty() {
            classes.push(self.outline);
        }
        if self.locked {
            classes.push(crate::app_settings::LOCKED_CLASS);
        }
        classes
    }
}

// ============================================================================
// Text and Bitmap Types
// ============================================================================

/// Font family and size (in pixels) used for button labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescription {
    pub family: String,
    pub size: f64,
}

impl FontDescription {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Returns a copy with the size multiplied by `scale`.
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            family: self.family.clone(),
            size: self.size * scale,
        }
    }
}

/// Resolved base direction of a shaped label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// An 8-bit alpha coverage bitmap.
///
/// Used for icons and for rasterised text. `data` holds `width × height`
/// coverage values in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl AlphaMask {
    /// Creates a fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Coverage at `(x, y)`, or `None` outside the mask.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y as usize * self.width as usize + x as usize).copied()
    }
}

/// A laid out label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub text: String,
    /// Logical width of the ink extents
    pub width: f64,
    /// Logical height of the line
    pub height: f64,
    pub direction: TextDirection,
    /// Coverage of the rendered glyphs, if the shaper rasterises text
    pub mask: Option<AlphaMask>,
}

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Drawing operations the renderer issues.
///
/// All geometry is given in user space and mapped to device space by
/// `transform`.
pub trait Canvas {
    /// Fills `rect` with a solid colour.
    fn fill_rect(&mut self, transform: &Affine, rect: Bounds, color: Color);

    /// Paints `color` through `mask`, with the mask's top-left corner at `at`.
    ///
    /// One mask pixel covers `1 / scale_factor` user-space units, so HiDPI
    /// bitmaps keep their logical size.
    fn fill_mask(&mut self, transform: &Affine, mask: &AlphaMask, at: Point, scale_factor: f64, color: Color);
}

/// A paint target that can be allocated and composited.
pub trait Surface: Canvas + Sized {
    /// Allocates a fully transparent surface.
    fn create(width: u32, height: u32) -> Result<Self, BackendError>;

    /// Copies `source` over this surface at the origin, replacing the pixels it
    /// covers.
    fn blit(&mut self, source: &Self);
}

/// Resolves visual styles.
pub trait StyleEngine {
    fn view_style(&self, arrangement: ArrangementKind) -> Result<ViewStyle, BackendError>;

    fn button_style(&self, query: &StyleQuery<'_>) -> Result<ButtonStyle, BackendError>;
}

/// Measures labels and produces their coverage.
pub trait TextShaper {
    /// Lays out `text` with `font`, wrapping or clipping at `max_width`.
    fn layout(&self, font: &FontDescription, max_width: f64, text: &str) -> Result<TextLayout, BackendError>;
}

/// Resolves icon names to bitmaps.
pub trait IconLookup {
    /// Looks up `name` at `size` logical pixels for an output with the given
    /// scale factor. The returned mask is `size × scale_factor` pixels wide.
    fn lookup(&self, name: &str, size: u32, scale_factor: i32) -> Result<AlphaMask, BackendError>;
}

/// Reports buttons of the active view whose state differs from the default
/// (unpressed, unlocked) state.
pub trait ChangeTracker {
    fn changed_buttons(&self) -> Vec<(ButtonId, ButtonState)>;
}
