// SPDX-License-Identifier: GPL-3.0-only

//! Test doubles for the collaborator traits.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{
    AlphaMask, BackendError, ButtonStyle, Canvas, Color, Edges, FontDescription, IconLookup,
    StyleEngine, StyleQuery, Surface, TextDirection, TextLayout, TextShaper, ViewStyle,
};
use crate::geometry::{Affine, Bounds, Point};
use crate::layout::ArrangementKind;

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

pub const VIEW_BACKGROUND: Color = Color::rgba(0.1, 0.1, 0.1, 1.0);
pub const KEY_BACKGROUND: Color = Color::rgba(0.3, 0.3, 0.3, 1.0);
pub const PRESSED_BACKGROUND: Color = Color::rgba(0.6, 0.6, 0.6, 1.0);
pub const LOCKED_BACKGROUND: Color = Color::rgba(0.2, 0.4, 0.8, 1.0);
pub const BORDER: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
pub const FOREGROUND: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

/// A paint operation captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Fill {
        transform: Affine,
        rect: Bounds,
        color: Color,
    },
    Mask {
        transform: Affine,
        width: u32,
        height: u32,
        at: Point,
        scale_factor: f64,
        color: Color,
    },
    Blit {
        source: u64,
    },
}

/// Surface that records operations instead of painting.
#[derive(Debug)]
pub struct RecordingSurface {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    /// Surface used as a paint target; its id is not shared with the cache.
    pub fn target(width: u32, height: u32) -> Self {
        Self::create(width, height).unwrap()
    }

    pub fn fills(&self) -> Vec<(Affine, Bounds, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill {
                    transform,
                    rect,
                    color,
                } => Some((*transform, *rect, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn masks(&self) -> Vec<&Op> {
        self.ops.iter().filter(|op| matches!(op, Op::Mask { .. })).collect()
    }

    pub fn blits(&self) -> Vec<u64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Blit { source } => Some(*source),
                _ => None,
            })
            .collect()
    }

    /// Fills painted with `color`.
    pub fn fills_with(&self, color: Color) -> usize {
        self.fills().iter().filter(|(_, _, c)| *c == color).count()
    }
}

impl Canvas for RecordingSurface {
    fn fill_rect(&mut self, transform: &Affine, rect: Bounds, color: Color) {
        self.ops.push(Op::Fill {
            transform: *transform,
            rect,
            color,
        });
    }

    fn fill_mask(&mut self, transform: &Affine, mask: &AlphaMask, at: Point, scale_factor: f64, color: Color) {
        self.ops.push(Op::Mask {
            transform: *transform,
            width: mask.width,
            height: mask.height,
            at,
            scale_factor,
            color,
        });
    }
}

impl Surface for RecordingSurface {
    fn create(width: u32, height: u32) -> Result<Self, BackendError> {
        if width == 0 || height == 0 {
            return Err(BackendError::SurfaceAllocation { width, height });
        }
        Ok(Self {
            id: NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            ops: Vec::new(),
        })
    }

    fn blit(&mut self, source: &Self) {
        self.ops.push(Op::Blit { source: source.id });
    }
}

/// Style engine with fixed colours and uniform widths.
#[derive(Debug, Clone)]
pub struct FixedStyle {
    pub margin: f64,
    pub border: f64,
    /// Button names whose style lookup fails
    pub failing: Vec<String>,
    pub fail_view: bool,
    pub queries: Rc<RefCell<Vec<(String, Vec<String>, bool, bool)>>>,
}

impl FixedStyle {
    pub fn new(margin: f64, border: f64) -> Self {
        Self {
            margin,
            border,
            failing: Vec::new(),
            fail_view: false,
            queries: Rc::default(),
        }
    }

    pub fn failing_for(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }
}

impl StyleEngine for FixedStyle {
    fn view_style(&self, _arrangement: ArrangementKind) -> Result<ViewStyle, BackendError> {
        if self.fail_view {
            return Err(BackendError::style("keyboard", "no style sheet"));
        }
        Ok(ViewStyle {
            background: VIEW_BACKGROUND,
            border: Edges::default(),
            border_color: BORDER,
        })
    }

    fn button_style(&self, query: &StyleQuery<'_>) -> Result<ButtonStyle, BackendError> {
        self.queries.borrow_mut().push((
            query.name.to_string(),
            query.classes().iter().map(|c| c.to_string()).collect(),
            query.pressed,
            query.locked,
        ));
        if self.failing.iter().any(|name| name == query.name) {
            return Err(BackendError::style(query.name, "no rule matches"));
        }
        let background = if query.pressed {
            PRESSED_BACKGROUND
        } else if query.locked {
            LOCKED_BACKGROUND
        } else {
            KEY_BACKGROUND
        };
        Ok(ButtonStyle {
            margin: Edges::uniform(self.margin),
            border: Edges::uniform(self.border),
            background,
            border_color: BORDER,
            foreground: FOREGROUND,
        })
    }
}

/// Shaper with fixed metrics: each character is `size / 2` wide and a line is
/// `size` tall. Records every request.
#[derive(Debug, Clone, Default)]
pub struct FixedShaper {
    pub calls: Rc<RefCell<Vec<(FontDescription, f64, String)>>>,
}

impl TextShaper for FixedShaper {
    fn layout(&self, font: &FontDescription, max_width: f64, text: &str) -> Result<TextLayout, BackendError> {
        self.calls
            .borrow_mut()
            .push((font.clone(), max_width, text.to_string()));
        let width = (font.size / 2.0 * text.chars().count() as f64).min(max_width);
        Ok(TextLayout {
            text: text.to_string(),
            width,
            height: font.size,
            direction: TextDirection::LeftToRight,
            mask: Some(AlphaMask::new(width.ceil() as u32, font.size.ceil() as u32)),
        })
    }
}

/// Icon lookup over an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct IconMap {
    pub icons: HashMap<String, AlphaMask>,
    pub lookups: Rc<RefCell<Vec<(String, u32, i32)>>>,
}

impl IconMap {
    pub fn with_icon(mut self, name: &str, size: u32) -> Self {
        self.icons.insert(name.to_string(), AlphaMask::new(size, size));
        self
    }
}

impl IconLookup for IconMap {
    fn lookup(&self, name: &str, size: u32, scale_factor: i32) -> Result<AlphaMask, BackendError> {
        self.lookups
            .borrow_mut()
            .push((name.to_string(), size, scale_factor));
        self.icons
            .get(name)
            .cloned()
            .ok_or_else(|| BackendError::icon_not_found(name))
    }
}
