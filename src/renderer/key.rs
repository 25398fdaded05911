// SPDX-License-Identifier: GPL-3.0-only

//! Painting of the view background and of individual buttons.
//!
//! A button is painted in its local space `(0, 0, width, height)` through the
//! transform built by [`compose`](super::transform::compose):
//!
//! 1. The outline: the style's background inside margin and border, and the
//!    border frame around it.
//! 2. The icon, if the button names one and it can be found, tinted with the
//!    foreground colour and centred.
//! 3. Otherwise the label, with the font fitted to the border width.
//!
//! Collaborator failures never abort painting; they are logged and the
//! affected element is skipped.

use crate::backend::{
    ButtonStyle, Canvas, Color, Edges, FontDescription, IconLookup, StyleEngine, StyleQuery,
    TextShaper,
};
use crate::geometry::{Affine, Bounds, Point};
use crate::keyboard::ButtonState;
use crate::layout::{ArrangementKind, Button};
use crate::renderer::label::{fit_font, label_origin};

/// Borrowed collaborators and settings needed to paint.
pub struct Painter<'a> {
    pub style: &'a dyn StyleEngine,
    pub text: &'a dyn TextShaper,
    pub icons: &'a dyn IconLookup,
    pub font: &'a FontDescription,
    pub border_width: f64,
    pub icon_size: u32,
    pub scale_factor: i32,
    /// Output pixels per view unit; labels are rasterised at this density
    pub output_scale: f64,
    /// Shift level selecting button labels
    pub level: u32,
    pub arrangement: ArrangementKind,
    /// Foreground used when the button style cannot be resolved
    pub fallback_foreground: Color,
}

/// Rectangles of a frame of widths `border` drawn inside `outer`.
///
/// Top and bottom strips span the full width; left and right strips fill the
/// height between them. Empty strips are omitted.
pub fn frame_strips(outer: Bounds, border: &Edges) -> Vec<Bounds> {
    let top = border.top.clamp(0.0, outer.height);
    let bottom = border.bottom.clamp(0.0, outer.height - top);
    let left = border.left.clamp(0.0, outer.width);
    let right = border.right.clamp(0.0, outer.width - left);
    let middle = outer.height - top - bottom;

    [
        Bounds::new(outer.x, outer.y, outer.width, top),
        Bounds::new(outer.x, outer.bottom() - bottom, outer.width, bottom),
        Bounds::new(outer.x, outer.y + top, left, middle),
        Bounds::new(outer.right() - right, outer.y + top, right, middle),
    ]
    .into_iter()
    .filter(|strip| !strip.is_empty())
    .collect()
}

impl Painter<'_> {
    /// Paints the view background over the whole `width × height` allocation
    /// in output coordinates.
    pub fn paint_view_background(&self, canvas: &mut dyn Canvas, width: f64, height: f64) {
        let style = match self.style.view_style(self.arrangement) {
            Ok(style) => style,
            Err(e) => {
                tracing::warn!("Skipping keyboard background: {}", e);
                return;
            }
        };
        let area = Bounds::new(0.0, 0.0, width, height);
        canvas.fill_rect(&Affine::IDENTITY, area, style.background);
        for strip in frame_strips(area, &style.border) {
            canvas.fill_rect(&Affine::IDENTITY, strip, style.border_color);
        }
    }

    /// Paints one button through `transform` in the given state.
    pub fn paint_button(
        &self,
        canvas: &mut dyn Canvas,
        transform: &Affine,
        button: &Button,
        state: ButtonState,
    ) {
        let local = Bounds::new(0.0, 0.0, button.bounds.width, button.bounds.height);
        let query = StyleQuery {
            name: &button.name,
            outline: &button.outline,
            pressed: state.pressed,
            locked: state.locked,
            arrangement: self.arrangement,
        };

        let foreground = match self.style.button_style(&query) {
            Ok(style) => {
                paint_outline(canvas, transform, local, &style);
                style.foreground
            }
            Err(e) => {
                tracing::warn!("Skipping outline of button '{}': {}", button.name, e);
                self.fallback_foreground
            }
        };

        if let Some(icon) = &button.icon {
            if self.paint_icon(canvas, transform, local, icon, foreground) {
                return;
            }
        }
        self.paint_label(canvas, transform, button, foreground);
    }

    /// Returns `false` if the icon could not be found.
    fn paint_icon(
        &self,
        canvas: &mut dyn Canvas,
        transform: &Affine,
        local: Bounds,
        name: &str,
        color: Color,
    ) -> bool {
        let mask = match self.icons.lookup(name, self.icon_size, self.scale_factor) {
            Ok(mask) => mask,
            Err(e) => {
                tracing::warn!("can't get icon surface for {}: {}", name, e);
                return false;
            }
        };
        let sf = f64::from(self.scale_factor.max(1));
        let at = Point::new(
            (local.width - f64::from(mask.width) / sf) / 2.0,
            (local.height - f64::from(mask.height) / sf) / 2.0,
        );
        canvas.fill_mask(transform, &mask, at, sf, color);
        true
    }

    fn paint_label(&self, canvas: &mut dyn Canvas, transform: &Affine, button: &Button, color: Color) {
        let Some(label) = button.label_at(self.level).filter(|label| !label.is_empty()) else {
            return;
        };
        let (font, max_width) = fit_font(self.font, button.bounds, self.border_width);
        let density = self.label_density();
        let layout = match self.text.layout(&font.scaled(density), max_width * density, label) {
            Ok(layout) => layout,
            Err(e) => {
                tracing::warn!("Skipping label of button '{}': {}", button.name, e);
                return;
            }
        };
        if let Some(mask) = &layout.mask {
            let at = label_origin(button.bounds, max_width, &layout, density);
            canvas.fill_mask(transform, mask, at, density, color);
        }
    }

    fn label_density(&self) -> f64 {
        if self.output_scale.is_finite() && self.output_scale > 0.0 {
            self.output_scale
        } else {
            1.0
        }
    }
}

/// Paints the background inside margin and border, then the border frame.
fn paint_outline(canvas: &mut dyn Canvas, transform: &Affine, local: Bounds, style: &ButtonStyle) {
    let m = &style.margin;
    let b = &style.border;
    let outer = local.inset(m.left, m.top, m.right, m.bottom);
    let inner = outer.inset(b.left, b.top, b.right, b.bottom);

    if !inner.is_empty() {
        canvas.fill_rect(transform, inner, style.background);
    }
    for strip in frame_strips(outer, b) {
        canvas.fill_rect(transform, strip, style.border_color);
    }
}
