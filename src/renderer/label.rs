// SPDX-License-Identifier: GPL-3.0-only

//! Fitting label text inside a button.

use crate::backend::{FontDescription, TextDirection, TextLayout};
use crate::geometry::{Bounds, Point};

/// Scale factor applied to the base font so a label clears the button border.
///
/// Returns `min((w - b) / w, (h - b) / h)` clamped to `[0, 1]`. A zero border
/// yields exactly `1.0`, and so does a button without area.
///
/// # Example
///
/// ```rust,ignore
/// let scale = compute_label_scale(Bounds::new(0.0, 0.0, 40.0, 20.0), 2.0);
/// assert_eq!(scale, 0.9); // min(38 / 40, 18 / 20)
/// ```
pub fn compute_label_scale(button_bounds: Bounds, border_width: f64) -> f64 {
    let (w, h) = (button_bounds.width, button_bounds.height);
    if border_width == 0.0 || w <= 0.0 || h <= 0.0 {
        return 1.0;
    }
    ((w - border_width) / w)
        .min((h - border_width) / h)
        .clamp(0.0, 1.0)
}

/// Base font resized for `button_bounds`, plus the maximum layout width.
pub fn fit_font(base: &FontDescription, button_bounds: Bounds, border_width: f64) -> (FontDescription, f64) {
    let scale = compute_label_scale(button_bounds, border_width);
    (base.scaled(scale), button_bounds.width * scale)
}

/// Top-left corner of a label in button-local coordinates.
///
/// `layout` is measured in output pixels at `pixel_scale` pixels per view
/// unit. The label is centred in the button; right-to-left text is
/// right-aligned inside the centred `max_width` box instead.
pub fn label_origin(button_bounds: Bounds, max_width: f64, layout: &TextLayout, pixel_scale: f64) -> Point {
    let text_width = layout.width / pixel_scale;
    let text_height = layout.height / pixel_scale;
    let x = match layout.direction {
        TextDirection::RightToLeft => (button_bounds.width + max_width) / 2.0 - text_width,
        TextDirection::LeftToRight => (button_bounds.width - text_width) / 2.0,
    };
    Point::new(x, (button_bounds.height - text_height) / 2.0)
}
