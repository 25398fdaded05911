// SPDX-License-Identifier: GPL-3.0-only

//! View-space bounding boxes of rotated buttons.
//!
//! A row may carry a rotation angle. Its buttons are rotated about the row's
//! origin, so the space a button occupies in the view is the axis-aligned box
//! around its rotated corners. For angles that are not multiples of 90° that
//! box is strictly larger than the button itself; layout and hit testing rely
//! on that larger footprint.

use super::types::{rotate_point, Bounds};

/// Axis-aligned box around `bounds` rotated about the origin by `angle`
/// degrees.
///
/// The corners keep their offset from the origin, so a button at `(10, 0)`
/// rotated by 90° ends up at `(0, 10)`, not in place.
pub fn rotated_extent(bounds: Bounds, angle: i32) -> Bounds {
    let corners = bounds.corners().map(|p| rotate_point(p, angle));
    Bounds::enclosing(&corners)
}

/// Computes the view-space bounds of a button.
///
/// The button's corners are rotated about the row-local origin by
/// `row_angle`, enclosed in an axis-aligned box, and that box is translated
/// by the view and row origins.
///
/// # Arguments
///
/// * `view_bounds` - Bounds of the view; only its origin is used
/// * `row_bounds` - Bounds of the row, relative to the view origin
/// * `row_angle` - Rotation of the row in degrees
/// * `button_bounds` - Bounds of the button, relative to the row origin
///
/// # Example
///
/// ```rust,ignore
/// let bounds = get_button_bounds(
///     Bounds::new(0.0, 0.0, 800.0, 300.0),
///     Bounds::new(0.0, 0.0, 800.0, 100.0),
///     0,
///     Bounds::new(10.0, 10.0, 60.0, 60.0),
/// );
/// assert_eq!(bounds, Bounds::new(10.0, 10.0, 60.0, 60.0));
/// ```
pub fn get_button_bounds(
    view_bounds: Bounds,
    row_bounds: Bounds,
    row_angle: i32,
    button_bounds: Bounds,
) -> Bounds {
    rotated_extent(button_bounds, row_angle).translate(
        view_bounds.x + row_bounds.x,
        view_bounds.y + row_bounds.y,
    )
}
