// SPDX-License-Identifier: GPL-3.0-only

//! Per-button transforms.
//!
//! Buttons are painted in their own local space: the rectangle
//! `(0, 0, width, height)`. [`compose`] builds the matrix that maps this local
//! space to the output, so that the rotated button lands exactly in the box
//! [`get_button_bounds`] reports for it.

use crate::geometry::{get_button_bounds, rotated_extent, Affine, Bounds, Point};

use super::sizing::Transformation;

/// Translation that moves a rotated local button back into the positive
/// quadrant.
///
/// Equals minus the top-left corner of `(0, 0, w, h)` rotated by `angle`. For
/// angles in `[-90°, 90°]` this reduces to `(0, -w·sinθ)` when `sinθ < 0` and
/// `(h·sinθ, 0)` otherwise.
pub fn pivot_offset(size: Bounds, angle: i32) -> Point {
    let extent = rotated_extent(Bounds::new(0.0, 0.0, size.width, size.height), angle);
    Point::new(-extent.x, -extent.y)
}

/// Composes the transform that maps a button's local rectangle to output
/// coordinates.
///
/// The order, in painting terms, is: base transformation, translation to the
/// button's view-space bounding box, `extra_scale`, pivot offset, rotation.
///
/// # Arguments
///
/// * `base` - View-to-output transformation
/// * `view_bounds` - Bounds of the active view
/// * `row_bounds` - Bounds of the button's row
/// * `row_angle` - Rotation of the row in degrees
/// * `button_bounds` - Bounds of the button relative to its row
/// * `extra_scale` - Additional scale around the bounding box's top-left
///   corner; `1.0` for in-place painting
pub fn compose(
    base: &Transformation,
    view_bounds: Bounds,
    row_bounds: Bounds,
    row_angle: i32,
    button_bounds: Bounds,
    extra_scale: f64,
) -> Affine {
    let bounds = get_button_bounds(view_bounds, row_bounds, row_angle, button_bounds);
    let pivot = pivot_offset(button_bounds, row_angle);

    base.to_affine()
        .pre_translate(bounds.x, bounds.y)
        .pre_scale(extra_scale, extra_scale)
        .pre_translate(pivot.x, pivot.y)
        .pre_rotate(row_angle)
}
