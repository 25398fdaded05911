// SPDX-License-Identifier: GPL-3.0-only

//! Point-in-rotated-rectangle hit testing.
//!
//! A button's rectangle is rotated exactly as in
//! [`get_button_bounds`](super::get_button_bounds), translated to the row's
//! view-space origin and split into two triangles along the 0-2 diagonal.
//! A point is inside a triangle when the edge orientation values do not have
//! mixed signs. Zero counts as agreeing with either sign, which keeps points on
//! the shared diagonal (the button centre among them) inside and makes the test
//! independent of the corner winding.

use super::types::{rotate_point, Bounds, Point};

/// Cross product of `(a - p)` and `(b - p)`; its sign tells which side of the
/// edge `a → b` the point `p` lies on.
fn edge_orientation(p: Point, a: Point, b: Point) -> f64 {
    (a.x - p.x) * (b.y - p.y) - (b.x - p.x) * (a.y - p.y)
}

fn triangle_contains(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = edge_orientation(p, a, b);
    let d2 = edge_orientation(p, b, c);
    let d3 = edge_orientation(p, c, a);

    let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_negative && has_positive)
}

/// Returns `true` if `point` lies inside `button_bounds` rotated by `angle`
/// degrees about the row origin and translated by `origin`.
///
/// # Arguments
///
/// * `button_bounds` - Button bounds relative to its row
/// * `point` - Point in the same space as `origin` (normally view space)
/// * `origin` - Row origin in that space (view origin + row origin)
/// * `angle` - Row rotation in degrees
///
/// Buttons without area never contain a point.
pub fn contains(button_bounds: Bounds, point: Point, origin: Point, angle: i32) -> bool {
    if button_bounds.is_empty() {
        return false;
    }

    let [p0, p1, p2, p3] = button_bounds
        .corners()
        .map(|corner| rotate_point(corner, angle).offset(origin.x, origin.y));

    triangle_contains(point, p0, p1, p2) || triangle_contains(point, p2, p3, p0)
}
