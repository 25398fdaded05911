// SPDX-License-Identifier: GPL-3.0-only

//! Points, rectangles and rotation.

use serde::{Deserialize, Serialize};

/// Converts an integer angle in degrees to radians.
pub fn degrees_to_radians(angle: i32) -> f64 {
    f64::from(angle).to_radians()
}

/// Rotates a point about the origin by `angle` degrees.
///
/// Uses the standard rotation `x' = x·cosθ − y·sinθ, y' = x·sinθ + y·cosθ`.
/// With a y-down coordinate system a positive angle turns clockwise on screen.
pub fn rotate_point(point: Point, angle: i32) -> Point {
    if angle == 0 {
        return point;
    }
    let (sin, cos) = degrees_to_radians(angle).sin_cos();
    Point {
        x: point.x * cos - point.y * sin,
        y: point.x * sin + point.y * cos,
    }
}

/// A real-valued 2D coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point moved by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns this point rotated about the origin by `angle` degrees.
    pub fn rotated(self, angle: i32) -> Self {
        rotate_point(self, angle)
    }
}

/// An axis-aligned rectangle with a top-left origin.
///
/// Width and height are never negative; constructing a rectangle with a
/// negative extent is a caller bug and trips a debug assertion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        debug_assert!(
            width >= 0.0 && height >= 0.0,
            "bounds must not have a negative extent: {}x{}",
            width,
            height
        );
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle enclosing all `points`.
    ///
    /// Returns an empty rectangle at the origin for an empty slice.
    pub fn enclosing(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (mut min, mut max) = (*first, *first);
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in the order top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Returns `true` for rectangles with no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Returns this rectangle moved by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Returns this rectangle shrunk by the given amounts on each side.
    ///
    /// The result never has a negative extent.
    pub fn inset(&self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(
            self.x + left,
            self.y + top,
            (self.width - left - right).max(0.0),
            (self.height - top - bottom).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_near(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_rotate_point_quarter_turns() {
        let p = Point::new(10.0, 0.0);
        assert_point_near(p.rotated(90), Point::new(0.0, 10.0));
        assert_point_near(p.rotated(180), Point::new(-10.0, 0.0));
        assert_point_near(p.rotated(-90), Point::new(0.0, -10.0));
        assert_point_near(p.rotated(360), p);
        assert_point_near(p.rotated(0), p);
    }

    #[test]
    fn test_rotate_point_preserves_distance() {
        let p = Point::new(3.0, 4.0);
        for angle in [-725, -45, 17, 33, 200] {
            let r = p.rotated(angle);
            let len = (r.x * r.x + r.y * r.y).sqrt();
            assert!((len - 5.0).abs() < 1e-9, "angle {} changed length to {}", angle, len);
        }
    }

    #[test]
    fn test_bounds_corners_order() {
        let b = Bounds::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            b.corners(),
            [
                Point::new(1.0, 2.0),
                Point::new(4.0, 2.0),
                Point::new(4.0, 6.0),
                Point::new(1.0, 6.0),
            ]
        );
        assert_eq!(b.center(), Point::new(2.5, 4.0));
    }

    #[test]
    fn test_enclosing_points() {
        let b = Bounds::enclosing(&[
            Point::new(5.0, -1.0),
            Point::new(-2.0, 3.0),
            Point::new(1.0, 7.0),
        ]);
        assert_eq!(b, Bounds::new(-2.0, -1.0, 7.0, 8.0));
        assert_eq!(Bounds::enclosing(&[]), Bounds::default());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(10.0, 10.0)));
        assert!(!b.contains(Point::new(10.1, 5.0)));
        assert!(!b.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn test_inset_never_negative() {
        let b = Bounds::new(0.0, 0.0, 10.0, 4.0);
        assert_eq!(b.inset(1.0, 1.0, 1.0, 1.0), Bounds::new(1.0, 1.0, 8.0, 2.0));
        let collapsed = b.inset(3.0, 3.0, 3.0, 3.0);
        assert_eq!(collapsed.height, 0.0);
        assert!(collapsed.is_empty());
    }
}
