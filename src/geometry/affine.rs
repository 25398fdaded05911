// SPDX-License-Identifier: GPL-3.0-only

//! A 2×3 affine matrix with cairo-style operations.
//!
//! The `pre_*` operations modify user space the way `cairo_translate`,
//! `cairo_scale` and `cairo_rotate` do: the new operation is applied to points
//! *before* the existing matrix. Chaining therefore reads in painting order:
//!
//! ```rust,ignore
//! // Equivalent to cairo_translate(cr, 10, 0); cairo_rotate(cr, 90°);
//! let m = Affine::IDENTITY.pre_translate(10.0, 0.0).pre_rotate(90);
//! ```

use super::types::{degrees_to_radians, Bounds, Point};

/// Affine transform mapping `(x, y)` to
/// `(xx·x + xy·y + x0, yx·x + yy·y + y0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        xx: 1.0,
        yx: 0.0,
        xy: 0.0,
        yy: 1.0,
        x0: 0.0,
        y0: 0.0,
    };

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            x0: tx,
            y0: ty,
            ..Self::IDENTITY
        }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            xx: sx,
            yy: sy,
            ..Self::IDENTITY
        }
    }

    /// Rotation about the origin by `angle` degrees.
    pub fn rotation(angle: i32) -> Self {
        if angle == 0 {
            return Self::IDENTITY;
        }
        let (sin, cos) = degrees_to_radians(angle).sin_cos();
        Self {
            xx: cos,
            yx: sin,
            xy: -sin,
            yy: cos,
            x0: 0.0,
            y0: 0.0,
        }
    }

    /// Returns `self × other`: `other` is applied to points first.
    pub fn concat(&self, other: &Affine) -> Self {
        Self {
            xx: self.xx * other.xx + self.xy * other.yx,
            yx: self.yx * other.xx + self.yy * other.yx,
            xy: self.xx * other.xy + self.xy * other.yy,
            yy: self.yx * other.xy + self.yy * other.yy,
            x0: self.xx * other.x0 + self.xy * other.y0 + self.x0,
            y0: self.yx * other.x0 + self.yy * other.y0 + self.y0,
        }
    }

    pub fn pre_translate(self, tx: f64, ty: f64) -> Self {
        self.concat(&Self::translation(tx, ty))
    }

    pub fn pre_scale(self, sx: f64, sy: f64) -> Self {
        self.concat(&Self::scaling(sx, sy))
    }

    pub fn pre_rotate(self, angle: i32) -> Self {
        self.concat(&Self::rotation(angle))
    }

    pub fn apply(&self, point: Point) -> Point {
        Point {
            x: self.xx * point.x + self.xy * point.y + self.x0,
            y: self.yx * point.x + self.yy * point.y + self.y0,
        }
    }

    /// Axis-aligned box of the transformed corners of `bounds`.
    pub fn transform_bounds(&self, bounds: Bounds) -> Bounds {
        let corners = bounds.corners().map(|p| self.apply(p));
        Bounds::enclosing(&corners)
    }

    pub fn determinant(&self) -> f64 {
        self.xx * self.yy - self.xy * self.yx
    }

    /// Inverse transform, or `None` for a singular matrix.
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let xx = self.yy / det;
        let yx = -self.yx / det;
        let xy = -self.xy / det;
        let yy = self.xx / det;
        Some(Self {
            xx,
            yx,
            xy,
            yy,
            x0: -(xx * self.x0 + xy * self.y0),
            y0: -(yx * self.x0 + yy * self.y0),
        })
    }

    /// Component-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Affine, epsilon: f64) -> bool {
        (self.xx - other.xx).abs() <= epsilon
            && (self.yx - other.yx).abs() <= epsilon
            && (self.xy - other.xy).abs() <= epsilon
            && (self.yy - other.yy).abs() <= epsilon
            && (self.x0 - other.x0).abs() <= epsilon
            && (self.y0 - other.y0).abs() <= epsilon
    }
}
