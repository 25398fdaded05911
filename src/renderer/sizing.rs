// SPDX-License-Identifier: GPL-3.0-only

//! Fitting the active view into the paint area.
//!
//! The view is scaled uniformly so that the view rectangle, padded on both
//! sides by its own `x`/`y` offset, fits the allocation. The scaled keyboard is
//! centred and the centring offset is rounded down to whole pixels, so the
//! keyboard's edges land on pixel boundaries.
//!
//! # Example
//!
//! ```rust,ignore
//! // A 400×100 view in an 800×300 allocation:
//! // scale = min(800 / 400, 300 / 100) = 2
//! // origin = (floor((800 - 800) / 2), floor((300 - 200) / 2)) = (0, 50)
//! let t = Transformation::for_allocation(800.0, 300.0, Bounds::new(0.0, 0.0, 400.0, 100.0));
//! ```

use crate::geometry::{Affine, Bounds, Point};

// ============================================================================
// Public API
// ============================================================================

/// The view-to-output mapping: scale first, then offset by the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    /// Horizontal offset in output pixels
    pub origin_x: f64,
    /// Vertical offset in output pixels
    pub origin_y: f64,
    /// Uniform view-to-output scale
    pub scale: f64,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transformation {
    pub const IDENTITY: Transformation = Transformation {
        origin_x: 0.0,
        origin_y: 0.0,
        scale: 1.0,
    };

    /// Computes the transformation that fits `view_bounds` into a
    /// `width × height` allocation.
    ///
    /// # Arguments
    ///
    /// * `width` - Allocation width in output pixels
    /// * `height` - Allocation height in output pixels
    /// * `view_bounds` - Bounds of the active view
    ///
    /// # Returns
    ///
    /// The fitted transformation, or [`Transformation::IDENTITY`] when either
    /// padded view extent is not positive or the allocation is empty.
    pub fn for_allocation(width: f64, height: f64, view_bounds: Bounds) -> Self {
        let w = view_bounds.x * 2.0 + view_bounds.width;
        let h = view_bounds.y * 2.0 + view_bounds.height;

        if !(w > 0.0 && h > 0.0 && width > 0.0 && height > 0.0) {
            tracing::debug!(
                "Degenerate view extent {}x{} for allocation {}x{}, using identity",
                w,
                h,
                width,
                height
            );
            return Self::IDENTITY;
        }

        let scale = (width / w).min(height / h);
        Self {
            origin_x: ((width - scale * w) / 2.0).floor(),
            origin_y: ((height - scale * h) / 2.0).floor(),
            scale,
        }
    }

    /// The transformation as an affine matrix: `translate(origin) · scale`.
    pub fn to_affine(&self) -> Affine {
        Affine::translation(self.origin_x, self.origin_y).pre_scale(self.scale, self.scale)
    }

    /// Maps a point in output (widget) coordinates to view coordinates.
    pub fn to_view(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.origin_x) / self.scale,
            (point.y - self.origin_y) / self.scale,
        )
    }

    /// Maps a point in view coordinates to output (widget) coordinates.
    pub fn to_widget(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale + self.origin_x,
            point.y * self.scale + self.origin_y,
        )
    }
}
