// SPDX-License-Identifier: GPL-3.0-only

//! Geometry primitives and the pure geometric algorithms of the renderer.
//!
//! Everything in this module is free of rendering state: points, rectangles,
//! rotation math, a small affine matrix, the rotated bounding box calculation
//! and the rotated hit test.
//!
//! # Coordinate Spaces
//!
//! - **Row-local space**: button bounds are relative to the owning row's origin.
//! - **View space**: rows are positioned relative to the view's origin; the
//!   results of [`get_button_bounds`] live here.
//! - **Output space**: view space mapped through the global
//!   [`Transformation`](crate::renderer::Transformation) onto the paint area.
//!
//! # Example
//!
//! ```rust,ignore
//! use keyrender::geometry::{get_button_bounds, contains, Bounds, Point};
//!
//! let view = Bounds::new(0.0, 0.0, 800.0, 300.0);
//! let row = Bounds::new(0.0, 0.0, 800.0, 100.0);
//! let button = Bounds::new(10.0, 10.0, 60.0, 60.0);
//!
//! let bounds = get_button_bounds(view, row, 0, button);
//! assert_eq!(bounds, Bounds::new(10.0, 10.0, 60.0, 60.0));
//!
//! assert!(contains(button, Point::new(40.0, 40.0), Point::new(0.0, 0.0), 0));
//! ```

pub mod affine;
pub mod bounds;
pub mod hit;
pub mod types;

pub use affine::Affine;
pub use bounds::{get_button_bounds, rotated_extent};
pub use hit::contains;
pub use types::{degrees_to_radians, rotate_point, Bounds, Point};
