// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard layout tree.
//!
//! The layout is plain data: views, rows and buttons with their bounds, style
//! identifiers and labels. Hosts build it in code or deserialize it with any
//! serde format.
//!
//! # Example
//!
//! ```rust,ignore
//! use keyrender::geometry::Bounds;
//! use keyrender::layout::{ArrangementKind, Button, Layout, Row, View};
//!
//! let layout = Layout::new("mini", ArrangementKind::Base).with_view(
//!     View::new("base", Bounds::new(0.0, 0.0, 100.0, 40.0)).with_row(
//!         Row::new(Bounds::new(0.0, 0.0, 100.0, 40.0))
//!             .with_button(Button::new("a", Bounds::new(0.0, 0.0, 40.0, 40.0)).with_label("a")),
//!     ),
//! );
//! ```

pub mod types;

pub use types::{ArrangementKind, Button, ButtonId, ButtonPlace, Layout, Row, View};
