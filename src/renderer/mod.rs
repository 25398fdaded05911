// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard renderer.
//!
//! Turns the active view of a [`Keyboard`](crate::keyboard::Keyboard) into
//! paint operations on a [`Surface`](crate::backend::Surface) and resolves
//! output coordinates back to buttons.
//!
//! # Architecture
//!
//! - **state**: the [`Renderer`] facade and its errors.
//! - **sizing**: the view-to-output [`Transformation`].
//! - **transform**: per-button transform composition, including row rotation.
//! - **label**: font fitting for button labels.
//! - **cache**: the single-entry cache of the default-state keyboard image.
//! - **key**: painting of the view background and individual buttons.
//! - **theme**: a built-in colour theme served as a style engine.
//!
//! # Two-Tier Repaint
//!
//! The first frame after any change of allocation, scale factor or view paints
//! every button in its default state into a cached surface. Each frame blits
//! that surface and then repaints only the buttons that are pressed or locked.
//!
//! # Usage
//!
//! ```rust,ignore
//! use keyrender::backend::{glyph::NoText, icons::NoIcons, raster::RasterSurface, Surface};
//! use keyrender::config::RendererConfig;
//! use keyrender::keyboard::Keyboard;
//! use keyrender::renderer::{Backends, Renderer, ThemeStyle};
//!
//! let keyboard = Keyboard::new(layout)?;
//! let backends = Backends::new(ThemeStyle::default(), NoText, NoIcons);
//! let mut renderer: Renderer<RasterSurface> =
//!     Renderer::new(keyboard, backends, RendererConfig::default())?;
//!
//! renderer.set_allocation_size(800.0, 300.0);
//! let mut frame = RasterSurface::create(800, 300)?;
//! renderer.render_keyboard(&mut frame)?;
//!
//! if let Some(place) = renderer.hit_test(Point::new(120.0, 40.0)) {
//!     let id = place.id;
//!     renderer.keyboard_mut().press(id)?;
//! }
//! ```

pub mod cache;
pub mod key;
pub mod label;
pub mod sizing;
pub mod state;
pub mod theme;
pub mod transform;

pub use cache::{CacheKey, SurfaceCache};
pub use label::compute_label_scale;
pub use sizing::Transformation;
pub use state::{find_button, Backends, RenderError, Renderer};
pub use theme::{Theme, ThemeStyle};
pub use transform::{compose, pivot_offset};
