// SPDX-License-Identifier: GPL-3.0-only

//! The renderer facade.
//!
//! [`Renderer`] owns the keyboard, the collaborators and the cached keyboard
//! image. Hosts drive it with three kinds of calls:
//!
//! - configuration changes (`set_allocation_size`, `set_scale_factor`,
//!   `set_view`, `set_keysym_index`, `invalidate`), each of which forces a
//!   rebuild of the cached image on the next frame;
//! - paint requests (`render_keyboard`, `render_button`);
//! - input queries (`hit_test`).

use std::fmt;

use crate::backend::{
    BackendError, Canvas, ChangeTracker, FontDescription, IconLookup, StyleEngine, Surface,
    TextShaper,
};
use crate::config::{ConfigError, RendererConfig};
use crate::geometry::{contains, Bounds, Point};
use crate::keyboard::{ButtonState, Keyboard, KeyboardError};
use crate::layout::{ButtonId, ButtonPlace, View};
use crate::renderer::cache::{CacheKey, SurfaceCache};
use crate::renderer::key::Painter;
use crate::renderer::sizing::Transformation;
use crate::renderer::transform::compose;

// ============================================================================
// Error Handling Types
// ============================================================================

/// Errors returned by [`Renderer`] operations.
#[derive(Debug)]
pub enum RenderError {
    /// `render_keyboard` was called before an allocation size was set
    NoAllocation,
    /// The button address is out of range for the active view
    UnknownButton(ButtonId),
    /// A negative extra scale was requested
    InvalidScale(f64),
    /// The cached surface could not be created
    Surface(BackendError),
    /// A keyboard operation failed
    Keyboard(KeyboardError),
    /// The renderer configuration is invalid
    Config(ConfigError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NoAllocation => write!(f, "no allocation size set"),
            RenderError::UnknownButton(id) => {
                write!(f, "no button at row {} index {}", id.row, id.button)
            }
            RenderError::InvalidScale(scale) => write!(f, "invalid button scale {}", scale),
            RenderError::Surface(e) => write!(f, "can't create keyboard surface: {}", e),
            RenderError::Keyboard(e) => write!(f, "{}", e),
            RenderError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Surface(e) => Some(e),
            RenderError::Keyboard(e) => Some(e),
            RenderError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BackendError> for RenderError {
    fn from(err: BackendError) -> Self {
        Self::Surface(err)
    }
}

impl From<KeyboardError> for RenderError {
    fn from(err: KeyboardError) -> Self {
        Self::Keyboard(err)
    }
}

impl From<ConfigError> for RenderError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

// ============================================================================
// Collaborators
// ============================================================================

/// The style, text and icon collaborators a renderer paints with.
pub struct Backends {
    pub style: Box<dyn StyleEngine>,
    pub text: Box<dyn TextShaper>,
    pub icons: Box<dyn IconLookup>,
}

impl Backends {
    pub fn new(
        style: impl StyleEngine + 'static,
        text: impl TextShaper + 'static,
        icons: impl IconLookup + 'static,
    ) -> Self {
        Self {
            style: Box::new(style),
            text: Box::new(text),
            icons: Box::new(icons),
        }
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Renders a [`Keyboard`] onto surfaces of type `S`.
pub struct Renderer<S: Surface> {
    keyboard: Keyboard,
    backends: Backends,
    config: RendererConfig,
    font: FontDescription,
    allocation: Option<(f64, f64)>,
    scale_factor: i32,
    cache: SurfaceCache<S>,
}

impl<S: Surface> Renderer<S> {
    /// Creates a renderer. Nothing is painted until an allocation size is set.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Config`] if `config` fails validation.
    pub fn new(keyboard: Keyboard, backends: Backends, config: RendererConfig) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Self {
            keyboard,
            backends,
            font: config.font.description(),
            config,
            allocation: None,
            scale_factor: crate::app_settings::DEFAULT_SCALE_FACTOR,
            cache: SurfaceCache::new(),
        })
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// Mutable access to the keyboard, e.g. to press buttons.
    ///
    /// View switches made here are picked up on the next frame.
    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        &mut self.keyboard
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn allocation(&self) -> Option<(f64, f64)> {
        self.allocation
    }

    pub fn scale_factor(&self) -> i32 {
        self.scale_factor
    }

    /// Size of the active view in view units.
    pub fn size(&self) -> (f64, f64) {
        let bounds = self.keyboard.view().bounds;
        (bounds.width, bounds.height)
    }

    /// Current view-to-output transformation.
    ///
    /// Identity until an allocation size is set.
    pub fn transformation(&self) -> Transformation {
        match self.allocation {
            Some((width, height)) => {
                Transformation::for_allocation(width, height, self.keyboard.view().bounds)
            }
            None => Transformation::IDENTITY,
        }
    }

    /// Generation of the cached keyboard image; it grows on every rebuild.
    pub fn surface_generation(&self) -> u64 {
        self.cache.generation()
    }

    /// The cached keyboard image, if one is current.
    pub fn cached_surface(&self) -> Option<&S> {
        self.cache.surface()
    }

    /// Sets the size of the paint area in output pixels.
    ///
    /// Sizes that are not positive and finite are logged and ignored.
    pub fn set_allocation_size(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            tracing::warn!("Ignoring invalid allocation size {}x{}", width, height);
            return;
        }
        self.allocation = Some((width, height));
        let t = self.transformation();
        tracing::debug!(
            "Allocation {}x{}: scale {:.3}, origin ({}, {})",
            width,
            height,
            t.scale,
            t.origin_x,
            t.origin_y
        );
        self.cache.invalidate();
    }

    /// Sets the output scale factor used for icons.
    ///
    /// Values below 1 are logged and ignored.
    pub fn set_scale_factor(&mut self, scale_factor: i32) {
        if scale_factor < 1 {
            tracing::warn!("Ignoring invalid scale factor {}", scale_factor);
            return;
        }
        if scale_factor != self.scale_factor {
            self.scale_factor = scale_factor;
            self.cache.invalidate();
        }
    }

    /// Switches the active view. Returns `true` if it changed.
    pub fn set_view(&mut self, name: &str) -> Result<bool, RenderError> {
        let changed = self.keyboard.set_view(name)?;
        if changed {
            self.cache.invalidate();
        }
        Ok(changed)
    }

    /// Selects the keysym group and shift level. Returns `true` if either
    /// changed, in which case the cached image is rebuilt on the next frame.
    pub fn set_keysym_index(&mut self, group: u32, level: u32) -> bool {
        let changed = self.keyboard.set_keysym_index(group, level);
        if changed {
            self.cache.invalidate();
        }
        changed
    }

    /// Forces a rebuild of the cached keyboard image on the next frame.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// View-space bounds of a button, see
    /// [`get_button_bounds`](crate::geometry::get_button_bounds).
    pub fn get_button_bounds(&self, view_bounds: Bounds, place: &ButtonPlace<'_>) -> Bounds {
        place.bounds(view_bounds)
    }

    /// Finds the button under `point`, given in output coordinates.
    ///
    /// Buttons are tested in row/button order and the first hit wins.
    pub fn hit_test(&self, point: Point) -> Option<ButtonPlace<'_>> {
        let view = self.keyboard.view();
        let view_point = self.transformation().to_view(point);
        let hit = find_button(view, view_point);
        tracing::trace!(
            "Hit test at ({}, {}) -> view ({:.1}, {:.1}): {:?}",
            point.x,
            point.y,
            view_point.x,
            view_point.y,
            hit.as_ref().map(|place| &place.button.name)
        );
        hit
    }

    /// Paints one frame onto `target`.
    ///
    /// Rebuilds the cached default-state image if any of its inputs changed,
    /// blits it, and repaints every button whose state is not the default on
    /// top.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoAllocation`] before the first
    /// `set_allocation_size` and [`RenderError::Surface`] if the cached image
    /// cannot be allocated.
    pub fn render_keyboard(&mut self, target: &mut S) -> Result<(), RenderError> {
        let (width, height) = self.allocation.ok_or(RenderError::NoAllocation)?;
        let transformation = self.transformation();
        let key = CacheKey {
            width: width.ceil() as u32,
            height: height.ceil() as u32,
            view: self.keyboard.view_index(),
            scale_factor: self.scale_factor,
            keysym_index: self.keyboard.keysym_index(),
        };

        let Self {
            keyboard,
            backends,
            config,
            font,
            scale_factor,
            cache,
            ..
        } = self;
        let painter = make_painter(
            backends,
            config,
            font,
            *scale_factor,
            transformation.scale,
            keyboard,
        );
        let view = keyboard.view();

        let cached = cache.get_or_rebuild(key, || {
            let mut surface = S::create(key.width, key.height)?;
            painter.paint_view_background(&mut surface, width, height);
            for place in view.places() {
                let transform = compose(
                    &transformation,
                    view.bounds,
                    place.row.bounds,
                    place.row.angle,
                    place.button.bounds,
                    1.0,
                );
                painter.paint_button(&mut surface, &transform, place.button, ButtonState::DEFAULT);
            }
            Ok::<S, RenderError>(surface)
        })?;
        target.blit(cached);

        for (id, state) in keyboard.changed_buttons() {
            let Some(place) = view.place(id) else {
                tracing::warn!("Changed button {:?} is not in view '{}'", id, view.name);
                continue;
            };
            let transform = compose(
                &transformation,
                view.bounds,
                place.row.bounds,
                place.row.angle,
                place.button.bounds,
                1.0,
            );
            painter.paint_button(target, &transform, place.button, state);
        }
        Ok(())
    }

    /// Paints a single button of the active view onto `target`.
    ///
    /// `extra_scale` enlarges the button about the top-left corner of its
    /// bounding box, e.g. for a preview popup; `1.0` paints it in place.
    pub fn render_button(
        &self,
        target: &mut dyn Canvas,
        id: ButtonId,
        extra_scale: f64,
        state: ButtonState,
    ) -> Result<(), RenderError> {
        if !(extra_scale.is_finite() && extra_scale >= 0.0) {
            return Err(RenderError::InvalidScale(extra_scale));
        }
        let view = self.keyboard.view();
        let place = view.place(id).ok_or(RenderError::UnknownButton(id))?;
        let transformation = self.transformation();
        let transform = compose(
            &transformation,
            view.bounds,
            place.row.bounds,
            place.row.angle,
            place.button.bounds,
            extra_scale,
        );
        let painter = make_painter(
            &self.backends,
            &self.config,
            &self.font,
            self.scale_factor,
            transformation.scale * extra_scale,
            &self.keyboard,
        );
        painter.paint_button(target, &transform, place.button, state);
        Ok(())
    }
}

fn make_painter<'a>(
    backends: &'a Backends,
    config: &'a RendererConfig,
    font: &'a FontDescription,
    scale_factor: i32,
    output_scale: f64,
    keyboard: &Keyboard,
) -> Painter<'a> {
    Painter {
        style: backends.style.as_ref(),
        text: backends.text.as_ref(),
        icons: backends.icons.as_ref(),
        font,
        border_width: config.border_width,
        icon_size: config.icon_size,
        scale_factor,
        output_scale,
        level: keyboard.keysym_index().1,
        arrangement: keyboard.layout().kind,
        fallback_foreground: config.theme.key_text,
    }
}

/// First button of `view` containing `point`, given in view coordinates.
pub fn find_button(view: &View, point: Point) -> Option<ButtonPlace<'_>> {
    view.places().find(|place| {
        let origin = Point::new(
            view.bounds.x + place.row.bounds.x,
            view.bounds.y + place.row.bounds.y,
        );
        contains(place.button.bounds, point, origin, place.row.angle)
    })
}
