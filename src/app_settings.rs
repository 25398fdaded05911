// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Default border width in view units, used to fit labels.
pub const DEFAULT_BORDER_WIDTH: f64 = 1.0;

/// Default margin around each key in view units.
pub const DEFAULT_KEY_MARGIN: f64 = 2.0;

/// Default label font family.
pub const DEFAULT_FONT_FAMILY: &str = "Sans";

/// Default label font size in view units, before fitting.
pub const DEFAULT_FONT_SIZE: f64 = 18.0;

/// Logical size of button icons in pixels.
pub const DEFAULT_ICON_SIZE: u32 = 16;

/// Output scale factor assumed until the host reports one.
pub const DEFAULT_SCALE_FACTOR: i32 = 1;

/// Style class of latched buttons.
pub const LOCKED_CLASS: &str = "locked";

/// Style class added by the wide arrangement.
pub const WIDE_CLASS: &str = "wide";

/// Default tracing filter directive.
pub const LOG_FILTER: &str = "keyrender=info";

/// Default demo output width in pixels.
pub const DEFAULT_WIDTH: u32 = 800;

/// Default demo output height in pixels.
pub const DEFAULT_HEIGHT: u32 = 300;
