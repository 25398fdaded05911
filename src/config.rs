// SPDX-License-Identifier: GPL-3.0-only

//! Renderer configuration.
//!
//! All fields are optional in the JSON form; missing ones take the defaults
//! from [`app_settings`](crate::app_settings).
//!
//! ```json
//! {
//!     "border_width": 1.5,
//!     "font": { "family": "Sans", "size": 16, "path": "/usr/share/fonts/TTF/DejaVuSans.ttf" },
//!     "icon_size": 16,
//!     "icon_dir": "/usr/share/keyrender/icons",
//!     "theme": { "key_background": { "r": 0.2, "g": 0.2, "b": 0.2, "a": 1.0 } }
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app_settings;
use crate::backend::FontDescription;
use crate::renderer::theme::Theme;

// ============================================================================
// Error Handling Types
// ============================================================================

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error occurred while reading the configuration file
    IoError {
        source: std::io::Error,
        file_path: Option<String>,
        suggestion: Option<String>,
    },

    /// JSON parsing error
    JsonError {
        source: serde_json::Error,
        file_path: Option<String>,
        line_number: Option<usize>,
    },

    /// A value is out of range
    InvalidValue {
        /// Name of the offending field
        field: String,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    /// Creates an I/O error with file path.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::IoError {
            source,
            file_path: Some(file_path.into()),
            suggestion: Some("Check that the file exists and you have read permissions".into()),
        }
    }

    /// Creates a JSON parsing error, optionally tagged with a file path.
    pub fn json_error(source: serde_json::Error, file_path: Option<String>) -> Self {
        let line_number = Some(source.line()).filter(|line| *line > 0);
        Self::JsonError {
            source,
            file_path,
            line_number,
        }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError {
                source,
                file_path,
                suggestion,
            } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading file '{}'", path)?;
                }
                write!(f, ": {}", source)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
            ConfigError::JsonError {
                source,
                file_path,
                line_number,
            } => {
                write!(f, "JSON parsing error")?;
                if let Some(path) = file_path {
                    write!(f, " in file '{}'", path)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)?;
            }
            ConfigError::InvalidValue { field, message } => {
                write!(f, "invalid value for '{}': {}", field, message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::JsonError { source, .. } => Some(source),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_error(err, None)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Label font settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub family: String,
    pub size: f64,
    /// Font file for the built-in glyph shaper
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: app_settings::DEFAULT_FONT_FAMILY.into(),
            size: app_settings::DEFAULT_FONT_SIZE,
            path: None,
        }
    }
}

impl FontConfig {
    pub fn description(&self) -> FontDescription {
        FontDescription::new(self.family.clone(), self.size)
    }
}

/// Settings of a [`Renderer`](crate::renderer::Renderer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Border width used to fit labels inside buttons
    pub border_width: f64,
    pub font: FontConfig,
    /// Logical icon size in pixels
    pub icon_size: u32,
    /// Directory searched for PNG icons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_dir: Option<PathBuf>,
    pub theme: Theme,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            border_width: app_settings::DEFAULT_BORDER_WIDTH,
            font: FontConfig::default(),
            icon_size: app_settings::DEFAULT_ICON_SIZE,
            icon_dir: None,
            theme: Theme::default(),
        }
    }
}

impl RendererConfig {
    pub fn with_border_width(mut self, border_width: f64) -> Self {
        self.border_width = border_width;
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.font.family = family.into();
        self.font.size = size;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.border_width.is_finite() && self.border_width >= 0.0) {
            return Err(ConfigError::invalid_value(
                "border_width",
                format!("must be a non-negative number, got {}", self.border_width),
            ));
        }
        if !(self.font.size.is_finite() && self.font.size > 0.0) {
            return Err(ConfigError::invalid_value(
                "font.size",
                format!("must be positive, got {}", self.font.size),
            ));
        }
        if self.icon_size == 0 {
            return Err(ConfigError::invalid_value("icon_size", "must be positive"));
        }
        Ok(())
    }
}

/// Loads and validates a configuration file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<RendererConfig, ConfigError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    tracing::debug!("Loading renderer config from {}", path_str);

    let content =
        fs::read_to_string(path).map_err(|e| ConfigError::io_error_with_path(e, &path_str))?;
    let config: RendererConfig = serde_json::from_str(&content)
        .map_err(|e| ConfigError::json_error(e, Some(path_str.clone())))?;
    config.validate()?;
    Ok(config)
}

/// Parses and validates a configuration from a JSON string.
pub fn load_config_from_str(json: &str) -> Result<RendererConfig, ConfigError> {
    let config: RendererConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}
