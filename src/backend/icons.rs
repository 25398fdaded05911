// SPDX-License-Identifier: GPL-3.0-only

//! Icon lookup from a directory of PNG files.
//!
//! Icons are searched in a size-specific sub-directory first and then at the
//! top level:
//!
//! ```text
//! <root>/<size>x<size>@<scale>/<name>.png
//! <root>/<name>.png
//! ```
//!
//! Only the alpha channel is kept; the renderer tints icons with the button's
//! foreground colour.

use std::path::{Path, PathBuf};

use tiny_skia::Pixmap;

use super::{AlphaMask, BackendError, IconLookup};

/// Icons loaded from PNG files under a root directory.
#[derive(Debug, Clone)]
pub struct IconDirectory {
    root: PathBuf,
}

impl IconDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, name: &str, size: u32, scale_factor: i32) -> [PathBuf; 2] {
        let file = format!("{}.png", name);
        [
            self.root
                .join(format!("{}x{}@{}", size, size, scale_factor))
                .join(&file),
            self.root.join(&file),
        ]
    }
}

impl IconLookup for IconDirectory {
    fn lookup(&self, name: &str, size: u32, scale_factor: i32) -> Result<AlphaMask, BackendError> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(BackendError::icon_not_found(name));
        }

        for path in self.candidates(name, size, scale_factor) {
            if !path.is_file() {
                continue;
            }
            let pixmap = Pixmap::load_png(&path).map_err(|e| BackendError::IconNotFound {
                name: name.to_string(),
                reason: Some(format!("{}: {}", path.display(), e)),
            })?;
            tracing::trace!("Loaded icon '{}' from {}", name, path.display());
            return Ok(AlphaMask {
                width: pixmap.width(),
                height: pixmap.height(),
                data: pixmap.pixels().iter().map(|p| p.alpha()).collect(),
            });
        }

        Err(BackendError::icon_not_found(name))
    }
}

/// Lookup that never finds an icon, so every button shows its label.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIcons;

impl IconLookup for NoIcons {
    fn lookup(&self, name: &str, _size: u32, _scale_factor: i32) -> Result<AlphaMask, BackendError> {
        Err(BackendError::icon_not_found(name))
    }
}
