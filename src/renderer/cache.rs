// SPDX-License-Identifier: GPL-3.0-only

//! Cache of the composed default-state keyboard image.
//!
//! The cache holds at most one surface. It is tagged with the inputs it was
//! painted for ([`CacheKey`]); a request with any other key, or any request
//! after [`SurfaceCache::invalidate`], rebuilds it. Every rebuild gets a new
//! generation number, so callers can tell a fresh image from a reused one.

/// Inputs the cached image depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub width: u32,
    pub height: u32,
    pub view: usize,
    pub scale_factor: i32,
    /// `(group, level)` keysym index selecting the labels
    pub keysym_index: (u32, u32),
}

/// Single-entry surface cache.
#[derive(Debug)]
pub struct SurfaceCache<S> {
    entry: Option<(CacheKey, S)>,
    generation: u64,
}

impl<S> Default for SurfaceCache<S> {
    fn default() -> Self {
        Self {
            entry: None,
            generation: 0,
        }
    }
}

impl<S> SurfaceCache<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the cached surface. Calling this repeatedly is harmless.
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            tracing::debug!("Keyboard surface invalidated");
        }
    }

    /// Returns `true` if a surface painted for `key` is cached.
    pub fn is_valid_for(&self, key: &CacheKey) -> bool {
        matches!(&self.entry, Some((cached, _)) if cached == key)
    }

    /// Generation of the cached surface; `0` before the first build.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surface(&self) -> Option<&S> {
        self.entry.as_ref().map(|(_, surface)| surface)
    }

    /// Returns the surface for `key`, calling `build` on a miss.
    ///
    /// A failed build leaves the cache empty and the generation unchanged.
    pub fn get_or_rebuild<E>(
        &mut self,
        key: CacheKey,
        build: impl FnOnce() -> Result<S, E>,
    ) -> Result<&S, E> {
        let entry = match self.entry.take() {
            Some(entry) if entry.0 == key => entry,
            _ => {
                let surface = build()?;
                self.generation += 1;
                tracing::debug!(
                    "Rebuilt keyboard surface {}x{} for view {} at scale {}, keysym index {:?} (generation {})",
                    key.width,
                    key.height,
                    key.view,
                    key.scale_factor,
                    key.keysym_index,
                    self.generation
                );
                (key, surface)
            }
        };
        Ok(&self.entry.insert(entry).1)
    }
}
