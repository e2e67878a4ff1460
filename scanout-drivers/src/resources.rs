//! In-memory image resources
//!
//! A small path-keyed store of already decoded surfaces. Platforms without
//! a filesystem register their images here at startup.

use heapless::{FnvIndexMap, String};

use scanout_core::config::MAX_PATH_LEN;
use scanout_core::traits::{ResourceError, ResourceLoader};
use scanout_core::PixelSurface;

/// Maximum number of registered resources (power of two)
pub const MAX_RESOURCES: usize = 16;

/// Errors that can occur when registering a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// Path longer than the configured maximum
    PathTooLong,
    /// Store already holds [`MAX_RESOURCES`] entries
    Full,
}

/// Path-keyed store of decoded surfaces
#[derive(Default)]
pub struct MemoryResources {
    images: FnvIndexMap<String<MAX_PATH_LEN>, PixelSurface, MAX_RESOURCES>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `surface` under `path`
    ///
    /// Returns the surface previously registered there, if any; the
    /// caller decides whether to keep or drop it.
    pub fn insert(
        &mut self,
        path: &str,
        surface: PixelSurface,
    ) -> Result<Option<PixelSurface>, RegisterError> {
        let mut key = String::new();
        key.push_str(path).map_err(|_| RegisterError::PathTooLong)?;
        self.images
            .insert(key, surface)
            .map_err(|_| RegisterError::Full)
    }

    /// Remove and return the surface registered under `path`
    pub fn remove(&mut self, path: &str) -> Option<PixelSurface> {
        let mut key: String<MAX_PATH_LEN> = String::new();
        key.push_str(path).ok()?;
        self.images.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn get(&self, path: &str) -> Option<&PixelSurface> {
        self.images
            .iter()
            .find(|(key, _)| key.as_str() == path)
            .map(|(_, surface)| surface)
    }
}

impl ResourceLoader for MemoryResources {
    fn load_alpha(&mut self, path: &str) -> Result<PixelSurface, ResourceError> {
        let surface = self.get(path).ok_or(ResourceError::NotFound)?;
        if surface.pixel_bytes() != 1 {
            return Err(ResourceError::WrongFormat);
        }
        Ok(surface.clone())
    }
}
