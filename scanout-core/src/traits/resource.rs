//! Image resource loading trait

use crate::surface::{PixelSurface, SurfaceError};

/// Errors that can occur while loading an image resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceError {
    /// No resource exists at the requested path
    NotFound,
    /// The resource exists but could not be read
    Io,
    /// The resource could not be decoded as an image
    Decode,
    /// The decoded image has the wrong pixel format for the request
    WrongFormat,
    /// The decoded image produced an inconsistent surface
    Surface(SurfaceError),
}

impl From<SurfaceError> for ResourceError {
    fn from(e: SurfaceError) -> Self {
        ResourceError::Surface(e)
    }
}

/// Source of decoded image surfaces
///
/// Image decoding is platform specific; implementations hand back a
/// surface that the caller owns from then on.
pub trait ResourceLoader {
    /// Load an alpha-only (one byte per pixel) image
    fn load_alpha(&mut self, path: &str) -> Result<PixelSurface, ResourceError>;
}
