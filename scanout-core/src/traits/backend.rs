//! Display backend trait

use crate::surface::PixelSurface;

/// Errors a backend can report from `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BackendError {
    /// The device or driver behind this backend is not present
    Unavailable,
    /// The device exists but refused to hand out a buffer
    BufferAllocation,
    /// The device only offers pixel formats this backend cannot wrap
    UnsupportedFormat,
}

/// Provider of hardware-visible pixel surfaces
///
/// A backend owns at least two surfaces in double-buffered rotation: one
/// is being scanned out while the caller draws into the other. Surfaces
/// stay owned by the backend; callers only ever borrow the back buffer.
pub trait Backend {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Acquire the hardware and allocate the buffers
    ///
    /// On success [`Backend::draw_surface`] returns the first back buffer.
    fn init(&mut self) -> Result<(), BackendError>;

    /// Present the current back buffer and return the next one
    fn flip(&mut self) -> Option<&mut PixelSurface>;

    /// The buffer to draw the next frame into
    fn draw_surface(&mut self) -> Option<&mut PixelSurface>;

    /// Blank or unblank the display
    fn blank(&mut self, blank: bool);

    /// Release all hardware resources
    ///
    /// The backend returns to its uninitialized state.
    fn release(&mut self) {}
}
