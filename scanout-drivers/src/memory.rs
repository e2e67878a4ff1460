//! RAM-backed display backend
//!
//! Keeps its buffers in ordinary memory and "presents" a frame by marking
//! it visible. Useful for headless targets, screenshots and host tests.

use alloc::vec::Vec;

use scanout_core::traits::{Backend, BackendError};
use scanout_core::PixelSurface;

/// Minimum number of buffers for double buffering
pub const MIN_BUFFERS: usize = 2;

/// Geometry of the buffers a [`MemoryBackend`] allocates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MemoryBackendConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bytes per pixel
    pub pixel_bytes: usize,
    /// Extra bytes at the end of each row
    pub row_padding: usize,
    /// Number of buffers in the flip chain
    pub buffers: usize,
}

impl MemoryBackendConfig {
    /// Double-buffered, 32-bit, tightly packed
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_bytes: 4,
            row_padding: 0,
            buffers: MIN_BUFFERS,
        }
    }

    /// Row stride in bytes
    pub const fn row_bytes(&self) -> usize {
        self.width as usize * self.pixel_bytes + self.row_padding
    }
}

/// A backend whose scan-out buffers live in RAM
#[derive(Debug)]
pub struct MemoryBackend {
    config: MemoryBackendConfig,
    surfaces: Vec<PixelSurface>,
    draw: usize,
    visible: Option<usize>,
    blanked: bool,
    flips: u32,
}

impl MemoryBackend {
    /// Create an uninitialized backend
    pub const fn new(config: MemoryBackendConfig) -> Self {
        Self {
            config,
            surfaces: Vec::new(),
            draw: 0,
            visible: None,
            blanked: false,
            flips: 0,
        }
    }

    pub const fn config(&self) -> &MemoryBackendConfig {
        &self.config
    }

    /// Whether `init` has succeeded and `release` has not been called
    pub fn is_initialized(&self) -> bool {
        !self.surfaces.is_empty()
    }

    /// The buffer currently being "scanned out"
    pub fn front(&self) -> Option<&PixelSurface> {
        self.visible.and_then(|i| self.surfaces.get(i))
    }

    /// Whether the display is blanked
    pub const fn is_blanked(&self) -> bool {
        self.blanked
    }

    /// Number of flips since `init`
    pub const fn flip_count(&self) -> u32 {
        self.flips
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn init(&mut self) -> Result<(), BackendError> {
        if self.config.buffers < MIN_BUFFERS {
            return Err(BackendError::BufferAllocation);
        }
        if self.config.pixel_bytes == 0 {
            return Err(BackendError::UnsupportedFormat);
        }

        let mut surfaces = Vec::with_capacity(self.config.buffers);
        for _ in 0..self.config.buffers {
            let surface = PixelSurface::with_stride(
                self.config.width,
                self.config.height,
                self.config.row_bytes(),
                self.config.pixel_bytes,
            )
            .map_err(|_| BackendError::BufferAllocation)?;
            surfaces.push(surface);
        }

        self.surfaces = surfaces;
        self.draw = 0;
        self.visible = None;
        self.blanked = false;
        self.flips = 0;
        Ok(())
    }

    fn flip(&mut self) -> Option<&mut PixelSurface> {
        if self.surfaces.is_empty() {
            return None;
        }
        self.visible = Some(self.draw);
        self.draw = (self.draw + 1) % self.surfaces.len();
        self.flips = self.flips.wrapping_add(1);
        self.surfaces.get_mut(self.draw)
    }

    fn draw_surface(&mut self) -> Option<&mut PixelSurface> {
        self.surfaces.get_mut(self.draw)
    }

    fn blank(&mut self, blank: bool) {
        self.blanked = blank;
    }

    fn release(&mut self) {
        self.surfaces.clear();
        self.visible = None;
        self.draw = 0;
    }
}
