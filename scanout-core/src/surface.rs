//! Pixel surfaces
//!
//! A surface is a rectangular buffer of packed pixels with its own row
//! stride and bytes-per-pixel. Surfaces are owned by whoever allocated
//! them (a backend, the font loader, an icon loader) and released when
//! that owner drops them.

use alloc::vec;
use alloc::vec::Vec;

/// Errors raised when a surface geometry is inconsistent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Zero bytes per pixel
    InvalidPixelSize,
    /// Row stride smaller than `width * pixel_bytes`
    StrideTooSmall,
    /// Pixel buffer shorter than `height * row_bytes`
    BufferTooSmall,
    /// Dimensions overflow the address space
    Overflow,
}

/// A rectangular pixel buffer, independent of any hardware
#[derive(Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    row_bytes: usize,
    pixel_bytes: usize,
    data: Vec<u8>,
}

impl PixelSurface {
    /// Allocate a zeroed surface with a tightly packed stride
    pub fn new(width: u32, height: u32, pixel_bytes: usize) -> Result<Self, SurfaceError> {
        let row_bytes = (width as usize)
            .checked_mul(pixel_bytes)
            .ok_or(SurfaceError::Overflow)?;
        Self::with_stride(width, height, row_bytes, pixel_bytes)
    }

    /// Allocate a zeroed surface with an explicit row stride
    ///
    /// Padding bytes at the end of each row belong to the surface but are
    /// never part of the visible image.
    pub fn with_stride(
        width: u32,
        height: u32,
        row_bytes: usize,
        pixel_bytes: usize,
    ) -> Result<Self, SurfaceError> {
        let len = row_bytes
            .checked_mul(height as usize)
            .ok_or(SurfaceError::Overflow)?;
        Self::from_raw(width, height, row_bytes, pixel_bytes, vec![0; len])
    }

    /// Wrap an existing pixel buffer after validating its geometry
    pub fn from_raw(
        width: u32,
        height: u32,
        row_bytes: usize,
        pixel_bytes: usize,
        data: Vec<u8>,
    ) -> Result<Self, SurfaceError> {
        if pixel_bytes == 0 {
            return Err(SurfaceError::InvalidPixelSize);
        }
        let min_stride = (width as usize)
            .checked_mul(pixel_bytes)
            .ok_or(SurfaceError::Overflow)?;
        if row_bytes < min_stride {
            return Err(SurfaceError::StrideTooSmall);
        }
        let min_len = row_bytes
            .checked_mul(height as usize)
            .ok_or(SurfaceError::Overflow)?;
        if data.len() < min_len {
            return Err(SurfaceError::BufferTooSmall);
        }

        Ok(Self {
            width,
            height,
            row_bytes,
            pixel_bytes,
            data,
        })
    }

    /// Physical width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Physical height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes
    pub const fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Bytes per pixel
    pub const fn pixel_bytes(&self) -> usize {
        self.pixel_bytes
    }

    /// Row stride in whole pixels
    pub const fn row_pixels(&self) -> usize {
        self.row_bytes / self.pixel_bytes
    }

    /// Whether rows carry no padding
    pub const fn is_packed(&self) -> bool {
        self.row_bytes == self.width as usize * self.pixel_bytes
    }

    /// Raw pixel bytes, including row padding
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel bytes, including row padding
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the surface and return its buffer
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Bytes of row `y`, padding included
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.row_bytes;
        self.data.get(start..start + self.row_bytes)
    }

    /// Mutable bytes of row `y`, padding included
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.row_bytes;
        self.data.get_mut(start..start + self.row_bytes)
    }

    fn pixel_range(&self, index: isize) -> Option<core::ops::Range<usize>> {
        let index = usize::try_from(index).ok()?;
        let start = index.checked_mul(self.pixel_bytes)?;
        let end = start.checked_add(self.pixel_bytes)?;
        (end <= self.data.len()).then_some(start..end)
    }

    /// Read the pixel at buffer index `index` (in pixels from the base)
    ///
    /// Pixels are little-endian; surfaces narrower than 32 bits return
    /// the low bytes only. Returns `None` outside the buffer.
    pub fn read_pixel(&self, index: isize) -> Option<u32> {
        let range = self.pixel_range(index)?;
        let mut bytes = [0u8; 4];
        let n = range.len().min(4);
        bytes[..n].copy_from_slice(&self.data[range.start..range.start + n]);
        Some(u32::from_le_bytes(bytes))
    }

    /// Write the pixel at buffer index `index`
    ///
    /// Returns `false` (and writes nothing) outside the buffer.
    pub fn write_pixel(&mut self, index: isize, value: u32) -> bool {
        let Some(range) = self.pixel_range(index) else {
            return false;
        };
        let bytes = value.to_le_bytes();
        let n = range.len().min(4);
        self.data[range.start..range.start + n].copy_from_slice(&bytes[..n]);
        true
    }

    /// Raw bytes of the pixel at buffer index `index`
    pub fn pixel_bytes_at(&self, index: isize) -> Option<&[u8]> {
        let range = self.pixel_range(index)?;
        Some(&self.data[range])
    }

    /// Mutable raw bytes of the pixel at buffer index `index`
    pub fn pixel_bytes_at_mut(&mut self, index: isize) -> Option<&mut [u8]> {
        let range = self.pixel_range(index)?;
        Some(&mut self.data[range])
    }
}

impl core::fmt::Debug for PixelSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("row_bytes", &self.row_bytes)
            .field("pixel_bytes", &self.pixel_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PixelSurface {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "PixelSurface[{}x{}, stride {}, {} bpp]",
            self.width,
            self.height,
            self.row_bytes,
            self.pixel_bytes
        );
    }
}
