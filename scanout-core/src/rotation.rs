//! Rotation-aware addressing
//!
//! Callers draw in logical coordinates. A [`Transform`] maps them onto the
//! physical scan-out buffer for one of four rotation states, and hands out
//! [`PixelCursor`]s that step through the buffer in the logical +x and +y
//! directions without recomputing the address for every pixel.
//!
//! All addresses are pixel indices relative to the start of the buffer.
//! They may fall outside the buffer; dereferencing goes through the
//! surface's bounds-checked accessors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::surface::PixelSurface;

/// Orientation of the logical drawing surface relative to the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Rotation {
    #[default]
    None,
    /// Quarter turn; logical +x runs down the buffer
    Right,
    /// Half turn
    Down,
    /// Quarter turn; logical +x runs up the buffer
    Left,
}

impl Rotation {
    /// Whether logical width and height are swapped against the buffer
    pub const fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::Right | Rotation::Left)
    }

    /// Rotation from its quarter-turn index (0 = none, 1 = right, 2 = down, 3 = left)
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rotation::None),
            1 => Some(Rotation::Right),
            2 => Some(Rotation::Down),
            3 => Some(Rotation::Left),
            _ => None,
        }
    }

    /// Quarter-turn index of this rotation
    pub const fn index(self) -> u8 {
        match self {
            Rotation::None => 0,
            Rotation::Right => 1,
            Rotation::Down => 2,
            Rotation::Left => 3,
        }
    }
}

/// A buffer address plus the deltas for one logical step in x and y
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelCursor {
    index: isize,
    step_x: isize,
    step_y: isize,
}

impl PixelCursor {
    /// Current pixel index
    #[inline]
    pub const fn index(&self) -> isize {
        self.index
    }

    /// Move one pixel in the logical +x direction
    #[inline]
    pub fn advance_x(&mut self) {
        self.index += self.step_x;
    }

    /// Move one pixel in the logical +y direction
    #[inline]
    pub fn advance_y(&mut self) {
        self.index += self.step_y;
    }
}

/// Logical-to-physical mapping for one buffer geometry and rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transform {
    rotation: Rotation,
    width: i32,
    height: i32,
    row_pixels: isize,
}

impl Transform {
    /// Build a transform from raw buffer geometry
    ///
    /// `width` and `height` are the physical (unrotated) dimensions and
    /// `row_pixels` is the stride in whole pixels.
    pub const fn new(rotation: Rotation, width: u32, height: u32, row_pixels: usize) -> Self {
        Self {
            rotation,
            width: width as i32,
            height: height as i32,
            row_pixels: row_pixels as isize,
        }
    }

    /// Build a transform for drawing into `surface`
    pub fn for_surface(rotation: Rotation, surface: &PixelSurface) -> Self {
        Self::new(
            rotation,
            surface.width(),
            surface.height(),
            surface.row_pixels(),
        )
    }

    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Caller-facing (width, height)
    pub const fn logical_size(&self) -> (i32, i32) {
        if self.rotation.is_quarter_turn() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Whether a logical coordinate lies off the surface
    pub const fn outside(&self, x: i32, y: i32) -> bool {
        let (w, h) = self.logical_size();
        x < 0 || x >= w || y < 0 || y >= h
    }

    /// Pixel index of logical `(x, y)`
    pub const fn pixel_index(&self, x: i32, y: i32) -> isize {
        let (x, y) = (x as isize, y as isize);
        let (w, h) = (self.width as isize, self.height as isize);
        match self.rotation {
            Rotation::None => y * self.row_pixels + x,
            Rotation::Right => x * self.row_pixels + (w - y),
            Rotation::Down => (h - 1 - y) * self.row_pixels + (w - 1 - x),
            Rotation::Left => (h - 1 - x) * self.row_pixels + y,
        }
    }

    /// Index delta for one logical step in +x
    pub const fn step_x(&self) -> isize {
        match self.rotation {
            Rotation::None => 1,
            Rotation::Right => self.row_pixels,
            Rotation::Down => -1,
            Rotation::Left => -self.row_pixels,
        }
    }

    /// Index delta for one logical step in +y
    pub const fn step_y(&self) -> isize {
        match self.rotation {
            Rotation::None => self.row_pixels,
            Rotation::Right => -1,
            Rotation::Down => -self.row_pixels,
            Rotation::Left => 1,
        }
    }

    /// Cursor positioned on logical `(x, y)`
    pub const fn cursor(&self, x: i32, y: i32) -> PixelCursor {
        PixelCursor {
            index: self.pixel_index(x, y),
            step_x: self.step_x(),
            step_y: self.step_y(),
        }
    }
}
