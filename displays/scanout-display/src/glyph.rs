//! Alpha-plane compositing shared by text and icons
//!
//! The source is a single-channel alpha bitmap (a glyph cell in an atlas,
//! or a whole icon). Each source byte is scaled by the draw color's alpha
//! and used to blend the draw color onto the destination pixel.

use scanout_core::{blend, effective_alpha, PixelSurface, Transform};
use scanout_font::Font;

/// A rectangular window onto an alpha-only buffer
#[derive(Debug, Clone, Copy)]
pub struct AlphaPlane<'a> {
    data: &'a [u8],
    row_bytes: usize,
    width: u32,
    height: u32,
}

impl<'a> AlphaPlane<'a> {
    /// Whole-surface plane; `None` unless the surface is one byte per pixel
    pub fn from_surface(surface: &'a PixelSurface) -> Option<Self> {
        (surface.pixel_bytes() == 1).then(|| Self {
            data: surface.data(),
            row_bytes: surface.row_bytes(),
            width: surface.width(),
            height: surface.height(),
        })
    }

    /// The glyph cell drawn for `ch`
    pub fn glyph(font: &'a Font, ch: u8, bold: bool) -> Self {
        let texture = font.texture();
        let (column, row) = font.glyph_origin(ch, bold);
        let start = row as usize * texture.row_bytes() + column;
        Self {
            data: texture.data().get(start..).unwrap_or(&[]),
            row_bytes: texture.row_bytes(),
            width: font.char_width(),
            height: font.char_height(),
        }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    fn row(&self, y: u32) -> Option<&'a [u8]> {
        let start = y as usize * self.row_bytes;
        self.data.get(start..start + self.width as usize)
    }
}

/// Composite `plane` onto `target` with its top-left at logical `(x, y)`
///
/// The caller has already bounds-checked the plane's box against the
/// logical surface.
pub fn blend_plane(
    target: &mut PixelSurface,
    transform: &Transform,
    plane: &AlphaPlane<'_>,
    x: i32,
    y: i32,
    color_alpha: u8,
    current: u32,
) {
    let mut row_cursor = transform.cursor(x, y);
    for j in 0..plane.height() {
        let Some(src) = plane.row(j) else {
            break;
        };

        let mut px = row_cursor;
        for &a in src {
            let alpha = effective_alpha(a, color_alpha);
            if alpha != 0 {
                if let Some(pixel) = target.read_pixel(px.index()) {
                    target.write_pixel(px.index(), blend(alpha, pixel, current));
                }
            }
            px.advance_x();
        }
        row_cursor.advance_y();
    }
}
