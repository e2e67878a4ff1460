//! Glyph atlases
//!
//! An atlas is an alpha-only surface laid out as a 96-column grid. Column
//! `n` holds the glyph for ASCII `0x20 + n`; row 0 is regular weight and
//! the optional row 1 is bold.

use scanout_core::{PixelSurface, SurfaceError};

use crate::rle::RleError;

/// Glyph columns in an atlas (printable ASCII plus one spare)
pub const GLYPH_COLUMNS: usize = 96;

/// Weight rows in a full atlas
pub const GLYPH_ROWS: u32 = 2;

/// First character in the atlas
pub const FIRST_CHAR: u8 = b' ';

/// Last printable character
pub const LAST_CHAR: u8 = b'~';

/// Glyph drawn in place of unprintable bytes
pub const REPLACEMENT_CHAR: u8 = b'?';

/// Errors that can occur while building a font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontError {
    /// Atlas is not one byte per pixel
    WrongFormat,
    /// Atlas size does not match the glyph grid
    BadGeometry,
    /// Embedded asset shorter than its header
    Truncated,
    /// Embedded asset does not start with the expected magic
    BadMagic,
    /// Embedded asset version is not understood
    UnsupportedVersion(u8),
    /// Embedded run stream is corrupt
    Rle(RleError),
    /// Decoded bitmap does not form a valid surface
    Surface(SurfaceError),
}

impl From<RleError> for FontError {
    fn from(e: RleError) -> Self {
        FontError::Rle(e)
    }
}

impl From<SurfaceError> for FontError {
    fn from(e: SurfaceError) -> Self {
        FontError::Surface(e)
    }
}

/// Map a byte to the character actually drawn for it
#[inline]
pub const fn printable(ch: u8) -> u8 {
    if ch < FIRST_CHAR || ch > LAST_CHAR {
        REPLACEMENT_CHAR
    } else {
        ch
    }
}

/// A fixed-width bitmap font backed by an alpha atlas
///
/// Immutable once built; drawing only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    texture: PixelSurface,
    char_width: u32,
    char_height: u32,
}

impl Font {
    /// Build a font from a loaded atlas image
    ///
    /// The cell size is derived from the grid: `width / 96` by `height / 2`.
    pub fn from_atlas(texture: PixelSurface) -> Result<Self, FontError> {
        if texture.pixel_bytes() != 1 {
            return Err(FontError::WrongFormat);
        }
        let (width, height) = (texture.width(), texture.height());
        if width == 0
            || height == 0
            || width as usize % GLYPH_COLUMNS != 0
            || height % GLYPH_ROWS != 0
        {
            return Err(FontError::BadGeometry);
        }

        let char_width = width / GLYPH_COLUMNS as u32;
        let char_height = height / GLYPH_ROWS;
        Self::with_cell(texture, char_width, char_height)
    }

    /// Build a font with an explicit cell size
    ///
    /// The atlas must hold at least one full row of 96 cells.
    pub fn with_cell(
        texture: PixelSurface,
        char_width: u32,
        char_height: u32,
    ) -> Result<Self, FontError> {
        if texture.pixel_bytes() != 1 {
            return Err(FontError::WrongFormat);
        }
        if char_width == 0
            || char_height == 0
            || (char_width as usize * GLYPH_COLUMNS) > texture.width() as usize
            || char_height > texture.height()
        {
            return Err(FontError::BadGeometry);
        }

        Ok(Self {
            texture,
            char_width,
            char_height,
        })
    }

    pub const fn char_width(&self) -> u32 {
        self.char_width
    }

    pub const fn char_height(&self) -> u32 {
        self.char_height
    }

    /// Cell size as (width, height)
    pub const fn size(&self) -> (u32, u32) {
        (self.char_width, self.char_height)
    }

    /// The alpha atlas
    pub fn texture(&self) -> &PixelSurface {
        &self.texture
    }

    /// Whether the atlas carries a bold row
    pub fn has_bold(&self) -> bool {
        self.texture.height() != self.char_height
            && self.texture.height() >= 2 * self.char_height
    }

    /// Top-left of the glyph for `ch` as (byte column, atlas row)
    ///
    /// Unprintable bytes map to the replacement glyph; `bold` is ignored
    /// when the atlas has no bold row.
    pub fn glyph_origin(&self, ch: u8, bold: bool) -> (usize, u32) {
        let index = (printable(ch) - FIRST_CHAR) as usize;
        let column = index * self.char_width as usize;
        let row = if bold && self.has_bold() {
            self.char_height
        } else {
            0
        };
        (column, row)
    }

    /// Width in pixels of `text` when drawn with this font
    pub fn measure(&self, text: impl AsRef<[u8]>) -> u32 {
        let len = u32::try_from(text.as_ref().len()).unwrap_or(u32::MAX);
        self.char_width.saturating_mul(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn atlas(char_width: u32, char_height: u32, rows: u32) -> PixelSurface {
        PixelSurface::new(char_width * GLYPH_COLUMNS as u32, char_height * rows, 1).unwrap()
    }

    #[test]
    fn test_from_atlas_derives_cell() {
        let font = Font::from_atlas(atlas(18, 32, 2)).unwrap();
        assert_eq!(font.size(), (18, 32));
        assert!(font.has_bold());
    }

    #[test]
    fn test_from_atlas_rejects_color_surface() {
        let surface = PixelSurface::new(96, 2, 4).unwrap();
        assert_eq!(Font::from_atlas(surface), Err(FontError::WrongFormat));
    }

    #[test]
    fn test_from_atlas_rejects_partial_grid() {
        let surface = PixelSurface::new(95, 2, 1).unwrap();
        assert_eq!(Font::from_atlas(surface), Err(FontError::BadGeometry));
        let surface = PixelSurface::new(96, 3, 1).unwrap();
        assert_eq!(Font::from_atlas(surface), Err(FontError::BadGeometry));
    }

    #[test]
    fn test_with_cell_single_row_has_no_bold() {
        let font = Font::with_cell(atlas(4, 6, 1), 4, 6).unwrap();
        assert!(!font.has_bold());
        assert_eq!(font.glyph_origin(b'A', true), font.glyph_origin(b'A', false));
    }

    #[test]
    fn test_glyph_origin() {
        let font = Font::from_atlas(atlas(10, 18, 2)).unwrap();
        assert_eq!(font.glyph_origin(b' ', false), (0, 0));
        assert_eq!(font.glyph_origin(b'A', false), (330, 0));
        assert_eq!(font.glyph_origin(b'A', true), (330, 18));
        assert_eq!(font.glyph_origin(b'~', false), (940, 0));
    }

    #[test]
    fn test_unprintable_maps_to_replacement() {
        let font = Font::from_atlas(atlas(10, 18, 2)).unwrap();
        let question = font.glyph_origin(b'?', false);
        for ch in [0x00, 0x01, 0x1F, 0x7F, 0x80, 0xFF] {
            assert_eq!(font.glyph_origin(ch, false), question);
        }
    }

    #[test]
    fn test_measure_counts_bytes() {
        let font = Font::from_atlas(atlas(10, 18, 2)).unwrap();
        assert_eq!(font.measure(b"\xE9"), 10);
        assert_eq!(font.measure("\u{e9}"), 20);
        assert_eq!(font.measure(b""), 0);
    }

    proptest! {
        #[test]
        fn prop_measure_is_width_times_length(text in "[ -~]{0,64}") {
            let font = Font::from_atlas(atlas(10, 18, 2)).unwrap();
            prop_assert_eq!(font.measure(&text), 10 * text.len() as u32);
        }

        #[test]
        fn prop_printable_is_identity_on_ascii(ch in 0x20u8..=0x7E) {
            prop_assert_eq!(printable(ch), ch);
        }
    }
}
