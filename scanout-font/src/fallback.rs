//! Built-in fallback font
//!
//! The font ships as a versioned asset compiled into the binary:
//!
//! ```text
//! ┌───────┬─────────┬──────────┬────────────┬─────────────┬───────┬────────┬───────────┐
//! │ MAGIC │ VERSION │ RESERVED │ CHAR_WIDTH │ CHAR_HEIGHT │ WIDTH │ HEIGHT │ RUNS … 00 │
//! │ 4B    │ 1B      │ 1B       │ u16 LE     │ u16 LE      │ u16 LE│ u16 LE │           │
//! └───────┴─────────┴──────────┴────────────┴─────────────┴───────┴────────┴───────────┘
//! ```
//!
//! The run stream decodes to an alpha atlas of exactly `WIDTH * HEIGHT`
//! bytes (see [`crate::rle`]).

use scanout_core::PixelSurface;

use crate::atlas::{Font, FontError, GLYPH_COLUMNS};
use crate::rle;

/// Asset magic
pub const MAGIC: [u8; 4] = *b"RLEF";

/// Supported asset version
pub const VERSION: u8 = 1;

/// Header size in bytes
pub const HEADER_LEN: usize = 14;

/// The compiled-in 10x18 font
pub static FONT_10X18: &[u8] = include_bytes!("../assets/font_10x18.rlef");

/// Parsed asset header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AssetHeader {
    pub char_width: u16,
    pub char_height: u16,
    pub width: u16,
    pub height: u16,
}

impl AssetHeader {
    /// Parse and validate the header at the start of `asset`
    pub fn parse(asset: &[u8]) -> Result<Self, FontError> {
        let header = asset.get(..HEADER_LEN).ok_or(FontError::Truncated)?;
        if header[..4] != MAGIC {
            return Err(FontError::BadMagic);
        }
        if header[4] != VERSION {
            return Err(FontError::UnsupportedVersion(header[4]));
        }

        let word = |at: usize| u16::from_le_bytes([header[at], header[at + 1]]);
        let parsed = Self {
            char_width: word(6),
            char_height: word(8),
            width: word(10),
            height: word(12),
        };

        let rows_ok = parsed.height == parsed.char_height
            || parsed.height as u32 == 2 * parsed.char_height as u32;
        if parsed.char_width == 0
            || parsed.char_height == 0
            || parsed.width as usize != parsed.char_width as usize * GLYPH_COLUMNS
            || !rows_ok
        {
            return Err(FontError::BadGeometry);
        }

        Ok(parsed)
    }
}

/// Decode a run-length encoded font asset
pub fn decode(asset: &[u8]) -> Result<Font, FontError> {
    let header = AssetHeader::parse(asset)?;
    let (width, height) = (header.width as u32, header.height as u32);

    let bits = rle::decode_to_vec(&asset[HEADER_LEN..], width as usize * height as usize)?;
    let texture = PixelSurface::from_raw(width, height, width as usize, 1, bits)?;

    Font::with_cell(texture, header.char_width as u32, header.char_height as u32)
}

/// Decode the compiled-in font
pub fn builtin() -> Result<Font, FontError> {
    decode(FONT_10X18)
}
