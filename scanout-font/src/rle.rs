//! Run-length decoding for single-channel bitmaps
//!
//! Stream format:
//! - Each byte is one run: bit 7 selects the fill value (1 = 255, 0 = 0),
//!   bits 0-6 give the run length
//! - A zero byte terminates the stream
//!
//! The decoded output must have exactly the expected size. A stream that
//! decodes to more or fewer bytes is corrupt.

use alloc::vec;
use alloc::vec::Vec;

/// Stream terminator
pub const TERMINATOR: u8 = 0x00;

/// Bit selecting the fill value of a run
pub const FILL_BIT: u8 = 0x80;

/// Bits holding the run length
pub const LENGTH_MASK: u8 = 0x7F;

/// Errors that can occur while decoding a run stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RleError {
    /// Runs extend past the end of the output
    Overflow {
        /// Byte offset of the offending run in the input
        offset: usize,
    },
    /// The terminator arrived before the output was full
    ShortOutput {
        /// Bytes actually produced
        decoded: usize,
    },
    /// The input ended without a terminator
    MissingTerminator,
}

/// Decode a run stream into `out`, which must be filled exactly
///
/// Returns the number of input bytes consumed, terminator included.
pub fn decode(runs: &[u8], out: &mut [u8]) -> Result<usize, RleError> {
    let mut pos = 0;

    for (offset, &run) in runs.iter().enumerate() {
        if run == TERMINATOR {
            if pos != out.len() {
                return Err(RleError::ShortOutput { decoded: pos });
            }
            return Ok(offset + 1);
        }

        let len = (run & LENGTH_MASK) as usize;
        let value = if run & FILL_BIT != 0 { 0xFF } else { 0x00 };

        let end = pos + len;
        let dst = out
            .get_mut(pos..end)
            .ok_or(RleError::Overflow { offset })?;
        dst.fill(value);
        pos = end;
    }

    Err(RleError::MissingTerminator)
}

/// Decode a run stream into a new buffer of `len` bytes
pub fn decode_to_vec(runs: &[u8], len: usize) -> Result<Vec<u8>, RleError> {
    let mut out = vec![0u8; len];
    decode(runs, &mut out)?;
    Ok(out)
}
