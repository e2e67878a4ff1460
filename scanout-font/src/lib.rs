//! Bitmap fonts for the Scanout compositor
//!
//! - [`atlas::Font`]: a 96x2 glyph grid (regular + bold) on an alpha surface
//! - [`rle`]: the run-length decoder for single-channel bitmaps
//! - [`fallback`]: the compiled-in font asset
//! - [`store::FontStore`]: resource search with built-in fallback

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod atlas;
pub mod fallback;
pub mod rle;
pub mod store;

pub use atlas::{printable, Font, FontError};
pub use rle::RleError;
pub use store::{FontSource, FontStore};
