//! Hardware-agnostic core of the Scanout compositor
//!
//! This crate contains everything that does not depend on a concrete
//! display backend:
//!
//! - Pixel surfaces with their own stride and pixel size
//! - Packed 32-bit pixel layouts and the alpha-blending contract
//! - The rotation-aware coordinate transform used by every primitive
//! - Backend and resource-loader traits
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod pixel;
pub mod rotation;
pub mod surface;
pub mod traits;

pub use pixel::{blend, effective_alpha, Color, PixelOrder};
pub use rotation::{PixelCursor, Rotation, Transform};
pub use surface::{PixelSurface, SurfaceError};
