//! Software compositor and display session for Scanout
//!
//! This crate provides:
//! - [`Compositor`]: clear, fill, blit, text and icon primitives over a
//!   [`scanout_core::PixelSurface`], with rotation and overscan applied
//! - [`Display`]: a session that picks the first working backend from an
//!   ordered list and forwards drawing to its current buffer
//! - [`config`]: loading a [`scanout_core::config::DisplayConfig`] from
//!   TOML or postcard
//!
//! # Drawing model
//!
//! Callers draw in logical coordinates. The compositor offsets them by the
//! overscan margin, maps them through the current [`scanout_core::Rotation`]
//! and writes the physical buffer. Anything whose bounding box does not
//! fit on the logical surface is skipped rather than clipped.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod compositor;
pub mod config;
pub mod glyph;
pub mod rainbow;
pub mod session;

pub use compositor::{Compositor, DrawError, Overscan};
pub use config::LoadError;
pub use rainbow::Rainbow;
pub use session::{Display, DisplayState, InitError};
