//! Backend and resource implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in scanout-core that need no hardware:
//!
//! - [`MemoryBackend`]: double-buffered scan-out in RAM
//! - [`MemoryResources`]: path-keyed store of decoded images
//!
//! Hardware backends (DRM, fbdev, ...) implement the same
//! [`scanout_core::traits::Backend`] trait in platform crates.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod memory;
pub mod resources;

pub use memory::{MemoryBackend, MemoryBackendConfig};
pub use resources::{MemoryResources, RegisterError};
