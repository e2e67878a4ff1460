//! Configuration types
//!
//! Options the compositor recognizes. Stored either as a TOML document or
//! as postcard-serialized binary data; parsing lives in the display crate.

pub mod types;

pub use types::*;
