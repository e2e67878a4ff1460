//! Backend abstraction traits
//!
//! These traits define the interface between the compositor and the
//! platform code that owns scan-out buffers and image resources.

pub mod backend;
pub mod resource;

pub use backend::{Backend, BackendError};
pub use resource::{ResourceError, ResourceLoader};
