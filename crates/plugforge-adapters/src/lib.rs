//! Infrastructure adapters for plugforge.
//!
//! This crate implements the ports defined in `plugforge-core::application::ports`
//! and ships the compiled-in template library. It contains all I/O.

pub mod builtin_templates;
pub mod filesystem;

// Re-export commonly used adapters
pub use builtin_templates::{builtin_catalog, shared_catalog};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
