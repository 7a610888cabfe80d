//! Application layer for plugforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`ProjectGenerator`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! template or naming rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    GenerateOptions, GenerationResult, ProjectGenerator,
    TemplateInfo, // DTO for catalog listings
};

// Re-export port traits (for adapter implementation)
pub use ports::Filesystem;

pub use error::{ApplicationError, RollbackFailure};
