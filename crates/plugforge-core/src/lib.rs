//! plugforge core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the plugforge
//! plugin scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          plugforge-cli (CLI)            │
//! │     (Builds PluginDescriptor)           │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         ProjectGenerator                │
//! │   validate → lookup → render → commit   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │          (Driven: Filesystem)           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    plugforge-adapters (Infrastructure)  │
//! │  (LocalFilesystem, builtin templates)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Descriptor, Catalog, Renderer, Plan)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use plugforge_core::prelude::*;
//!
//! let generator = ProjectGenerator::new(catalog, Box::new(filesystem));
//! let descriptor = PluginDescriptor::new("basic_math", "tool", "provider")
//!     .with_metadata("author", "langgenius");
//!
//! let result = generator.generate(&descriptor, "./basic_math", GenerateOptions::default())?;
//! println!("{} files", result.files.len());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateOptions, GenerationResult, ProjectGenerator, TemplateInfo, ports::Filesystem,
    };
    pub use crate::domain::{
        Category, GenerationPlan, PluginDescriptor, Subtype, TemplateCatalog, TemplateContent,
        TemplateEntry,
    };
    pub use crate::error::{PlugforgeError, PlugforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
