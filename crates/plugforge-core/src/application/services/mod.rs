//! Application services - orchestrate use cases.
//!
//! `ProjectGenerator` is the single use case: turn a descriptor into a
//! plugin project on disk. `commit` holds its staging and rollback journal.

mod commit;
pub mod generator;

pub use generator::{GenerateOptions, GenerationResult, ProjectGenerator, TemplateInfo};
