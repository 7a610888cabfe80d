//! Driven (output) ports - implemented by infrastructure.
//!
//! The generator needs exactly one thing from the outside world: a
//! filesystem. The `plugforge-adapters` crate provides implementations.

use crate::error::PlugforgeResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `plugforge_adapters::filesystem::LocalFilesystem` (production)
/// - `plugforge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Primitives are single-step (`create_dir` makes one level, `remove_dir`
///   only removes an empty directory) so every change the generator makes
///   can be journaled and undone one by one.
/// - `rename` must replace nothing: the generator moves an existing
///   destination aside before renaming onto it.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create one directory. The parent must exist.
    fn create_dir(&self, path: &Path) -> PlugforgeResult<()>;

    /// Write content to a file, creating or truncating it.
    fn write_file(&self, path: &Path, content: &str) -> PlugforgeResult<()>;

    /// Move a file.
    fn rename(&self, from: &Path, to: &Path) -> PlugforgeResult<()>;

    /// Remove one file.
    fn remove_file(&self, path: &Path) -> PlugforgeResult<()>;

    /// Remove one empty directory.
    fn remove_dir(&self, path: &Path) -> PlugforgeResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> PlugforgeResult<()>;
}
