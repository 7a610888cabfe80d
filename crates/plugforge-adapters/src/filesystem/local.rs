//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use plugforge_core::{
    application::ApplicationError,
    error::{PlugforgeError, PlugforgeResult},
    prelude::Filesystem,
};
use tracing::trace;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as occupied
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path) -> PlugforgeResult<()> {
        trace!(path = %path.display(), "create_dir");
        std::fs::create_dir(path).map_err(|e| map_io_error(path, &e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> PlugforgeResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "write_file");
        std::fs::write(path, content).map_err(|e| map_io_error(path, &e, "write file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> PlugforgeResult<()> {
        trace!(from = %from.display(), to = %to.display(), "rename");
        std::fs::rename(from, to).map_err(|e| map_io_error(to, &e, "move file to"))
    }

    fn remove_file(&self, path: &Path) -> PlugforgeResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, &e, "remove file"))
    }

    fn remove_dir(&self, path: &Path) -> PlugforgeResult<()> {
        std::fs::remove_dir(path).map_err(|e| map_io_error(path, &e, "remove directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> PlugforgeResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, &e, "remove directory tree"))
    }
}

fn map_io_error(path: &Path, e: &io::Error, operation: &'static str) -> PlugforgeError {
    ApplicationError::io(operation, path, e).into()
}
