//! In-memory filesystem adapter for tests and dry runs.
//!
//! Mirrors the failure modes of `std::fs` that the generator relies on:
//! creating a directory needs its parent, `remove_dir` needs an empty
//! directory, and nothing can be written over a directory.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use plugforge_core::{
    application::ApplicationError,
    error::{PlugforgeError, PlugforgeResult},
    prelude::Filesystem,
};

/// In-memory filesystem. Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn dir_exists(&self, path: &Path) -> bool {
        is_root(path) || self.directories.contains(path)
    }

    fn occupied(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dir_exists(path)
    }

    fn parent_exists(&self, path: &Path) -> bool {
        path.parent().is_none_or(|p| self.dir_exists(p))
    }
}

fn is_root(path: &Path) -> bool {
    path.as_os_str().is_empty() || path.parent().is_none()
}

fn fail(path: &Path, operation: &'static str, reason: &str) -> PlugforgeError {
    ApplicationError::Io {
        path: path.to_path_buf(),
        operation,
        reason: reason.to_string(),
    }
    .into()
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// List all directories, sorted.
    pub fn list_dirs(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) -> PlugforgeResult<()> {
        let mut inner = self.write()?;
        inner.files.clear();
        inner.directories.clear();
        Ok(())
    }

    fn read(&self) -> PlugforgeResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> PlugforgeResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.read().is_ok_and(|inner| inner.occupied(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read().is_ok_and(|inner| inner.dir_exists(path))
    }

    fn create_dir(&self, path: &Path) -> PlugforgeResult<()> {
        let mut inner = self.write()?;
        if inner.occupied(path) {
            return Err(fail(path, "create directory", "already exists"));
        }
        if !inner.parent_exists(path) {
            return Err(fail(path, "create directory", "parent directory does not exist"));
        }
        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> PlugforgeResult<()> {
        let mut inner = self.write()?;
        if inner.dir_exists(path) {
            return Err(fail(path, "write file", "is a directory"));
        }
        if !inner.parent_exists(path) {
            return Err(fail(path, "write file", "parent directory does not exist"));
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> PlugforgeResult<()> {
        let mut inner = self.write()?;
        if inner.dir_exists(to) {
            return Err(fail(to, "move file to", "is a directory"));
        }
        if !inner.parent_exists(to) {
            return Err(fail(to, "move file to", "parent directory does not exist"));
        }
        let content = inner
            .files
            .remove(from)
            .ok_or_else(|| fail(from, "move file", "no such file"))?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> PlugforgeResult<()> {
        let mut inner = self.write()?;
        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| fail(path, "remove file", "no such file"))
    }

    fn remove_dir(&self, path: &Path) -> PlugforgeResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(fail(path, "remove directory", "no such directory"));
        }
        let has_children = inner.files.keys().any(|p| p.parent() == Some(path))
            || inner.directories.iter().any(|p| p.parent() == Some(path));
        if has_children {
            return Err(fail(path, "remove directory", "directory not empty"));
        }
        inner.directories.remove(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> PlugforgeResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(fail(path, "remove directory tree", "no such directory"));
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}
