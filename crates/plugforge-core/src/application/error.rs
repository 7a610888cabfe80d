//! Application layer errors.
//!
//! These errors represent failures while touching the output tree, not
//! descriptor or template problems. Those are `DomainError` from
//! `crate::domain` and are always raised before any write.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, PlugforgeError};

/// Errors that occur while committing a plan to disk.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A planned destination already exists and may not be replaced.
    #[error("destination already exists: {path}")]
    FileExists { path: PathBuf },

    /// Filesystem operation failed.
    #[error("failed to {operation} {path}: {reason}")]
    Io {
        path: PathBuf,
        operation: &'static str,
        reason: String,
    },

    /// Commit failed and the cleanup afterwards failed too.
    ///
    /// `cause` is the error that triggered the rollback; `failures` lists
    /// every journal step that could not be undone.
    #[error("{cause}; rollback left {} path(s) behind", failures.len())]
    RollbackFailed {
        cause: Box<PlugforgeError>,
        failures: Vec<RollbackFailure>,
    },

    /// Store access failed (lock poisoned).
    #[error("filesystem store lock poisoned")]
    StoreLockError,
}

/// One journal step rollback could not undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for RollbackFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

impl ApplicationError {
    /// Shorthand for [`ApplicationError::Io`] from a `std::io::Error`.
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation,
            reason: err.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileExists { path } => vec![
                format!("Refusing to overwrite: {}", path.display()),
                "Use --force to overwrite existing files".into(),
                "Or choose a different --output directory".into(),
            ],
            Self::Io { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "No partial output was left behind".into(),
            ],
            Self::RollbackFailed { failures, .. } => {
                let mut out = vec!["The output directory may be inconsistent; inspect:".into()];
                out.extend(failures.iter().map(|f| format!("  {f}")));
                out
            }
            Self::StoreLockError => vec![
                "The in-memory filesystem lock was poisoned".into(),
                "A previous operation panicked; start over".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileExists { .. } => ErrorCategory::Conflict,
            Self::Io { .. } | Self::RollbackFailed { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollback_failure_keeps_cause() {
        let cause = PlugforgeError::from(ApplicationError::Io {
            path: "a".into(),
            operation: "write",
            reason: "disk full".into(),
        });
        let err = ApplicationError::RollbackFailed {
            cause: Box::new(cause),
            failures: vec![RollbackFailure {
                path: "out/provider".into(),
                reason: "busy".into(),
            }],
        };
        let msg = err.to_string();
        assert!(msg.contains("disk full"));
        assert!(msg.contains("1 path(s)"));
        assert!(err.suggestions().iter().any(|s| s.contains("out/provider")));
    }

    #[test]
    fn file_exists_is_conflict() {
        let err = ApplicationError::FileExists {
            path: "manifest.yaml".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }
}
