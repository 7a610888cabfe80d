use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// A filesystem path guaranteed to stay **inside** the output root.
///
/// Rendered output paths come from template text, so they are checked
/// before anything is planned:
/// - not absolute, no drive prefix
/// - no `..` components
/// - not empty once `.` components are dropped
///
/// `RelativePath` is a *semantic guardrail*, not a filesystem abstraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Parse a rendered path, normalising away `.` components.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let reject = |reason: &str| DomainError::InvalidOutputPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut normalised = PathBuf::new();
        for component in Path::new(raw).components() {
            match component {
                Component::Normal(part) => normalised.push(part),
                Component::CurDir => {}
                Component::ParentDir => return Err(reject("'..' is not allowed")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(reject("absolute paths are not allowed"));
                }
            }
        }

        if normalised.as_os_str().is_empty() {
            return Err(reject("path is empty"));
        }

        Ok(Self(normalised))
    }

    /// Borrow as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_accepts_relative() {
        let p = RelativePath::parse("tools/basic_math.py").unwrap();
        assert_eq!(p.as_path(), Path::new("tools/basic_math.py"));
    }

    #[test]
    fn cur_dir_components_are_dropped() {
        let p = RelativePath::parse("./provider/./x.yaml").unwrap();
        assert_eq!(p.as_path(), Path::new("provider/x.yaml"));
    }

    #[test]
    fn rejects_absolute() {
        assert!(matches!(
            RelativePath::parse("/etc/passwd"),
            Err(DomainError::InvalidOutputPath { .. })
        ));
    }

    #[test]
    fn rejects_parent_traversal() {
        assert!(RelativePath::parse("../outside.txt").is_err());
        assert!(RelativePath::parse("tools/../../x").is_err());
    }

    #[test]
    fn rejects_empty() {
        assert!(RelativePath::parse("").is_err());
        assert!(RelativePath::parse("./.").is_err());
    }
}
