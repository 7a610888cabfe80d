//! Unified error handling for plugforge-core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

/// Root error type for plugforge-core operations.
#[derive(Debug, Error, Clone)]
pub enum PlugforgeError {
    /// Descriptor, catalog or template errors. Raised before any write.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors while touching the output tree.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PlugforgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in plugforge".into(),
                "Please report it together with the command you ran".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                domain::ErrorCategory::Validation => ErrorCategory::Validation,
                domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                domain::ErrorCategory::Configuration | domain::ErrorCategory::Template => {
                    ErrorCategory::Configuration
                }
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// True when nothing was written before the error surfaced.
    pub fn is_side_effect_free(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::Application(ApplicationError::FileExists { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PlugforgeResult<T> = Result<T, PlugforgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_authoring_errors_are_configuration() {
        let err = PlugforgeError::from(DomainError::UnknownPipelineFunction {
            name: "nope".into(),
            template: "t".into(),
        });
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.is_side_effect_free());
    }

    #[test]
    fn transparent_display() {
        let err = PlugforgeError::from(DomainError::UnknownTemplate {
            category: "model".into(),
            subtype: "nonexistent".into(),
        });
        assert_eq!(err.to_string(), "no templates registered for model/nonexistent");
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
