// ============================================================================
// domain/error.rs - DESCRIPTOR, CATALOG AND RENDER ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is raised before the filesystem is touched, so none of
/// them carries side effects. All errors are:
/// - Cloneable (they travel inside rollback reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Descriptor Errors
    // ========================================================================
    #[error("invalid descriptor field '{field}': {reason}")]
    InvalidDescriptor { field: &'static str, reason: String },

    // ========================================================================
    // Catalog Errors
    // ========================================================================
    #[error("no templates registered for {category}/{subtype}")]
    UnknownTemplate { category: String, subtype: String },

    #[error("template for {category}/{subtype} already writes '{path}'")]
    DuplicateTemplate {
        category: String,
        subtype: String,
        path: String,
    },

    #[error("template catalog is empty")]
    EmptyCatalog,

    // ========================================================================
    // Render Errors (template authoring mistakes)
    // ========================================================================
    #[error("template '{template}' references unknown field '{field}'")]
    MissingField { field: String, template: String },

    #[error("template '{template}' uses unknown pipeline function '{name}'")]
    UnknownPipelineFunction { name: String, template: String },

    #[error("template '{template}' has a malformed token at byte {offset}: {reason}")]
    MalformedToken {
        offset: usize,
        reason: String,
        template: String,
    },

    // ========================================================================
    // Plan Errors
    // ========================================================================
    #[error("output path '{path}' is not allowed: {reason}")]
    InvalidOutputPath { path: String, reason: String },

    #[error("two templates render to the same path: {path}")]
    DuplicatePath { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidDescriptor { field, reason } => match *field {
                "name" => vec![
                    format!("Plugin name is invalid: {reason}"),
                    "Use lowercase letters and digits separated by single underscores".into(),
                    "Start with a letter, e.g. basic_math, web_search, gpt4_tools".into(),
                ],
                "category" => vec![
                    format!("Category is invalid: {reason}"),
                    "Supported categories: model, tool, agent-strategy, extension".into(),
                ],
                _ => vec![format!("Check the '{field}' field: {reason}")],
            },
            Self::UnknownTemplate { category, subtype } => vec![
                format!("No template set exists for {category}/{subtype}"),
                "Try: plugforge list to see available category/subtype pairs".into(),
            ],
            Self::DuplicateTemplate { path, .. } => vec![
                format!("Two catalog entries write '{path}'"),
                "This is a catalog configuration error, please report it".into(),
            ],
            Self::MissingField { field, .. } => vec![
                format!("Provide '{field}' as descriptor metadata"),
                "Or fix the template token that references it".into(),
            ],
            Self::UnknownPipelineFunction { name, .. } => vec![
                format!("'{name}' is not a registered transform"),
                "Available: pascal, title, pascal_to_title, snake, kebab, upper, lower".into(),
            ],
            Self::InvalidOutputPath { path, .. } => vec![
                format!("'{path}' must stay inside the output directory"),
                "Output paths must be relative and must not contain '..'".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDescriptor { .. } => ErrorCategory::Validation,
            Self::UnknownTemplate { .. } => ErrorCategory::NotFound,
            Self::DuplicateTemplate { .. } | Self::EmptyCatalog => ErrorCategory::Configuration,
            Self::MissingField { .. }
            | Self::UnknownPipelineFunction { .. }
            | Self::MalformedToken { .. }
            | Self::InvalidOutputPath { .. }
            | Self::DuplicatePath { .. } => ErrorCategory::Template,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Template,
}
