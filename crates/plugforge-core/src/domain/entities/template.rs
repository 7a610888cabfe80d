//! Template entries: the unit the catalog stores and the renderer consumes.
//!
//! ## Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  TemplateEntry (one output file)                            │
//! │  ├── TemplateId             stable label for errors/listing  │
//! │  ├── Category / Subtype     which descriptors select it      │
//! │  ├── output_path            TemplateSource, may hold tokens  │
//! │  └── content                TemplateContent                  │
//! │       ├── Literal(src)       copied byte-for-byte            │
//! │       └── Parameterized(src) rendered via `{{ ... }}` tokens │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Literal vs Parameterized
//!
//! Literal content is never scanned. Some payloads legitimately contain
//! `{{` (GitHub workflow expressions such as `${{ secrets.TOKEN }}`), and
//! marking them literal is the only way to emit them unchanged.
//!
//! ## Static vs Owned
//!
//! `TemplateSource::Static` references compile-time strings
//! (`include_str!`) without allocation. `TemplateSource::Owned` exists for
//! entries assembled at runtime, mostly in tests.

use std::fmt;

use crate::domain::value_objects::{Category, Subtype};

/// Stable human-readable label of a template entry
/// (e.g. `tool/provider/manifest`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One (category, subtype, output path, body) unit producing one file.
///
/// Immutable once constructed; the catalog hands out shared references.
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    id: TemplateId,
    category: Category,
    subtype: Subtype,
    output_path: TemplateSource,
    content: TemplateContent,
}

impl TemplateEntry {
    pub fn new(
        id: impl Into<TemplateId>,
        category: Category,
        subtype: Subtype,
        output_path: impl Into<TemplateSource>,
        content: TemplateContent,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            subtype,
            output_path: output_path.into(),
            content,
        }
    }

    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn subtype(&self) -> &Subtype {
        &self.subtype
    }

    /// Output path template, relative to the output root.
    pub fn output_path(&self) -> &str {
        self.output_path.as_str()
    }

    pub fn content(&self) -> &TemplateContent {
        &self.content
    }

    /// Whether this entry answers for the given pair.
    pub fn matches(&self, category: Category, subtype: &Subtype) -> bool {
        self.category == category && &self.subtype == subtype
    }
}

// ============================================================================
// Content Types
// ============================================================================

/// Content specification for a file.
#[derive(Debug, Clone)]
pub enum TemplateContent {
    /// Content used exactly as provided.
    Literal(TemplateSource),

    /// Content with `{{ field | stage }}` tokens to be substituted.
    Parameterized(TemplateSource),
}

impl TemplateContent {
    pub fn source(&self) -> &TemplateSource {
        match self {
            Self::Literal(src) | Self::Parameterized(src) => src,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// Source of template content: either compile-time or runtime.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Compile-time string literal (e.g., `include_str!("manifest.yaml")`)
    Static(&'static str),

    /// Runtime-owned string (heap-allocated)
    Owned(String),
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl TemplateSource {
    /// Get string slice regardless of storage type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }

    /// Quick check for token syntax.
    pub fn contains_placeholder(&self) -> bool {
        self.as_str().contains("{{")
    }
}
