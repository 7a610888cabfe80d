//! Plugin descriptors: the raw request and its validated form.
//!
//! A [`PluginDescriptor`] is what an external front end (command line,
//! manifest reader) hands to the core. It is plain strings on purpose: the
//! validator owns every rule about what those strings may contain, and the
//! only way to obtain a [`ValidatedDescriptor`] is through it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Category, PluginName, Subtype};

/// Structured request describing the plugin to scaffold.
///
/// Immutable once built: the `with_*` methods consume and return `self`.
///
/// ```rust
/// use plugforge_core::domain::PluginDescriptor;
///
/// let descriptor = PluginDescriptor::new("basic_math", "tool", "provider")
///     .with_metadata("author", "langgenius");
/// assert_eq!(descriptor.metadata().get("author").map(String::as_str), Some("langgenius"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    name: String,
    category: String,
    subtype: String,
    /// Free-form values consumed by template tokens (`author`, `description`, ...).
    #[serde(default)]
    metadata: BTreeMap<String, String>,
}

impl PluginDescriptor {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        subtype: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            subtype: subtype.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Add one metadata value. Later values for the same key win.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.name, self.category, self.subtype)
    }
}

/// A descriptor that passed every validation rule and resolves to at least
/// one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDescriptor {
    pub(crate) name: PluginName,
    pub(crate) category: Category,
    pub(crate) subtype: Subtype,
    pub(crate) metadata: BTreeMap<String, String>,
}

impl ValidatedDescriptor {
    pub fn name(&self) -> &PluginName {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn subtype(&self) -> &Subtype {
        &self.subtype
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

impl fmt::Display for ValidatedDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.name, self.category, self.subtype)
    }
}
