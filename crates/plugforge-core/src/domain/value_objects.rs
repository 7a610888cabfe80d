//! Domain value objects: PluginName, Category, Subtype.
//!
//! # Design
//!
//! These are pure value types: equality-by-value, no identity. They can
//! only be obtained through their parsers, so holding one means the string
//! inside already passed the descriptor rules.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── PluginName ───────────────────────────────────────────────────────────────

/// Maximum plugin name length, in bytes.
pub const MAX_NAME_LEN: usize = 128;

/// A validated plugin identifier: `^[a-z][a-z0-9]*(_[a-z0-9]+)*$`.
///
/// Lowercase ASCII letters and digits, single underscores as separators,
/// no leading or trailing underscore, starting with a letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PluginName(String);

impl PluginName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidDescriptor {
            field: "name",
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if raw.len() > MAX_NAME_LEN {
            return Err(invalid(&format!(
                "name is longer than {MAX_NAME_LEN} characters"
            )));
        }
        if !raw.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(invalid("name must start with a lowercase letter"));
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
        {
            return Err(invalid(&format!(
                "'{raw}' contains '{bad}'; only a-z, 0-9 and '_' are allowed"
            )));
        }
        if raw.ends_with('_') {
            return Err(invalid("name cannot end with '_'"));
        }
        if raw.contains("__") {
            return Err(invalid("name cannot contain consecutive underscores"));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Category ─────────────────────────────────────────────────────────────────

/// The kind of plugin being scaffolded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Model,
    Tool,
    AgentStrategy,
    Extension,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Self::Model,
        Self::Tool,
        Self::AgentStrategy,
        Self::Extension,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Tool => "tool",
            Self::AgentStrategy => "agent-strategy",
            Self::Extension => "extension",
        }
    }

    /// Key under `plugins:` in the generated manifest.
    pub const fn plugins_key(&self) -> &'static str {
        match self {
            Self::Model => "models",
            Self::Tool => "tools",
            Self::AgentStrategy => "agent_strategies",
            Self::Extension => "endpoints",
        }
    }

    /// Directory holding the plugin's top-level declaration file.
    pub const fn declaration_dir(&self) -> &'static str {
        match self {
            Self::Extension => "group",
            _ => "provider",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "model" | "model-provider" => Ok(Self::Model),
            "tool" => Ok(Self::Tool),
            "agent-strategy" => Ok(Self::AgentStrategy),
            "extension" => Ok(Self::Extension),
            "" => Err(DomainError::InvalidDescriptor {
                field: "category",
                reason: "category cannot be empty".into(),
            }),
            other => Err(DomainError::InvalidDescriptor {
                field: "category",
                reason: format!("unknown category: {other}"),
            }),
        }
    }
}

// ── Subtype ──────────────────────────────────────────────────────────────────

/// A subtype within a category (`provider`, `text-embedding`, `tool-action`, ...).
///
/// Deliberately open: which subtypes exist is a property of the template
/// catalog, not of this type. Only the spelling is checked here
/// (lowercase kebab).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subtype(String);

impl Subtype {
    pub const PROVIDER: &'static str = "provider";
    pub const TOOL_ACTION: &'static str = "tool-action";

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let invalid = |reason: String| DomainError::InvalidDescriptor {
            field: "subtype",
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("subtype cannot be empty".into()));
        }
        let well_formed = raw
            .split('-')
            .all(|part| {
                !part.is_empty()
                    && part
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            });
        if !well_formed {
            return Err(invalid(format!(
                "'{raw}' must be lowercase words separated by single '-'"
            )));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Underscore form, used for Python module and directory names.
    pub fn snake(&self) -> String {
        self.0.replace('-', "_")
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Subtype {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Subtype> for String {
    fn from(value: Subtype) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_name_accepts_word_identifiers() {
        for ok in ["x", "basic_math", "gpt4_tools", "a1_b2_c3"] {
            assert!(PluginName::parse(ok).is_ok(), "{ok} should be valid");
        }
    }

    #[test]
    fn plugin_name_rejects_bad_shapes() {
        for bad in [
            "", "123-bad", "1abc", "_lead", "trail_", "dou__ble", "Upper", "dash-ed", "sp ace",
        ] {
            let err = PluginName::parse(bad).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidDescriptor { field: "name", .. }),
                "{bad} should fail on name"
            );
        }
    }

    #[test]
    fn plugin_name_length_limit() {
        assert!(PluginName::parse(&"a".repeat(MAX_NAME_LEN)).is_ok());
        assert!(PluginName::parse(&"a".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn category_parses_aliases() {
        assert_eq!("model".parse::<Category>().unwrap(), Category::Model);
        assert_eq!("Model-Provider".parse::<Category>().unwrap(), Category::Model);
        assert_eq!(
            "agent-strategy".parse::<Category>().unwrap(),
            Category::AgentStrategy
        );
        assert!("datasource".parse::<Category>().is_err());
    }

    #[test]
    fn category_manifest_keys() {
        assert_eq!(Category::Extension.plugins_key(), "endpoints");
        assert_eq!(Category::Extension.declaration_dir(), "group");
        assert_eq!(Category::Tool.declaration_dir(), "provider");
    }

    #[test]
    fn subtype_spelling() {
        assert_eq!(Subtype::parse("text-embedding").unwrap().snake(), "text_embedding");
        assert!(Subtype::parse("nonexistent").is_ok());
        assert!(Subtype::parse("Text").is_err());
        assert!(Subtype::parse("a--b").is_err());
        assert!(Subtype::parse("").is_err());
    }
}
