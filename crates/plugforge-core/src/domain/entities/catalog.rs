//! The template catalog: a frozen, ordered registry of template entries.
//!
//! A catalog is assembled once through [`CatalogBuilder`] and never changes
//! afterwards, so it can sit behind an `Arc` and be read from any thread.

use std::collections::BTreeSet;

use crate::domain::{
    entities::template::TemplateEntry,
    error::DomainError,
    value_objects::{Category, Subtype},
};

/// Immutable registry mapping (category, subtype) to template entries.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    entries: Vec<TemplateEntry>,
}

impl TemplateCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Entries registered for the pair, in registration order.
    ///
    /// # Errors
    ///
    /// `UnknownTemplate` when nothing is registered for the pair.
    pub fn lookup(
        &self,
        category: Category,
        subtype: &Subtype,
    ) -> Result<Vec<&TemplateEntry>, DomainError> {
        let found: Vec<&TemplateEntry> = self
            .entries
            .iter()
            .filter(|e| e.matches(category, subtype))
            .collect();

        if found.is_empty() {
            return Err(DomainError::UnknownTemplate {
                category: category.to_string(),
                subtype: subtype.to_string(),
            });
        }
        Ok(found)
    }

    pub fn contains(&self, category: Category, subtype: &Subtype) -> bool {
        self.entries.iter().any(|e| e.matches(category, subtype))
    }

    /// Every entry, in registration order.
    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    /// Distinct (category, subtype) pairs, in order of first registration.
    pub fn pairs(&self) -> Vec<(Category, Subtype)> {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .filter(|e| seen.insert((e.category(), e.subtype().clone())))
            .map(|e| (e.category(), e.subtype().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Single build step for a [`TemplateCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<TemplateEntry>,
}

impl CatalogBuilder {
    /// Register one entry.
    ///
    /// # Errors
    ///
    /// `DuplicateTemplate` if an entry with the same category, subtype and
    /// output path template is already registered.
    pub fn register(mut self, entry: TemplateEntry) -> Result<Self, DomainError> {
        let clash = self.entries.iter().any(|e| {
            e.matches(entry.category(), entry.subtype()) && e.output_path() == entry.output_path()
        });
        if clash {
            return Err(DomainError::DuplicateTemplate {
                category: entry.category().to_string(),
                subtype: entry.subtype().to_string(),
                path: entry.output_path().to_string(),
            });
        }

        self.entries.push(entry);
        Ok(self)
    }

    /// Register many entries, stopping at the first duplicate.
    pub fn register_all(
        self,
        entries: impl IntoIterator<Item = TemplateEntry>,
    ) -> Result<Self, DomainError> {
        entries.into_iter().try_fold(self, Self::register)
    }

    /// Freeze the catalog.
    ///
    /// # Errors
    ///
    /// `EmptyCatalog` if nothing was registered.
    pub fn build(self) -> Result<TemplateCatalog, DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }
        Ok(TemplateCatalog {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::template::TemplateContent;

    fn entry(id: &str, category: Category, subtype: &str, path: &str) -> TemplateEntry {
        TemplateEntry::new(
            id,
            category,
            Subtype::parse(subtype).unwrap(),
            path.to_string(),
            TemplateContent::Parameterized(String::from("body").into()),
        )
    }

    #[test]
    fn duplicate_output_path_is_rejected() {
        let err = TemplateCatalog::builder()
            .register(entry("a", Category::Tool, "provider", "x.yaml"))
            .unwrap()
            .register(entry("b", Category::Tool, "provider", "x.yaml"))
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateTemplate { .. }));
    }

    #[test]
    fn same_path_under_other_subtype_is_fine() {
        let catalog = TemplateCatalog::builder()
            .register(entry("a", Category::Tool, "provider", "x.yaml"))
            .unwrap()
            .register(entry("b", Category::Tool, "tool-action", "x.yaml"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn lookup_preserves_registration_order() {
        let catalog = TemplateCatalog::builder()
            .register_all([
                entry("3", Category::Tool, "provider", "c"),
                entry("other", Category::Model, "provider", "c"),
                entry("1", Category::Tool, "provider", "a"),
                entry("2", Category::Tool, "provider", "b"),
            ])
            .unwrap()
            .build()
            .unwrap();

        let ids: Vec<_> = catalog
            .lookup(Category::Tool, &Subtype::parse("provider").unwrap())
            .unwrap()
            .into_iter()
            .map(|e| e.id().as_str())
            .collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn lookup_miss_is_unknown_template() {
        let catalog = TemplateCatalog::builder()
            .register(entry("a", Category::Tool, "provider", "x"))
            .unwrap()
            .build()
            .unwrap();
        let err = catalog
            .lookup(Category::Model, &Subtype::parse("nonexistent").unwrap())
            .unwrap_err();
        assert!(matches!(err, DomainError::UnknownTemplate { .. }));
    }

    #[test]
    fn pairs_are_distinct_and_ordered() {
        let catalog = TemplateCatalog::builder()
            .register_all([
                entry("a", Category::Tool, "provider", "a"),
                entry("b", Category::Tool, "provider", "b"),
                entry("c", Category::Model, "tts", "c"),
            ])
            .unwrap()
            .build()
            .unwrap();
        let pairs = catalog.pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, Category::Tool);
        assert_eq!(pairs[1].1.as_str(), "tts");
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(
            TemplateCatalog::builder().build().unwrap_err(),
            DomainError::EmptyCatalog
        );
    }
}
