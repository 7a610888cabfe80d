// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for plugforge.
//!
//! Pure logic: descriptors, identifier transforms, the template catalog, the
//! renderer and the in-memory generation plan. All I/O is reached through
//! the ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: descriptors, entries and catalogs never change after construction
//! - **Pure rendering**: identical (entry, descriptor) pairs render identical text
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod identifier;
pub mod render;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    CatalogBuilder, GenerationPlan, PlannedFile, PluginDescriptor, RelativePath, TemplateCatalog,
    TemplateContent, TemplateEntry, TemplateId, TemplateSource, ValidatedDescriptor,
};

pub use error::{DomainError, ErrorCategory};
pub use render::{RenderContext, Transform, render};
pub use validation::DescriptorValidator;
pub use value_objects::{Category, MAX_NAME_LEN, PluginName, Subtype};

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TemplateCatalog {
        let provider = Subtype::parse("provider").unwrap();
        TemplateCatalog::builder()
            .register(TemplateEntry::new(
                "tool/provider/tool_py",
                Category::Tool,
                provider.clone(),
                "tools/{{ name }}.py",
                TemplateContent::Parameterized("class {{ name | pascal }}Tool:\n".into()),
            ))
            .unwrap()
            .register(TemplateEntry::new(
                "tool/provider/manifest",
                Category::Tool,
                provider,
                "manifest.yaml",
                TemplateContent::Parameterized(
                    "author: {{ author }}\nlabel: {{ name_title }}\n".into(),
                ),
            ))
            .unwrap()
            .build()
            .unwrap()
    }

    // ========================================================================
    // Validator Tests
    // ========================================================================

    #[test]
    fn validator_accepts_known_pair() {
        let catalog = catalog();
        let v = DescriptorValidator::new(&catalog)
            .validate(&PluginDescriptor::new("basic_math", "tool", "provider"))
            .unwrap();
        assert_eq!(v.name().as_str(), "basic_math");
        assert_eq!(v.category(), Category::Tool);
    }

    #[test]
    fn validator_fails_fast_on_name() {
        let catalog = catalog();
        let err = DescriptorValidator::new(&catalog)
            .validate(&PluginDescriptor::new("123-bad", "tool", "provider"))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidDescriptor { field: "name", .. }
        ));
    }

    #[test]
    fn validator_reports_name_before_category() {
        let catalog = catalog();
        let err = DescriptorValidator::new(&catalog)
            .validate(&PluginDescriptor::new("Bad", "nonsense", "provider"))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidDescriptor { field: "name", .. }
        ));
    }

    #[test]
    fn validator_rejects_unknown_category() {
        let catalog = catalog();
        let err = DescriptorValidator::new(&catalog)
            .validate(&PluginDescriptor::new("x", "datasource", "provider"))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidDescriptor {
                field: "category",
                ..
            }
        ));
    }

    #[test]
    fn validator_rejects_metadata_shadowing_derived_fields() {
        let catalog = catalog();
        for key in render::DERIVED_FIELDS {
            let err = DescriptorValidator::new(&catalog)
                .validate(
                    &PluginDescriptor::new("basic_math", "tool", "provider")
                        .with_metadata(key, "Not A Valid/Name"),
                )
                .unwrap_err();
            match err {
                DomainError::InvalidDescriptor {
                    field: "metadata",
                    reason,
                } => assert!(reason.contains(key), "{reason}"),
                other => panic!("{key}: {other:?}"),
            }
        }
    }

    #[test]
    fn validator_checks_pair_before_metadata() {
        let catalog = catalog();
        let err = DescriptorValidator::new(&catalog)
            .validate(&PluginDescriptor::new("x", "model", "llm").with_metadata("name", "y"))
            .unwrap_err();
        assert!(matches!(err, DomainError::UnknownTemplate { .. }));
    }

    #[test]
    fn validator_unknown_subtype_is_unknown_template() {
        let catalog = catalog();
        let err = DescriptorValidator::new(&catalog)
            .validate(&PluginDescriptor::new("x", "model", "nonexistent"))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownTemplate {
                category: "model".into(),
                subtype: "nonexistent".into()
            }
        );
    }

    // ========================================================================
    // Render Context Tests
    // ========================================================================

    fn validated(descriptor: PluginDescriptor) -> ValidatedDescriptor {
        let catalog = catalog();
        DescriptorValidator::new(&catalog).validate(&descriptor).unwrap()
    }

    #[test]
    fn render_context_has_standard_fields() {
        let catalog = catalog();
        let d = validated(PluginDescriptor::new("basic_math", "tool", "provider"));
        let ctx = RenderContext::for_entry(&d, &catalog.entries()[0]);

        assert_eq!(ctx.get("name"), Some("basic_math"));
        assert_eq!(ctx.get("name_pascal"), Some("BasicMath"));
        assert_eq!(ctx.get("name_title"), Some("Basic Math"));
        assert_eq!(ctx.get("plugins_key"), Some("tools"));
        assert_eq!(ctx.get("declaration_dir"), Some("provider"));
        assert_eq!(ctx.get("template_id"), Some("tool/provider/tool_py"));
        assert_eq!(ctx.get("author"), Some("anonymous"));
        assert_eq!(ctx.get("description"), Some("Basic Math plugin"));
        assert_eq!(ctx.get("created_at"), Some(""));
    }

    #[test]
    fn metadata_overrides_defaults() {
        let catalog = catalog();
        let d = validated(
            PluginDescriptor::new("basic_math", "tool", "provider")
                .with_metadata("author", "langgenius")
                .with_metadata("extra", "1"),
        );
        let ctx = RenderContext::for_entry(&d, &catalog.entries()[1]);
        assert_eq!(ctx.get("author"), Some("langgenius"));
        assert_eq!(ctx.get("extra"), Some("1"));
    }

    #[test]
    fn metadata_cannot_replace_derived_fields() {
        let catalog = catalog();
        let mut d = validated(PluginDescriptor::new("basic_math", "tool", "provider"));
        for key in render::DERIVED_FIELDS {
            d.metadata.insert(key.to_string(), "Not A Valid/Name".into());
        }
        let entry = &catalog.entries()[0];
        let ctx = RenderContext::for_entry(&d, entry);

        assert_eq!(ctx.get("name"), Some("basic_math"));
        assert_eq!(ctx.get("name_pascal"), Some("BasicMath"));
        assert_eq!(ctx.get("category"), Some("tool"));
        assert_eq!(ctx.get("template_id"), Some("tool/provider/tool_py"));
        assert_eq!(render(entry.output_path(), &ctx).unwrap(), "tools/basic_math.py");
    }

    #[test]
    fn entry_renders_pascal_name() {
        let catalog = catalog();
        let d = validated(PluginDescriptor::new("basic_math", "tool", "provider"));
        let entry = &catalog.entries()[0];
        let ctx = RenderContext::for_entry(&d, entry);

        let body = render(entry.content().source().as_str(), &ctx).unwrap();
        let path = render(entry.output_path(), &ctx).unwrap();
        assert!(body.contains("BasicMathTool"));
        assert_eq!(path, "tools/basic_math.py");
    }
}
