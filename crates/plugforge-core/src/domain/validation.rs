use tracing::instrument;

use crate::domain::{
    entities::{PluginDescriptor, TemplateCatalog, ValidatedDescriptor},
    error::DomainError,
    render::DERIVED_FIELDS,
    value_objects::{Category, PluginName, Subtype},
};

/// Centralized descriptor validation.
///
/// Reads catalog metadata only: no catalog mutation, no filesystem access.
/// Checks run in a fixed order and the first failure is returned:
///
/// 1. `name` (see [`PluginName`])
/// 2. `category`
/// 3. `subtype` spelling
/// 4. the catalog has entries for the pair, else `UnknownTemplate`
/// 5. no metadata key shadows a derived render field such as `name`
#[derive(Debug, Clone, Copy)]
pub struct DescriptorValidator<'a> {
    catalog: &'a TemplateCatalog,
}

impl<'a> DescriptorValidator<'a> {
    pub fn new(catalog: &'a TemplateCatalog) -> Self {
        Self { catalog }
    }

    #[instrument(skip_all, fields(name = %descriptor.name(), category = %descriptor.category(), subtype = %descriptor.subtype()))]
    pub fn validate(
        &self,
        descriptor: &PluginDescriptor,
    ) -> Result<ValidatedDescriptor, DomainError> {
        let name = PluginName::parse(descriptor.name())?;
        let category: Category = descriptor.category().parse()?;
        let subtype = Subtype::parse(descriptor.subtype())?;

        if !self.catalog.contains(category, &subtype) {
            return Err(DomainError::UnknownTemplate {
                category: category.to_string(),
                subtype: subtype.to_string(),
            });
        }

        if let Some(key) = descriptor
            .metadata()
            .keys()
            .find(|k| DERIVED_FIELDS.contains(&k.as_str()))
        {
            return Err(DomainError::InvalidDescriptor {
                field: "metadata",
                reason: format!("'{key}' is derived from the descriptor and cannot be set"),
            });
        }

        Ok(ValidatedDescriptor {
            name,
            category,
            subtype,
            metadata: descriptor.metadata().clone(),
        })
    }
}
