pub mod catalog;
pub mod common;
pub mod descriptor;
pub mod plan;
pub mod template;

pub use catalog::{CatalogBuilder, TemplateCatalog};
pub use common::RelativePath;
pub use descriptor::{PluginDescriptor, ValidatedDescriptor};
pub use plan::{GenerationPlan, PlannedFile};
pub use template::{TemplateContent, TemplateEntry, TemplateId, TemplateSource};
