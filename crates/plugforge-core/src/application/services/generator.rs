//! Project Generator - main application orchestrator.
//!
//! This service coordinates the entire generation workflow:
//! 1. Validate the descriptor
//! 2. Resolve catalog entries
//! 3. Render paths and bodies into an in-memory plan
//! 4. Stage and commit the plan transactionally
//!
//! Steps 1-3 never touch the filesystem; a failure there has no side
//! effects at all.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{ports::Filesystem, services::commit::Transaction},
    domain::{
        DescriptorValidator, GenerationPlan, PlannedFile, PluginDescriptor, RelativePath,
        RenderContext, TemplateCatalog, TemplateContent, ValidatedDescriptor, render,
    },
    error::PlugforgeResult,
};

/// Knobs for one `generate` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Replace existing destination files at commit time.
    pub force: bool,
}

/// What a successful `generate` wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub output_root: PathBuf,
    /// Relative paths, plan order.
    pub files: Vec<PathBuf>,
    /// Subset of `files` that replaced an existing file (force only).
    pub overwritten: Vec<PathBuf>,
    /// Staging dir still on disk because post-commit cleanup failed. It
    /// holds the backups of any overwritten files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_leftover: Option<PathBuf>,
}

/// Information about a catalog entry for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub category: String,
    pub subtype: String,
    pub output_path: String,
    pub literal: bool,
}

/// Main generation service.
pub struct ProjectGenerator {
    catalog: Arc<TemplateCatalog>,
    filesystem: Box<dyn Filesystem>,
}

impl ProjectGenerator {
    /// Create a generator over a frozen catalog and a filesystem adapter.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use plugforge_core::application::ProjectGenerator;
    ///
    /// let generator = ProjectGenerator::new(
    ///     shared_catalog()?,             // Arc<TemplateCatalog>
    ///     Box::new(LocalFilesystem::new()),
    /// );
    /// ```
    pub fn new(catalog: Arc<TemplateCatalog>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            catalog,
            filesystem,
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn validate(&self, descriptor: &PluginDescriptor) -> PlugforgeResult<ValidatedDescriptor> {
        Ok(DescriptorValidator::new(&self.catalog).validate(descriptor)?)
    }

    /// Validate, resolve and render without touching the filesystem.
    #[instrument(skip_all, fields(descriptor = %descriptor))]
    pub fn plan(&self, descriptor: &PluginDescriptor) -> PlugforgeResult<GenerationPlan> {
        let validated = self.validate(descriptor)?;
        let entries = self
            .catalog
            .lookup(validated.category(), validated.subtype())?;

        let mut plan = GenerationPlan::new();
        for entry in entries {
            let ctx = RenderContext::for_entry(&validated, entry);
            let path = RelativePath::parse(&render(entry.output_path(), &ctx)?)?;
            let content = match entry.content() {
                TemplateContent::Literal(src) => src.as_str().to_string(),
                TemplateContent::Parameterized(src) => render(src.as_str(), &ctx)?,
            };

            debug!(template = %entry.id(), path = %path, "Rendered");
            plan.push(PlannedFile {
                template_id: entry.id().clone(),
                path,
                content,
            })?;
        }

        info!(files = plan.len(), bytes = plan.total_bytes(), "Plan ready");
        Ok(plan)
    }

    /// Generate the plugin project under `output_root`.
    ///
    /// Either every planned file lands in place, or the tree is left as it
    /// was before the call.
    ///
    /// # Errors
    ///
    /// - Any validation or render error (no filesystem access happened)
    /// - `FileExists` for the first planned destination that exists and
    ///   `force` is off, or that is a directory (no writes happened)
    /// - `Io` when staging or commit failed and rollback succeeded
    /// - `RollbackFailed` when rollback could not undo everything
    ///
    /// A staging dir that cannot be removed after every file is in place does
    /// not fail the call; it is returned in `staging_leftover`.
    #[instrument(
        skip_all,
        fields(
            descriptor = %descriptor,
            output_root = %output_root.as_ref().display(),
            force = options.force
        )
    )]
    pub fn generate(
        &self,
        descriptor: &PluginDescriptor,
        output_root: impl AsRef<Path>,
        options: GenerateOptions,
    ) -> PlugforgeResult<GenerationResult> {
        let output_root = output_root.as_ref();
        let plan = self.plan(descriptor)?;

        let tx = Transaction::new(self.filesystem.as_ref(), output_root, options.force);
        tx.check_conflicts(&plan)?;
        let committed = tx.run(&plan)?;

        info!(
            files = committed.files.len(),
            overwritten = committed.overwritten.len(),
            "Generation completed"
        );
        Ok(GenerationResult {
            output_root: output_root.to_path_buf(),
            files: committed.files,
            overwritten: committed.overwritten,
            staging_leftover: committed.staging_leftover,
        })
    }

    /// List every catalog entry, registration order.
    pub fn list_templates(&self) -> Vec<TemplateInfo> {
        self.catalog
            .entries()
            .iter()
            .map(|e| TemplateInfo {
                id: e.id().to_string(),
                category: e.category().to_string(),
                subtype: e.subtype().to_string(),
                output_path: e.output_path().to_string(),
                literal: e.content().is_literal(),
            })
            .collect()
    }
}
