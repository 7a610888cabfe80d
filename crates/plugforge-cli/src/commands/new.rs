//! Implementation of the `plugforge new` command.
//!
//! Responsibility: turn CLI arguments and config defaults into a
//! `PluginDescriptor`, call the core generator, and display results. No
//! naming or template rules live here.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use plugforge_adapters::{LocalFilesystem, shared_catalog};
use plugforge_core::{
    application::{GenerateOptions, GenerationResult, ProjectGenerator},
    domain::{Category, GenerationPlan, PlannedFile, PluginDescriptor, TemplateCatalog},
};

use crate::{
    cli::{NewArgs, NewFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `plugforge new` command.
///
/// 1. Resolve category, subtype and metadata (flags over config)
/// 2. Resolve the output root (`--output`, else `./NAME`)
/// 3. `--dry-run`: plan only and report
/// 4. Generate and report
#[instrument(skip_all, fields(plugin = %args.name))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = shared_catalog().map_err(|e| CliError::Core(e.into()))?;
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let descriptor = build_descriptor(&args, &config, &catalog, created_at)?;
    let output_root = resolve_output_root(&args.name, args.output.as_deref());

    debug!(
        descriptor = %descriptor,
        output_root = %output_root.display(),
        "Descriptor resolved"
    );

    let generator = ProjectGenerator::new(catalog, Box::new(LocalFilesystem::new()));

    if args.dry_run {
        let plan = generator.plan(&descriptor)?;
        return report_plan(&plan, &output_root, args.format, &output);
    }

    if args.format == NewFormat::Human {
        output.header(&format!("Creating {descriptor}..."))?;
    }
    info!(path = %output_root.display(), "Generation started");

    let result = generator.generate(
        &descriptor,
        &output_root,
        GenerateOptions { force: args.force },
    )?;

    report_result(&result, &descriptor, args.format, &output)
}

// ── Descriptor construction ───────────────────────────────────────────────────

fn build_descriptor(
    args: &NewArgs,
    config: &AppConfig,
    catalog: &TemplateCatalog,
    created_at: String,
) -> CliResult<PluginDescriptor> {
    let category = args
        .category
        .clone()
        .or_else(|| config.defaults.category.clone())
        .ok_or_else(|| CliError::InvalidInput {
            message: "missing --category (tool, model, agent-strategy, extension)".into(),
            source: None,
        })?;

    let subtype = match args.subtype.clone().or_else(|| config.defaults.subtype.clone()) {
        Some(subtype) => subtype,
        None => default_subtype(catalog, &category)?,
    };

    let mut descriptor = PluginDescriptor::new(&args.name, category, subtype)
        .with_metadata("created_at", created_at);

    let defaults = [
        ("author", config.defaults.author.as_ref()),
        ("version", config.defaults.version.as_ref()),
    ];
    for (key, value) in defaults {
        if let Some(value) = value {
            descriptor = descriptor.with_metadata(key, value.as_str());
        }
    }

    let flags = [
        ("author", args.author.as_ref()),
        ("description", args.description.as_ref()),
        ("repo", args.repo.as_ref()),
    ];
    for (key, value) in flags {
        if let Some(value) = value {
            descriptor = descriptor.with_metadata(key, value.as_str());
        }
    }

    for (key, value) in &args.meta {
        descriptor = descriptor.with_metadata(key.as_str(), value.as_str());
    }

    Ok(descriptor)
}

/// First registered subtype of `category`, e.g. `provider` for `tool`.
fn default_subtype(catalog: &TemplateCatalog, category: &str) -> CliResult<String> {
    let category = Category::from_str(category).map_err(|e| CliError::Core(e.into()))?;
    catalog
        .pairs()
        .into_iter()
        .find(|(c, _)| *c == category)
        .map(|(_, s)| s.as_str().to_string())
        .ok_or_else(|| CliError::InvalidInput {
            message: format!("no templates for category '{category}', pass --subtype"),
            source: None,
        })
}

fn resolve_output_root(name: &str, output: Option<&Path>) -> PathBuf {
    output.map_or_else(|| Path::new(".").join(name), Path::to_path_buf)
}

// ── Reporting ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct DryRunReport<'a> {
    dry_run: bool,
    output_root: &'a Path,
    total_bytes: usize,
    files: &'a [PlannedFile],
}

fn report_plan(
    plan: &GenerationPlan,
    output_root: &Path,
    format: NewFormat,
    out: &OutputManager,
) -> CliResult<()> {
    match format {
        NewFormat::Json => {
            let report = DryRunReport {
                dry_run: true,
                output_root,
                total_bytes: plan.total_bytes(),
                files: plan.files(),
            };
            out.raw(&serde_json::to_string_pretty(&report)?)?;
        }
        NewFormat::Human => {
            out.info(&format!(
                "Dry run: would create {} files ({} bytes) under {}",
                plan.len(),
                plan.total_bytes(),
                output_root.display(),
            ))?;
            for file in plan.files() {
                out.detail(&format!("  + {}", file.path))?;
            }
        }
    }
    Ok(())
}

fn report_result(
    result: &GenerationResult,
    descriptor: &PluginDescriptor,
    format: NewFormat,
    out: &OutputManager,
) -> CliResult<()> {
    if format == NewFormat::Json {
        out.raw(&serde_json::to_string_pretty(result)?)?;
        return Ok(());
    }

    for file in &result.files {
        let marker = if result.overwritten.contains(file) { "~" } else { "+" };
        out.detail(&format!("  {marker} {}", file.display()))?;
    }
    if !result.overwritten.is_empty() {
        out.warning(&format!("Overwrote {} existing files", result.overwritten.len()))?;
    }
    if let Some(staging) = &result.staging_leftover {
        out.warning(&format!(
            "Could not remove {}; it holds backups of overwritten files",
            staging.display()
        ))?;
    }
    out.success(&format!(
        "Plugin '{}' created in {} ({} files)",
        descriptor.name(),
        result.output_root.display(),
        result.files.len()
    ))?;

    if !out.is_quiet() {
        out.print("")?;
        out.print("Next steps:")?;
        out.print(&format!("  cd {}", result.output_root.display()))?;
        out.print("  pip install -r requirements.txt")?;
        out.print("  cp .env.example .env && python -m main")?;
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Commands};

    fn new_args(argv: &[&str]) -> NewArgs {
        let cli = Cli::parse_from(["plugforge", "new"].iter().chain(argv));
        match cli.command {
            Commands::New(args) => args,
            other => panic!("expected New, got {other:?}"),
        }
    }

    fn build(argv: &[&str], config: &AppConfig) -> CliResult<PluginDescriptor> {
        let catalog = shared_catalog().unwrap();
        build_descriptor(&new_args(argv), config, &catalog, "2026-01-01T00:00:00Z".into())
    }

    #[test]
    fn flags_become_descriptor() {
        let d = build(
            &["basic_math", "--category", "tool", "--subtype", "provider", "-a", "acme"],
            &AppConfig::default(),
        )
        .unwrap();
        assert_eq!(d.name(), "basic_math");
        assert_eq!(d.category(), "tool");
        assert_eq!(d.subtype(), "provider");
        assert_eq!(d.metadata()["author"], "acme");
        assert_eq!(d.metadata()["created_at"], "2026-01-01T00:00:00Z");
    }

    #[test]
    fn subtype_defaults_to_first_pair_of_category() {
        let d = build(&["x", "--category", "agent-strategy"], &AppConfig::default()).unwrap();
        assert_eq!(d.subtype(), "strategy");
    }

    #[test]
    fn missing_category_is_input_error() {
        let err = build(&["x"], &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unknown_category_without_subtype_is_core_error() {
        let err = build(&["x", "--category", "datasource"], &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
    }

    #[test]
    fn config_supplies_defaults_and_flags_win() {
        let mut config = AppConfig::default();
        config.defaults.category = Some("model".into());
        config.defaults.subtype = Some("llm".into());
        config.defaults.author = Some("from-config".into());
        config.defaults.version = Some("1.2.3".into());

        let d = build(&["x", "--author", "from-flag"], &config).unwrap();
        assert_eq!(d.category(), "model");
        assert_eq!(d.subtype(), "llm");
        assert_eq!(d.metadata()["author"], "from-flag");
        assert_eq!(d.metadata()["version"], "1.2.3");
    }

    #[test]
    fn meta_flags_override_everything() {
        let d = build(
            &["x", "--category", "tool", "--meta", "created_at=fixed", "-m", "label=Calc"],
            &AppConfig::default(),
        )
        .unwrap();
        assert_eq!(d.metadata()["created_at"], "fixed");
        assert_eq!(d.metadata()["label"], "Calc");
    }

    #[test]
    fn output_root_defaults_to_name() {
        assert_eq!(resolve_output_root("basic_math", None), PathBuf::from("./basic_math"));
        assert_eq!(
            resolve_output_root("basic_math", Some(Path::new("/tmp/out"))),
            PathBuf::from("/tmp/out")
        );
    }
}
