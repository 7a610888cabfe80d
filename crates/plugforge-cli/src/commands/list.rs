//! Implementation of the `plugforge list` command.

use std::str::FromStr;

use plugforge_adapters::{LocalFilesystem, shared_catalog};
use plugforge_core::{application::ProjectGenerator, domain::Category};

use crate::{
    cli::{ListArgs, ListFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let catalog = shared_catalog().map_err(|e| CliError::Core(e.into()))?;
    let generator = ProjectGenerator::new(catalog, Box::new(LocalFilesystem::new()));

    let filter = args
        .category
        .as_deref()
        .map(Category::from_str)
        .transpose()
        .map_err(|e| CliError::Core(e.into()))?;

    let templates: Vec<_> = generator
        .list_templates()
        .into_iter()
        .filter(|t| filter.is_none_or(|c| t.category == c.as_str()))
        .collect();

    let pairs: Vec<_> = generator
        .catalog()
        .pairs()
        .into_iter()
        .filter(|(c, _)| filter.is_none_or(|f| f == *c))
        .collect();

    match args.format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            for (category, subtype) in &pairs {
                let files: Vec<_> = templates
                    .iter()
                    .filter(|t| t.category == category.as_str() && t.subtype == subtype.as_str())
                    .collect();
                output.print(&format!(
                    "  {:<28} {} files",
                    format!("{category}/{subtype}"),
                    files.len()
                ))?;
                for t in files {
                    let marker = if t.literal { " (verbatim)" } else { "" };
                    output.detail(&format!("      {}{marker}", t.output_path))?;
                }
            }
        }

        ListFormat::List => {
            for (category, subtype) in &pairs {
                output.raw(&format!("{category}/{subtype}"))?;
            }
        }

        ListFormat::Json => {
            output.raw(&serde_json::to_string_pretty(&templates)?)?;
        }
    }

    Ok(())
}
