//! `plugforge init-config`: write a default configuration file.

use std::path::PathBuf;

use crate::{
    cli::InitConfigArgs,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InitConfigArgs, output: OutputManager) -> CliResult<()> {
    let config_path = if args.local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        AppConfig::config_path()
    };

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = AppConfig::default()
        .to_toml()
        .map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise default config: {e}"),
            source: Some(Box::new(e)),
        })?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, commented(&toml))
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}

/// Default TOML plus commented-out examples of every optional key.
fn commented(toml: &str) -> String {
    format!(
        "# plugforge configuration\n\
         # Environment overrides: PLUGFORGE_DEFAULTS__AUTHOR, PLUGFORGE_OUTPUT__NO_COLOR, ...\n\
         \n\
         {toml}\n\
         # [defaults]\n\
         # author = \"your-name\"\n\
         # category = \"tool\"\n\
         # subtype = \"provider\"\n\
         # version = \"0.0.1\"\n"
    )
}
