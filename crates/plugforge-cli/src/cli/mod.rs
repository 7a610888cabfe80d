//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "plugforge",
    bin_name = "plugforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Plugin project scaffolding",
    long_about = "plugforge generates ready-to-edit plugin projects \
                  (tools, models, agent strategies, endpoints) from a \
                  builtin template catalog. Files are written all-or-nothing.",
    after_help = "EXAMPLES:\n\
        \x20 plugforge new basic_math --category tool --subtype provider\n\
        \x20 plugforge new my_llm     --category model --subtype llm --author acme\n\
        \x20 plugforge list --category model\n\
        \x20 plugforge completions bash > /usr/share/bash-completion/completions/plugforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new plugin project from the builtin templates.
    #[command(
        visible_alias = "n",
        about = "Create a new plugin project",
        after_help = "EXAMPLES:\n\
            \x20 plugforge new basic_math --category tool\n\
            \x20 plugforge new web_search --category tool --subtype tool-action --output ./web_search\n\
            \x20 plugforge new my_embedder --category model --subtype text-embedding --dry-run"
    )]
    New(NewArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 plugforge list\n\
            \x20 plugforge list --category model\n\
            \x20 plugforge list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 plugforge completions bash > ~/.local/share/bash-completion/completions/plugforge\n\
            \x20 plugforge completions zsh  > ~/.zfunc/_plugforge\n\
            \x20 plugforge completions fish > ~/.config/fish/completions/plugforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 plugforge init-config           # user config directory\n\
            \x20 plugforge init-config --local   # .plugforge.toml in CWD"
    )]
    InitConfig(InitConfigArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `plugforge new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Plugin identifier, e.g. `basic_math`.
    #[arg(value_name = "NAME", help = "Plugin name (snake_case identifier)")]
    pub name: String,

    /// Plugin category.
    #[arg(
        long = "category",
        value_name = "CATEGORY",
        help = "Plugin category (tool, model, agent-strategy, extension)"
    )]
    pub category: Option<String>,

    /// Subtype within the category. Defaults to the category's first template.
    #[arg(
        short = 's',
        long = "subtype",
        value_name = "SUBTYPE",
        help = "Subtype (provider, tool-action, llm, ...)"
    )]
    pub subtype: Option<String>,

    #[arg(short = 'a', long = "author", value_name = "AUTHOR", help = "Author name")]
    pub author: Option<String>,

    #[arg(
        short = 'd',
        long = "description",
        value_name = "TEXT",
        help = "One-line plugin description"
    )]
    pub description: Option<String>,

    #[arg(long = "repo", value_name = "URL", help = "Source repository URL")]
    pub repo: Option<String>,

    /// Extra template variables.
    #[arg(
        short = 'm',
        long = "meta",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Extra template variable (repeatable)"
    )]
    pub meta: Vec<(String, String)>,

    /// Output root. Defaults to `./<NAME>`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: ./NAME)"
    )]
    pub output: Option<PathBuf>,

    /// Replace existing files.
    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,

    /// Render everything, write nothing.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: NewFormat,
}

/// Output format for the `new` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NewFormat {
    /// Human-readable summary.
    Human,
    /// JSON report on stdout.
    Json,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `plugforge list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter by category.
    #[arg(long = "category", value_name = "CATEGORY", help = "Filter by category")]
    pub category: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Pairs with their files.
    Table,
    /// One `category/subtype` per line.
    List,
    /// JSON array of template entries.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `plugforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── init-config ───────────────────────────────────────────────────────────────

/// Arguments for `plugforge init-config`.
#[derive(Debug, Args)]
pub struct InitConfigArgs {
    /// Write `.plugforge.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from([
            "plugforge",
            "new",
            "basic_math",
            "--category",
            "tool",
            "--subtype",
            "provider",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "basic_math");
        assert_eq!(args.category.as_deref(), Some("tool"));
        assert_eq!(args.format, NewFormat::Human);
        assert!(!args.force);
    }

    #[test]
    fn meta_is_repeatable() {
        let cli = Cli::parse_from([
            "plugforge", "new", "x", "-m", "a=1", "--meta", "b=two=2",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(
            args.meta,
            [("a".into(), "1".into()), ("b".into(), "two=2".into())]
        );
    }

    #[test]
    fn meta_without_equals_is_rejected() {
        let result = Cli::try_parse_from(["plugforge", "new", "x", "--meta", "oops"]);
        assert!(result.is_err());
    }

    #[test]
    fn init_config_is_kebab_case() {
        let cli = Cli::parse_from(["plugforge", "init-config", "--force"]);
        assert!(matches!(cli.command, Commands::InitConfig(InitConfigArgs { force: true, .. })));
    }

    #[test]
    fn list_alias() {
        let cli = Cli::parse_from(["plugforge", "ls", "--format", "json"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List command");
        };
        assert_eq!(args.format, ListFormat::Json);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["plugforge", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
