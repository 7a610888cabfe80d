//! Command handlers, one module per subcommand.

pub mod completions;
pub mod init_config;
pub mod list;
pub mod new;
