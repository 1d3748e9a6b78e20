use crate::commands::Commands;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "gitkit")]
#[command(about = "Manage Google Identity Toolkit accounts from the command line")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Path to the Gitkit server config (JSON, or TOML by extension)
    #[arg(long, global = true, default_value = "gitkit-server-config.json")]
    pub(crate) config: PathBuf,

    /// Log level override (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub(crate) log_level: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub(crate) pretty: bool,
}
