//! gitkit - Google Identity Toolkit command-line tool
//!
//! # Examples
//!
//! ```bash
//! # Look up an account
//! gitkit user get --email user@example.com --pretty
//!
//! # Walk every account, 100 per request
//! gitkit user list --max-results 100
//!
//! # Build a password reset link
//! gitkit link reset-password --email user@example.com --ip 203.0.113.7
//! ```

mod cli;
mod commands;
mod error;
mod execute;
mod link_commands;
mod logger;
mod token_commands;
mod upload_file;
mod user_commands;

#[cfg(test)]
mod tests;

use crate::{cli::Cli, error::Result as CliResult};

use gitkit_client::GitkitClient;
use gitkit_config::{ClientConfig, LogLevel};

use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<String> {
    let mut config = ClientConfig::load(&cli.config)?;
    if let Some(level) = cli.log_level.as_deref() {
        config.logging.level = LogLevel::from_str(level)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.logging.file.as_deref().map(Path::new),
        config.logging.colored,
    )?;
    config.log_summary();

    let client = GitkitClient::from_config(config)?;
    let value = execute::execute(&client, cli.command)?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };

    Ok(output)
}
