use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] gitkit_config::ConfigError),

    #[error("{0}")]
    Gitkit(#[from] gitkit_core::GitkitError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    #[track_caller]
    pub fn input<S: Into<String>>(message: S) -> Self {
        CliError::Input {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
