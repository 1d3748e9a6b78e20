use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Why a [`crate::ClientConfig`] could not be built or used
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("\"{key}\" should be configured {location}")]
    Missing {
        key: &'static str,
        location: ErrorLocation,
    },

    #[error("{message} {location}")]
    Invalid {
        message: String,
        location: ErrorLocation,
    },

    /// The service account key file named by the config
    #[error("Can not read file {path}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An in-memory config map of the wrong shape
    #[error("Invalid config map: {source}")]
    Value {
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// A required key that is absent or empty
    #[track_caller]
    pub fn missing(key: &'static str) -> Self {
        ConfigError::Missing {
            key,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// A value that is present but unusable
    #[track_caller]
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        ConfigError::Invalid {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message suitable for end users: no source location, and for key file
    /// failures only the path.
    pub fn message(&self) -> String {
        match self {
            ConfigError::Missing { key, .. } => format!("\"{key}\" should be configured"),
            ConfigError::Invalid { message, .. } => message.clone(),
            ConfigError::KeyFile { path, .. } => format!("Can not read file {}", path.display()),
            other => other.to_string(),
        }
    }
}

pub type ConfigErrorResult<T> = std::result::Result<T, ConfigError>;
