use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors raised by Gitkit operations.
///
/// `Client` is caller-fixable (bad input, missing configuration, 4xx codes).
/// Every other variant is server-side: the remote service failed, or its
/// response could not be understood.
#[derive(Error, Debug)]
pub enum GitkitError {
    #[error("Client error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server error: {message} {location}")]
    Server {
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl GitkitError {
    /// Create a caller-fixable error
    #[track_caller]
    pub fn client<S: Into<String>>(message: S) -> Self {
        GitkitError::Client {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a server-reported error
    #[track_caller]
    pub fn server<S: Into<String>>(message: S) -> Self {
        GitkitError::Server {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create an error for a failed HTTP exchange
    #[track_caller]
    pub fn transport<S: Into<String>>(message: S) -> Self {
        GitkitError::Transport {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        GitkitError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// The bare message, without category or location.
    pub fn message(&self) -> &str {
        match self {
            Self::Client { message, .. }
            | Self::Server { message, .. }
            | Self::Transport { message, .. }
            | Self::Json { message, .. } => message,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Client { .. })
    }

    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

impl From<serde_json::Error> for GitkitError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        GitkitError::from_json(err)
    }
}

pub type Result<T> = StdResult<T, GitkitError>;
