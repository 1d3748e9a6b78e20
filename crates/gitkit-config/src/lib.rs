mod client_config;
mod error;
mod log_level;
mod logging_config;

pub use client_config::ClientConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;

/// Identity Toolkit relying-party endpoint; RPC method names are appended.
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/identitytoolkit/v3/relyingparty/";
/// `iss` claim carried by Gitkit identity tokens.
pub const DEFAULT_TOKEN_ISSUER: &str = "https://identitytoolkit.google.com/";
pub const DEFAULT_COOKIE_NAME: &str = "gtoken";
/// Tokens issued more than 180 days ago are rejected.
pub const TOKEN_MAX_AGE_SECS: i64 = 180 * 86400;
pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const GITKIT_SCOPE: &str = "https://www.googleapis.com/auth/identitytoolkit";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

#[cfg(test)]
mod tests;
