use crate::{ConfigError, DEFAULT_LOG_LEVEL};

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use log::{LevelFilter, warn};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Log verbosity.
///
/// Parsing a name (`--log-level`, `GITKIT_LOG_LEVEL`) is strict. Reading a
/// config file is not: an unrecognized value there logs a warning and
/// becomes the default level, so a typo never stops the client from loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub LevelFilter);

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(DEFAULT_LOG_LEVEL)
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("warning") {
            return Ok(LogLevel(LevelFilter::Warn));
        }

        LevelFilter::from_str(name).map(LogLevel).map_err(|_| {
            ConfigError::invalid(format!(
                "unknown log level '{name}' (expected off, error, warn, info, debug or trace)"
            ))
        })
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Consume whatever value is there so the surrounding struct still parses
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Other(IgnoredAny),
        }

        let name = match Raw::deserialize(deserializer)? {
            Raw::Name(name) => name,
            Raw::Other(_) => {
                warn!("log level is not a string; using {DEFAULT_LOG_LEVEL}");
                return Ok(LogLevel::default());
            }
        };

        match LogLevel::from_str(&name) {
            Ok(level) => Ok(level),
            Err(e) => {
                warn!("{}; using {}", e.message(), DEFAULT_LOG_LEVEL);
                Ok(LogLevel::default())
            }
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for LogLevel {
    type Target = LevelFilter;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(log_level: LogLevel) -> Self {
        log_level.0
    }
}
