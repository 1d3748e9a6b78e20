use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_API_BASE, DEFAULT_COOKIE_NAME, DEFAULT_TOKEN_ISSUER,
    LoggingConfig,
};

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

/// Settings for a Gitkit client.
///
/// Keys use the camelCase names of `gitkit-server-config.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub client_id: Option<String>,
    pub widget_url: Option<String>,
    pub cookie_name: Option<String>,
    pub service_account_email: Option<String>,
    pub service_account_private_key_file: Option<String>,
    /// When set, public certificates are fetched with this key instead of
    /// through the service account
    pub server_api_key: Option<String>,
    pub api_base: String,
    pub token_issuer: String,
    pub logging: LoggingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            widget_url: None,
            cookie_name: None,
            service_account_email: None,
            service_account_private_key_file: None,
            server_api_key: None,
            api_base: String::from(DEFAULT_API_BASE),
            token_issuer: String::from(DEFAULT_TOKEN_ISSUER),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load config for the CLI and other long-running callers.
    ///
    /// Loading order:
    /// 1. Parse `path` if it exists, else start from defaults
    /// 2. Apply GITKIT_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load(path: &Path) -> ConfigErrorResult<Self> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            debug!("Config file {} not found, using defaults", path.display());
            ClientConfig::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse a config file. `.toml` files are read as TOML, anything else as JSON.
    pub fn from_file(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            toml::from_str(&contents).map_err(|e| ConfigError::Toml {
                path: path.to_path_buf(),
                source: e,
            })
        } else {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                path: path.to_path_buf(),
                source: e,
            })
        }
    }

    /// Build config from an in-memory JSON map
    pub fn from_value(value: Value) -> ConfigErrorResult<Self> {
        serde_json::from_value(value).map_err(|source| ConfigError::Value { source })
    }

    /// Check the keys a client needs.
    ///
    /// The service-account keys are only required when the client will talk to
    /// Gitkit through its own authenticated transport.
    pub fn validate(&self, require_service_account: bool) -> ConfigErrorResult<()> {
        Self::require("clientId", &self.client_id)?;
        Self::require("widgetUrl", &self.widget_url)?;

        if require_service_account {
            Self::require("serviceAccountEmail", &self.service_account_email)?;
            Self::require(
                "serviceAccountPrivateKeyFile",
                &self.service_account_private_key_file,
            )?;
        }

        if self.api_base.is_empty() {
            return Err(ConfigError::missing("apiBase"));
        }

        Ok(())
    }

    /// Read the service account's private key file as raw bytes
    pub fn read_private_key(&self) -> ConfigErrorResult<Vec<u8>> {
        let path = self
            .service_account_private_key_file
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ConfigError::missing("serviceAccountPrivateKeyFile"))?;

        std::fs::read(path).map_err(|e| ConfigError::KeyFile {
            path: PathBuf::from(path),
            source: e,
        })
    }

    /// Name of the cookie holding the Gitkit token
    pub fn cookie_name(&self) -> &str {
        self.cookie_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_COOKIE_NAME)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  client: {}",
            self.client_id.as_deref().unwrap_or("<unset>")
        );
        info!(
            "  widget: {}",
            self.widget_url.as_deref().unwrap_or("<unset>")
        );
        info!("  cookie: {}", self.cookie_name());
        info!("  api: {} (issuer {})", self.api_base, self.token_issuer);
        info!(
            "  service account: {} (key file {})",
            self.service_account_email.as_deref().unwrap_or("<unset>"),
            if self.service_account_private_key_file.is_some() {
                "set"
            } else {
                "unset"
            }
        );
        info!(
            "  server api key: {}",
            if self.server_api_key.is_some() {
                "set"
            } else {
                "unset"
            }
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn require(key: &'static str, value: &Option<String>) -> ConfigErrorResult<()> {
        match value.as_deref() {
            Some(v) if !v.is_empty() => Ok(()),
            _ => Err(ConfigError::missing(key)),
        }
    }

    fn apply_env_overrides(&mut self) {
        // Client
        Self::apply_env_option_string("GITKIT_CLIENT_ID", &mut self.client_id);
        Self::apply_env_option_string("GITKIT_WIDGET_URL", &mut self.widget_url);
        Self::apply_env_option_string("GITKIT_COOKIE_NAME", &mut self.cookie_name);

        // Credentials
        Self::apply_env_option_string(
            "GITKIT_SERVICE_ACCOUNT_EMAIL",
            &mut self.service_account_email,
        );
        Self::apply_env_option_string(
            "GITKIT_SERVICE_ACCOUNT_KEY_FILE",
            &mut self.service_account_private_key_file,
        );
        Self::apply_env_option_string("GITKIT_SERVER_API_KEY", &mut self.server_api_key);

        // Endpoints
        Self::apply_env_string("GITKIT_API_BASE", &mut self.api_base);
        Self::apply_env_string("GITKIT_TOKEN_ISSUER", &mut self.token_issuer);

        // Logging
        Self::apply_env_parse("GITKIT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("GITKIT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("GITKIT_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
