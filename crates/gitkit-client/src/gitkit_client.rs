use crate::download_iterator::DownloadIterator;
use crate::rpc::{GitkitRpc, RpcGateway};

use gitkit_auth::{JwtTokenVerifier, TokenVerifier};
use gitkit_config::{ClientConfig, ConfigError, DEFAULT_MAX_RESULTS, TOKEN_MAX_AGE_SECS};
use gitkit_core::{
    Account, GitkitError, OobAction, OobRequest, OobResult, Result as GitkitResult,
};

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info, warn};
use serde_json::Value;
use url::Url;

/// Fields posted by the Gitkit widget for out-of-band actions
/// (`action`, `email`, `response`, `oldEmail`, `newEmail`)
pub type OobParams = HashMap<String, String>;

/// Surface a configuration problem as a caller-fixable error
#[track_caller]
pub(crate) fn config_error(error: ConfigError) -> GitkitError {
    GitkitError::client(error.message())
}

/// Gitkit client for a relying-party web server
pub struct GitkitClient {
    client_id: String,
    widget_url: String,
    cookie_name: String,
    token_issuer: String,
    rpc: Box<dyn GitkitRpc>,
    verifier: Box<dyn TokenVerifier>,
}

impl GitkitClient {
    /// Create a client from a `gitkit-server-config.json` style file
    pub fn from_file(path: &Path) -> GitkitResult<Self> {
        let config = ClientConfig::from_file(path).map_err(config_error)?;
        Self::from_config(config)
    }

    /// Create a client talking to Gitkit with the configured service account
    pub fn from_config(config: ClientConfig) -> GitkitResult<Self> {
        Self::from_config_with_rpc(config, None)
    }

    /// Create a client, optionally with a caller-supplied RPC implementation.
    ///
    /// Without `rpc` the service account email and private key file must be
    /// configured; the key file is read immediately.
    pub fn from_config_with_rpc(
        config: ClientConfig,
        rpc: Option<Box<dyn GitkitRpc>>,
    ) -> GitkitResult<Self> {
        config.validate(rpc.is_none()).map_err(config_error)?;

        let rpc = match rpc {
            Some(rpc) => rpc,
            None => Box::new(RpcGateway::from_config(&config)?),
        };

        let cookie_name = config.cookie_name().to_string();
        let ClientConfig {
            client_id,
            widget_url,
            token_issuer,
            ..
        } = config;

        info!(
            "Gitkit client created for {}",
            client_id.as_deref().unwrap_or_default()
        );

        Ok(Self {
            client_id: client_id.unwrap_or_default(),
            widget_url: widget_url.unwrap_or_default(),
            cookie_name,
            token_issuer,
            rpc,
            verifier: Box::new(JwtTokenVerifier::default()),
        })
    }

    /// Replace the token verifier
    pub fn with_token_verifier(mut self, verifier: Box<dyn TokenVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn widget_url(&self) -> &str {
        &self.widget_url
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    // =========================================================================
    // Token validation
    // =========================================================================

    /// Validate a Gitkit token. The account is built from the token alone.
    ///
    /// Returns `None` for an absent or invalid token. Client errors while
    /// fetching the signing certificates also yield `None`; server errors are
    /// returned.
    pub fn validate_token(&self, token: Option<&str>) -> GitkitResult<Option<Account>> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let certs = match self.rpc.get_gitkit_certs() {
            Ok(certs) => certs,
            Err(e) if e.is_client_error() => {
                warn!("Could not fetch Gitkit certificates: {}", e.message());
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match self.verifier.verify(
            token,
            &certs,
            &self.client_id,
            &self.token_issuer,
            TOKEN_MAX_AGE_SECS,
        ) {
            Ok(claims) => Ok(Some(claims.into_account())),
            Err(e) => {
                debug!("Token rejected: {e}");
                Ok(None)
            }
        }
    }

    /// Extract the Gitkit token from a raw `Cookie` request header
    pub fn token_from_cookie_header(&self, cookie_header: &str) -> Option<String> {
        cookie_header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| name.trim() == self.cookie_name)
            .map(|(_, value)| value.trim().trim_matches('"').to_string())
            .filter(|value| !value.is_empty())
    }

    /// Validate the token carried in a request's `Cookie` header
    pub fn validate_token_in_request(
        &self,
        cookie_header: Option<&str>,
    ) -> GitkitResult<Option<Account>> {
        let token = cookie_header.and_then(|header| self.token_from_cookie_header(header));
        self.validate_token(token.as_deref())
    }

    /// Validate `token` and load the full account from Gitkit.
    ///
    /// The returned account carries the provider id of the session token.
    pub fn get_user_in_request(&self, token: Option<&str>) -> GitkitResult<Option<Account>> {
        let Some(token_user) = self.validate_token(token)? else {
            return Ok(None);
        };
        let Some(user_id) = token_user.user_id.as_deref() else {
            return Ok(None);
        };

        let mut account = self.get_user_by_id(user_id)?;
        account.provider_id = token_user.provider_id;

        Ok(Some(account))
    }

    // =========================================================================
    // Account operations
    // =========================================================================

    pub fn get_user_by_email(&self, email: &str) -> GitkitResult<Account> {
        let user = self.rpc.get_account_info_by_email(email)?;
        Ok(Account::from_response(&user))
    }

    pub fn get_user_by_id(&self, user_id: &str) -> GitkitResult<Account> {
        let user = self.rpc.get_account_info_by_id(user_id)?;
        Ok(Account::from_response(&user))
    }

    /// Replace the account's email, display name, verification state and photo
    pub fn update_user(&self, account: &Account) -> GitkitResult<Value> {
        self.rpc.update_account(account)
    }

    pub fn delete_user(&self, user_id: &str) -> GitkitResult<Value> {
        self.rpc.delete_account(user_id)
    }

    /// Upload accounts whose password hashes were computed by `hash_algorithm`
    pub fn upload_users(
        &self,
        hash_algorithm: &str,
        hash_key: &[u8],
        accounts: &[Account],
        rounds: Option<u32>,
        memory_cost: Option<u32>,
    ) -> GitkitResult<()> {
        self.rpc
            .upload_account(hash_algorithm, hash_key, accounts, rounds, memory_cost)
    }

    /// Iterate over every account, `max_results` (default 10) per request
    pub fn get_all_users(
        &self,
        max_results: Option<u32>,
    ) -> GitkitResult<DownloadIterator<'_>> {
        DownloadIterator::new(
            self.rpc.as_ref(),
            max_results.unwrap_or(DEFAULT_MAX_RESULTS),
        )
    }

    // =========================================================================
    // Out-of-band actions
    // =========================================================================

    /// Handle a widget request for a password reset or email change link.
    ///
    /// Client errors become a failure result carrying the message; server
    /// errors are returned.
    pub fn get_oob_results(
        &self,
        params: &OobParams,
        user_ip: Option<&str>,
        token: Option<&str>,
    ) -> GitkitResult<OobResult> {
        let param = |key: &str| params.get(key).cloned();
        let user_ip = user_ip.map(String::from);

        let result = match params.get("action").map(|a| OobAction::from_str(a)) {
            Some(Ok(OobAction::ResetPassword)) => {
                let request =
                    OobRequest::password_reset(param("email"), user_ip, param("response"));
                self.build_oob_link(&request, OobAction::ResetPassword)
                    .map(|oob_link| OobResult::ResetPassword {
                        email: param("email"),
                        oob_link,
                    })
            }
            Some(Ok(OobAction::ChangeEmail)) => {
                let Some(token) = token.filter(|t| !t.is_empty()) else {
                    return Ok(OobResult::failure("login is required"));
                };
                let request = OobRequest::change_email(
                    param("oldEmail"),
                    param("newEmail"),
                    user_ip,
                    token.to_string(),
                );
                self.build_oob_link(&request, OobAction::ChangeEmail)
                    .map(|oob_link| OobResult::ChangeEmail {
                        old_email: param("oldEmail"),
                        new_email: param("newEmail"),
                        oob_link,
                    })
            }
            _ => return Ok(OobResult::failure("unknown action type")),
        };

        match result {
            Ok(result) => Ok(result),
            Err(e) if e.is_client_error() => Ok(OobResult::failure(e.message())),
            Err(e) => Err(e),
        }
    }

    /// Link that confirms ownership of `email` when followed
    pub fn get_email_verification_link(&self, email: &str) -> GitkitResult<String> {
        let request = OobRequest::verify_email(email.to_string());
        self.build_oob_link(&request, OobAction::VerifyEmail)
    }

    fn build_oob_link(&self, request: &OobRequest, action: OobAction) -> GitkitResult<String> {
        let code = self.rpc.get_oob_code(request)?;
        Ok(oob_link(&self.widget_url, action, &code))
    }
}

/// Append `mode` and `oobCode` to the widget URL
pub(crate) fn oob_link(widget_url: &str, action: OobAction, code: &str) -> String {
    let has_query = match Url::parse(widget_url) {
        Ok(url) => url.query().is_some_and(|q| !q.is_empty()),
        Err(_) => widget_url
            .split_once('?')
            .is_some_and(|(_, query)| !query.is_empty()),
    };
    let separator = if has_query { '&' } else { '?' };

    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("mode", action.as_str())
        .append_pair("oobCode", code)
        .finish();

    format!("{widget_url}{separator}{query}")
}
