use crate::transport::{HttpRequest, HttpTransport, ServiceAccountCredentials};

use gitkit_config::DEFAULT_TOKEN_URI;
use gitkit_core::{GitkitError, Result as GitkitResult};

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use log::debug;
use reqwest::blocking::{Client as ReqwestClient, RequestBuilder};
use serde::Deserialize;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Refresh the access token this long before it actually expires
const EXPIRY_MARGIN_SECS: i64 = 60;
/// Lifetime assumed when the token response omits `expires_in`
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .checked_sub_signed(TimeDelta::seconds(EXPIRY_MARGIN_SECS))
            .is_some_and(|refresh_at| now < refresh_at)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Blocking HTTP transport authenticating as a Google service account
pub struct ReqwestTransport {
    client: ReqwestClient,
    credentials: Option<ServiceAccountCredentials>,
    token_uri: String,
    access_token: Mutex<Option<AccessToken>>,
}

impl ReqwestTransport {
    /// Create a transport. Without credentials only `retrieve_certs` works.
    #[track_caller]
    pub fn new(
        credentials: Option<ServiceAccountCredentials>,
        timeout: Duration,
    ) -> GitkitResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GitkitError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
            token_uri: String::from(DEFAULT_TOKEN_URI),
            access_token: Mutex::new(None),
        })
    }

    /// Override the OAuth2 token endpoint
    pub fn with_token_uri(mut self, token_uri: impl Into<String>) -> Self {
        self.token_uri = token_uri.into();
        self
    }

    /// Execute request and return the body text
    fn execute(req: RequestBuilder) -> GitkitResult<String> {
        let response = req
            .send()
            .map_err(|e| GitkitError::transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| GitkitError::transport(e.to_string()))?;

        debug!("HTTP {status}, {} bytes", body.len());
        Ok(body)
    }

    /// Current access token, exchanging a fresh assertion when needed
    fn access_token(&self) -> GitkitResult<String> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            GitkitError::client("Service account credentials are not configured")
        })?;

        let mut cached = self
            .access_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = Utc::now();

        if let Some(token) = cached.as_ref()
            && token.is_fresh(now)
        {
            return Ok(token.value.clone());
        }

        debug!(
            "Requesting access token for {} from {}",
            credentials.email(),
            self.token_uri
        );
        let assertion = credentials.assertion(&self.token_uri, now.timestamp())?;
        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", JWT_BEARER_GRANT)
            .append_pair("assertion", &assertion)
            .finish();

        let req = self
            .client
            .post(&self.token_uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(form);
        let body = Self::execute(req)?;
        let response: TokenResponse = serde_json::from_str(&body)?;

        let Some(value) = response.access_token else {
            return Err(GitkitError::transport(format!(
                "OAuth2 token exchange failed: {} {}",
                response.error.unwrap_or_default(),
                response.error_description.unwrap_or_default()
            )));
        };

        let expires_in = response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        let expires_at = TimeDelta::try_seconds(expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                GitkitError::transport(format!(
                    "OAuth2 token exchange returned invalid expires_in: {expires_in}"
                ))
            })?;

        let token = AccessToken { value, expires_at };
        let value = token.value.clone();
        *cached = Some(token);

        Ok(value)
    }
}

impl HttpTransport for ReqwestTransport {
    fn authenticated_request(&self, request: HttpRequest) -> GitkitResult<String> {
        let access_token = self.access_token()?;

        let mut req = self
            .client
            .request(request.method, &request.url)
            .bearer_auth(access_token);
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }

        Self::execute(req)
    }

    fn retrieve_certs(&self, url: &str) -> GitkitResult<String> {
        Self::execute(self.client.get(url))
    }
}
