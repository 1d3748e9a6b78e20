//! Account entity - one user identity record known to Gitkit.

use crate::ProviderUserInfo;

use serde::Serialize;
use serde_json::{Map, Value};

/// A Gitkit user account.
///
/// Accounts come from two places: caller code building records for upload,
/// and server responses on the read paths. Every field is optional so that a
/// partial response never fails to load; upload-time completeness is checked
/// by the server, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "localId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// `None` means the verification state is unknown, not unverified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(skip)]
    pub password_hash: Option<Vec<u8>>,
    #[serde(skip)]
    pub salt: Option<Vec<u8>>,
    /// Identity provider of the session token this account was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(rename = "providerUserInfo", skip_serializing_if = "Vec::is_empty")]
    provider_info: Vec<ProviderUserInfo>,
}

impl Account {
    /// Create an account with an id and email
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Attach password hash material for upload
    pub fn with_password(mut self, password_hash: Vec<u8>, salt: Vec<u8>) -> Self {
        self.password_hash = Some(password_hash);
        self.salt = Some(salt);
        self
    }

    /// Build an account from a `getAccountInfo` / `downloadAccount` user entry.
    ///
    /// Absent fields and fields of an unexpected type are left unset. The id
    /// is read from `localId`, falling back to `user_id`.
    pub fn from_response(response: &Map<String, Value>) -> Self {
        let text = |key: &str| {
            response
                .get(key)
                .and_then(Value::as_str)
                .map(String::from)
        };

        let provider_info = response
            .get("providerUserInfo")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            user_id: text("localId").or_else(|| text("user_id")),
            email: text("email"),
            display_name: text("displayName"),
            photo_url: text("photoUrl"),
            email_verified: response.get("emailVerified").and_then(Value::as_bool),
            password_hash: None,
            salt: None,
            provider_id: None,
            provider_info,
        }
    }

    /// Provider linkages reported by the server (read-only)
    pub fn provider_info(&self) -> &[ProviderUserInfo] {
        &self.provider_info
    }
}
