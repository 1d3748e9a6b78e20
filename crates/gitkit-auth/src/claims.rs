use crate::{AuthError, Result as AuthErrorResult};

use gitkit_core::Account;

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Claims carried by a Gitkit identity token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitkitClaims {
    /// Gitkit user id
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Identity provider used to sign in (e.g. google.com)
    #[serde(default)]
    pub provider_id: Option<String>,
    /// Whether the email has been verified
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
}

impl GitkitClaims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.user_id.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "user_id".to_string(),
                message: "user_id cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Check the token's lifetime window against `now`.
    ///
    /// Rejects tokens issued in the future, tokens whose expiry lies more than
    /// `max_age_secs` ahead, and tokens issued more than `max_age_secs` ago.
    #[track_caller]
    pub fn check_age(&self, now: i64, max_age_secs: i64, leeway: i64) -> AuthErrorResult<()> {
        if self.iat > now + leeway {
            return Err(AuthError::InvalidClaim {
                claim: "iat".to_string(),
                message: "token used too early".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.exp >= now + max_age_secs {
            return Err(AuthError::InvalidClaim {
                claim: "exp".to_string(),
                message: "expiration time too far in future".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if now - self.iat > max_age_secs {
            return Err(AuthError::TokenTooOld {
                max_age_secs,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// The account described by this token
    pub fn into_account(self) -> Account {
        let mut account = Account::default();
        account.user_id = Some(self.user_id);
        account.email = self.email;
        account.provider_id = self.provider_id;
        account.email_verified = self.verified;
        account.display_name = self.display_name;
        account.photo_url = self.photo_url;
        account
    }
}
