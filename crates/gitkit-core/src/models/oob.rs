//! Out-of-band confirmation types: widget actions, code requests, and the
//! result handed back to the Gitkit widget.

use crate::{GitkitError, Result as GitkitResult};

use std::str::FromStr;

use serde::Serialize;
use serde_json::{Value, json};

/// Action requested by the Gitkit widget; also the `mode` of the oob link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OobAction {
    ResetPassword,
    ChangeEmail,
    VerifyEmail,
}

impl OobAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResetPassword => "resetPassword",
            Self::ChangeEmail => "changeEmail",
            Self::VerifyEmail => "verifyEmail",
        }
    }
}

impl FromStr for OobAction {
    type Err = GitkitError;

    #[track_caller]
    fn from_str(s: &str) -> GitkitResult<Self> {
        match s {
            "resetPassword" => Ok(Self::ResetPassword),
            "changeEmail" => Ok(Self::ChangeEmail),
            "verifyEmail" => Ok(Self::VerifyEmail),
            _ => Err(GitkitError::client("unknown action type")),
        }
    }
}

impl std::fmt::Display for OobAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `requestType` of a getOobConfirmationCode call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OobRequestType {
    PasswordReset,
    NewEmailAccept,
    VerifyEmail,
}

/// Body of a getOobConfirmationCode call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OobRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha_resp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    pub request_type: OobRequestType,
}

impl OobRequest {
    pub fn password_reset(
        email: Option<String>,
        user_ip: Option<String>,
        captcha_resp: Option<String>,
    ) -> Self {
        Self {
            email,
            new_email: None,
            user_ip,
            captcha_resp,
            id_token: None,
            request_type: OobRequestType::PasswordReset,
        }
    }

    pub fn change_email(
        old_email: Option<String>,
        new_email: Option<String>,
        user_ip: Option<String>,
        id_token: String,
    ) -> Self {
        Self {
            email: old_email,
            new_email,
            user_ip,
            captcha_resp: None,
            id_token: Some(id_token),
            request_type: OobRequestType::NewEmailAccept,
        }
    }

    pub fn verify_email(email: String) -> Self {
        Self {
            email: Some(email),
            new_email: None,
            user_ip: None,
            captcha_resp: None,
            id_token: None,
            request_type: OobRequestType::VerifyEmail,
        }
    }
}

/// Outcome of an out-of-band request, ready to be sent back to the widget
#[derive(Debug, Clone, PartialEq)]
pub enum OobResult {
    ResetPassword {
        email: Option<String>,
        oob_link: String,
    },
    ChangeEmail {
        old_email: Option<String>,
        new_email: Option<String>,
        oob_link: String,
    },
    Failure {
        error: String,
    },
}

impl OobResult {
    pub fn failure<S: Into<String>>(error: S) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failure { .. })
    }

    /// `RESET_PASSWORD` / `CHANGE_EMAIL`; `None` for failures
    pub fn action(&self) -> Option<&'static str> {
        match self {
            Self::ResetPassword { .. } => Some("RESET_PASSWORD"),
            Self::ChangeEmail { .. } => Some("CHANGE_EMAIL"),
            Self::Failure { .. } => None,
        }
    }

    pub fn oob_link(&self) -> Option<&str> {
        match self {
            Self::ResetPassword { oob_link, .. } | Self::ChangeEmail { oob_link, .. } => {
                Some(oob_link)
            }
            Self::Failure { .. } => None,
        }
    }

    /// HTTP response body the widget expects
    pub fn response_body(&self) -> Value {
        match self {
            Self::Failure { error } => json!({ "error": error }),
            _ => json!({ "success": true }),
        }
    }

    /// The full result map
    pub fn to_json(&self) -> Value {
        match self {
            Self::ResetPassword { email, oob_link } => json!({
                "email": email,
                "oobLink": oob_link,
                "action": self.action(),
                "response_body": self.response_body(),
            }),
            Self::ChangeEmail {
                old_email,
                new_email,
                oob_link,
            } => json!({
                "oldEmail": old_email,
                "newEmail": new_email,
                "oobLink": oob_link,
                "action": self.action(),
                "response_body": self.response_body(),
            }),
            Self::Failure { .. } => json!({ "response_body": self.response_body() }),
        }
    }
}
