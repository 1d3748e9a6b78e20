use crate::{GitkitError, Result as GitkitResult};

use serde::Deserialize;
use serde_json::{Map, Value};

/// One page of a `downloadAccount` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadPage {
    /// Raw user entries; `None` when the response carried no `users` key
    #[serde(default)]
    pub users: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl DownloadPage {
    #[track_caller]
    pub fn from_response(response: Value) -> GitkitResult<Self> {
        serde_json::from_value(response).map_err(GitkitError::from_json)
    }

    /// Continuation token for the next page. An empty token counts as absent.
    pub fn continuation_token(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    /// Consume the page, returning its user entries (empty if absent)
    pub fn into_users(self) -> Vec<Map<String, Value>> {
        self.users.unwrap_or_default()
    }
}
