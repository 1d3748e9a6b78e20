use crate::error::{CliError, Result as CliResult};

use gitkit_core::Account;

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// One entry of an upload file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadEntry {
    local_id: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    email_verified: Option<bool>,
    password_hash: String,
    salt: String,
}

/// Decode URL-safe base64, with or without padding
#[track_caller]
pub(crate) fn decode_base64url(field: &str, value: &str) -> CliResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(value.trim_end_matches('='))
        .map_err(|e| CliError::input(format!("{field} is not URL-safe base64: {e}")))
}

/// Parse accounts to upload from JSON text
pub(crate) fn parse_accounts(contents: &str) -> CliResult<Vec<Account>> {
    let entries: Vec<UploadEntry> = serde_json::from_str(contents)?;

    entries
        .into_iter()
        .map(|entry| {
            let password_hash = decode_base64url("passwordHash", &entry.password_hash)?;
            let salt = decode_base64url("salt", &entry.salt)?;

            let mut account =
                Account::new(entry.local_id, entry.email).with_password(password_hash, salt);
            account.display_name = entry.display_name;
            account.email_verified = entry.email_verified;
            Ok(account)
        })
        .collect()
}

pub(crate) fn load_accounts(path: &Path) -> CliResult<Vec<Account>> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_accounts(&contents)
}
