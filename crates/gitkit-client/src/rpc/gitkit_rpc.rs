use gitkit_core::{Account, DownloadPage, OobRequest, Result as GitkitResult};

use std::collections::HashMap;

use serde_json::{Map, Value};

/// The Gitkit relying-party RPCs used by [`crate::GitkitClient`]
pub trait GitkitRpc {
    /// `getAccountInfo` by email. Fails with a client error when no user matches.
    fn get_account_info_by_email(&self, email: &str) -> GitkitResult<Map<String, Value>>;

    /// `getAccountInfo` by user id. Fails with a client error when no user matches.
    fn get_account_info_by_id(&self, user_id: &str) -> GitkitResult<Map<String, Value>>;

    /// `setAccountInfo`, replacing email, display name, verification state and photo
    fn update_account(&self, account: &Account) -> GitkitResult<Value>;

    fn delete_account(&self, user_id: &str) -> GitkitResult<Value>;

    /// `uploadAccount` with password hashes computed by `hash_algorithm` keyed
    /// with the raw `hash_key`
    fn upload_account(
        &self,
        hash_algorithm: &str,
        hash_key: &[u8],
        accounts: &[Account],
        rounds: Option<u32>,
        memory_cost: Option<u32>,
    ) -> GitkitResult<()>;

    fn download_account(
        &self,
        page_token: Option<&str>,
        max_results: u32,
    ) -> GitkitResult<DownloadPage>;

    /// `getOobConfirmationCode`, returning the code
    fn get_oob_code(&self, request: &OobRequest) -> GitkitResult<String>;

    /// Token-signing certificates keyed by key id
    fn get_gitkit_certs(&self) -> GitkitResult<HashMap<String, String>>;
}
