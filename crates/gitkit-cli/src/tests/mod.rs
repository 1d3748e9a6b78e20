
use gitkit_client::{GitkitClient, GitkitRpc};
use gitkit_config::ClientConfig;
use gitkit_core::{Account, DownloadPage, GitkitError, OobRequest, Result as GitkitResult};

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{Map, Value, json};

/// Calls recorded by [`StubRpc`]
#[derive(Default)]
pub(crate) struct Recorded {
    pub updated: RefCell<Vec<Account>>,
    pub uploads: RefCell<Vec<(String, Vec<u8>, usize)>>,
    pub oob_requests: RefCell<Vec<OobRequest>>,
}

/// In-memory Gitkit holding a fixed set of users
pub(crate) struct StubRpc {
    users: Vec<Map<String, Value>>,
    recorded: Rc<Recorded>,
}

impl StubRpc {
    fn find(&self, key: &str, value: &str) -> GitkitResult<Map<String, Value>> {
        self.users
            .iter()
            .find(|user| user.get(key).and_then(Value::as_str) == Some(value))
            .cloned()
            .ok_or_else(|| GitkitError::client("user not found"))
    }
}

impl GitkitRpc for StubRpc {
    fn get_account_info_by_email(&self, email: &str) -> GitkitResult<Map<String, Value>> {
        self.find("email", email)
    }

    fn get_account_info_by_id(&self, user_id: &str) -> GitkitResult<Map<String, Value>> {
        self.find("localId", user_id)
    }

    fn update_account(&self, account: &Account) -> GitkitResult<Value> {
        self.recorded.updated.borrow_mut().push(account.clone());
        Ok(json!({ "kind": "identitytoolkit#SetAccountInfoResponse" }))
    }

    fn delete_account(&self, _user_id: &str) -> GitkitResult<Value> {
        Ok(json!({ "kind": "identitytoolkit#DeleteAccountResponse" }))
    }

    fn upload_account(
        &self,
        hash_algorithm: &str,
        hash_key: &[u8],
        accounts: &[Account],
        _rounds: Option<u32>,
        _memory_cost: Option<u32>,
    ) -> GitkitResult<()> {
        self.recorded.uploads.borrow_mut().push((
            hash_algorithm.to_string(),
            hash_key.to_vec(),
            accounts.len(),
        ));
        Ok(())
    }

    fn download_account(
        &self,
        page_token: Option<&str>,
        _max_results: u32,
    ) -> GitkitResult<DownloadPage> {
        // Every user on the first page, nothing after
        let response = match page_token {
            None => json!({ "users": self.users, "nextPageToken": "end" }),
            Some(_) => json!({}),
        };
        DownloadPage::from_response(response)
    }

    fn get_oob_code(&self, request: &OobRequest) -> GitkitResult<String> {
        self.recorded.oob_requests.borrow_mut().push(request.clone());
        Ok(String::from("oob-code"))
    }

    fn get_gitkit_certs(&self) -> GitkitResult<HashMap<String, String>> {
        Err(GitkitError::client("no certificates"))
    }
}

pub(crate) fn stub_user(id: &str, email: &str) -> Map<String, Value> {
    match json!({ "localId": id, "email": email, "displayName": "Stub User" }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

pub(crate) fn stub_client(users: Vec<Map<String, Value>>) -> (GitkitClient, Rc<Recorded>) {
    let recorded = Rc::new(Recorded::default());
    let rpc = StubRpc {
        users,
        recorded: Rc::clone(&recorded),
    };
    let config = ClientConfig::from_value(json!({
        "clientId": "924226504183.apps.googleusercontent.com",
        "widgetUrl": "http://localhost:8000/widget"
    }))
    .unwrap();

    let client = GitkitClient::from_config_with_rpc(config, Some(Box::new(rpc))).unwrap();
    (client, recorded)
}
