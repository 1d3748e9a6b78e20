
use crate::{GitkitClient, GitkitRpc, HttpRequest, HttpTransport};

use gitkit_auth::{AuthError, GitkitClaims, Result as AuthResult, TokenVerifier};
use gitkit_config::ClientConfig;
use gitkit_core::{Account, DownloadPage, GitkitError, OobRequest, Result as GitkitResult};

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::panic::Location;
use std::rc::Rc;

use error_location::ErrorLocation;
use serde_json::{Map, Value, json};

pub(crate) const SERVICE_ACCOUNT_KEY_PEM: &str =
    include_str!("../../tests/fixtures/service_account_key.pem");
pub(crate) const VALID_TOKEN: &str = "valid-token";

// =========================================================================
// Fake RPC
// =========================================================================

/// Canned responses and recorded calls for [`FakeRpc`]
#[derive(Default)]
pub(crate) struct FakeState {
    pub pages: RefCell<VecDeque<GitkitResult<DownloadPage>>>,
    pub download_calls: RefCell<Vec<(Option<String>, u32)>>,
    pub oob_codes: RefCell<VecDeque<GitkitResult<String>>>,
    pub oob_requests: RefCell<Vec<OobRequest>>,
    pub certs: RefCell<Option<GitkitResult<HashMap<String, String>>>>,
    pub users: RefCell<Vec<Map<String, Value>>>,
    pub updated: RefCell<Vec<Account>>,
    pub deleted: RefCell<Vec<String>>,
    pub uploads: RefCell<Vec<(String, Vec<u8>, Vec<Account>, Option<u32>, Option<u32>)>>,
}

impl FakeState {
    pub(crate) fn push_page(&self, users: Value, next_page_token: Option<&str>) {
        let mut response = json!({ "users": users });
        if let Some(token) = next_page_token {
            response["nextPageToken"] = json!(token);
        }
        self.pages
            .borrow_mut()
            .push_back(DownloadPage::from_response(response));
    }

    pub(crate) fn add_user(&self, user: Value) {
        if let Value::Object(user) = user {
            self.users.borrow_mut().push(user);
        }
    }

    fn find_user(&self, key: &str, value: &str) -> GitkitResult<Map<String, Value>> {
        self.users
            .borrow()
            .iter()
            .find(|user| user.get(key).and_then(Value::as_str) == Some(value))
            .cloned()
            .ok_or_else(|| GitkitError::client("user not found"))
    }
}

pub(crate) struct FakeRpc {
    pub state: Rc<FakeState>,
}

impl GitkitRpc for FakeRpc {
    fn get_account_info_by_email(&self, email: &str) -> GitkitResult<Map<String, Value>> {
        self.state.find_user("email", email)
    }

    fn get_account_info_by_id(&self, user_id: &str) -> GitkitResult<Map<String, Value>> {
        self.state.find_user("localId", user_id)
    }

    fn update_account(&self, account: &Account) -> GitkitResult<Value> {
        self.state.updated.borrow_mut().push(account.clone());
        Ok(json!({ "localId": account.user_id }))
    }

    fn delete_account(&self, user_id: &str) -> GitkitResult<Value> {
        self.state.deleted.borrow_mut().push(user_id.to_string());
        Ok(json!({ "kind": "identitytoolkit#DeleteAccountResponse" }))
    }

    fn upload_account(
        &self,
        hash_algorithm: &str,
        hash_key: &[u8],
        accounts: &[Account],
        rounds: Option<u32>,
        memory_cost: Option<u32>,
    ) -> GitkitResult<()> {
        self.state.uploads.borrow_mut().push((
            hash_algorithm.to_string(),
            hash_key.to_vec(),
            accounts.to_vec(),
            rounds,
            memory_cost,
        ));
        Ok(())
    }

    fn download_account(
        &self,
        page_token: Option<&str>,
        max_results: u32,
    ) -> GitkitResult<DownloadPage> {
        self.state
            .download_calls
            .borrow_mut()
            .push((page_token.map(String::from), max_results));
        self.state
            .pages
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(DownloadPage::default()))
    }

    fn get_oob_code(&self, request: &OobRequest) -> GitkitResult<String> {
        self.state.oob_requests.borrow_mut().push(request.clone());
        self.state
            .oob_codes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok("oob-code".to_string()))
    }

    fn get_gitkit_certs(&self) -> GitkitResult<HashMap<String, String>> {
        self.state
            .certs
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Ok(HashMap::from([("kid".to_string(), "cert".to_string())])))
    }
}

// =========================================================================
// Fake token verifier
// =========================================================================

/// Audience, issuer, max age and cert count of each verify call
pub(crate) type VerifyCalls = Rc<RefCell<Vec<(String, String, i64, usize)>>>;

/// Accepts only [`VALID_TOKEN`], returning fixed claims
pub(crate) struct FakeVerifier {
    pub calls: VerifyCalls,
}

impl TokenVerifier for FakeVerifier {
    fn verify(
        &self,
        token: &str,
        certs: &HashMap<String, String>,
        audience: &str,
        issuer: &str,
        max_age_secs: i64,
    ) -> AuthResult<GitkitClaims> {
        self.calls.borrow_mut().push((
            audience.to_string(),
            issuer.to_string(),
            max_age_secs,
            certs.len(),
        ));

        if token != VALID_TOKEN {
            return Err(AuthError::InvalidToken {
                message: "bad signature".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(GitkitClaims {
            user_id: "1234".to_string(),
            email: Some("1234@example.com".to_string()),
            provider_id: Some("google.com".to_string()),
            verified: Some(true),
            display_name: Some("Token Name".to_string()),
            photo_url: None,
            exp: 0,
            iat: 0,
        })
    }
}

pub(crate) fn test_config() -> ClientConfig {
    ClientConfig::from_value(json!({
        "clientId": "924226504183.apps.googleusercontent.com",
        "widgetUrl": "http://example.com/widget",
        "cookieName": "gtoken"
    }))
    .unwrap()
}

/// Client over a fresh [`FakeRpc`] and [`FakeVerifier`]
pub(crate) fn fake_client() -> (GitkitClient, Rc<FakeState>, VerifyCalls) {
    let state = Rc::new(FakeState::default());
    let calls = VerifyCalls::default();
    let rpc = FakeRpc {
        state: Rc::clone(&state),
    };

    let client = GitkitClient::from_config_with_rpc(test_config(), Some(Box::new(rpc)))
        .unwrap()
        .with_token_verifier(Box::new(FakeVerifier {
            calls: Rc::clone(&calls),
        }));

    (client, state, calls)
}

// =========================================================================
// Recording transport
// =========================================================================

/// Returns canned bodies in order and records every request
#[derive(Default)]
pub(crate) struct RecordingTransport {
    pub requests: RefCell<Vec<HttpRequest>>,
    pub cert_urls: RefCell<Vec<String>>,
    pub responses: RefCell<VecDeque<String>>,
}

impl RecordingTransport {
    pub(crate) fn responding(bodies: &[Value]) -> Self {
        let transport = Self::default();
        transport
            .responses
            .borrow_mut()
            .extend(bodies.iter().map(Value::to_string));
        transport
    }

    pub(crate) fn responding_raw(body: &str) -> Self {
        let transport = Self::default();
        transport.responses.borrow_mut().push_back(body.to_string());
        transport
    }

    /// JSON body of the request at `index`
    pub(crate) fn body(&self, index: usize) -> Value {
        let requests = self.requests.borrow();
        serde_json::from_str(requests[index].body.as_deref().unwrap()).unwrap()
    }

    fn next_response(&self) -> String {
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| "{}".to_string())
    }
}

impl HttpTransport for &RecordingTransport {
    fn authenticated_request(&self, request: HttpRequest) -> GitkitResult<String> {
        self.requests.borrow_mut().push(request);
        Ok(self.next_response())
    }

    fn retrieve_certs(&self, url: &str) -> GitkitResult<String> {
        self.cert_urls.borrow_mut().push(url.to_string());
        Ok(self.next_response())
    }
}

/// Shared handle, for handing a recording gateway to a [`GitkitClient`]
impl HttpTransport for Rc<RecordingTransport> {
    fn authenticated_request(&self, request: HttpRequest) -> GitkitResult<String> {
        (&**self).authenticated_request(request)
    }

    fn retrieve_certs(&self, url: &str) -> GitkitResult<String> {
        (&**self).retrieve_certs(url)
    }
}
