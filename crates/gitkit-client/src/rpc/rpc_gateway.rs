use crate::gitkit_client::config_error;
use crate::rpc::{GitkitRpc, check_gitkit_error};
use crate::transport::{
    DEFAULT_TIMEOUT, HttpRequest, HttpTransport, ReqwestTransport, ServiceAccountCredentials,
};

use gitkit_config::{ClientConfig, ConfigError};
use gitkit_core::{Account, DownloadPage, GitkitError, OobRequest, Result as GitkitResult};

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// [`GitkitRpc`] over an authenticated HTTP transport
pub struct RpcGateway<T: HttpTransport> {
    transport: T,
    api_base: String,
    server_api_key: Option<String>,
}

impl RpcGateway<ReqwestTransport> {
    /// Gateway authenticating with the service account named in `config`
    #[track_caller]
    pub fn from_config(config: &ClientConfig) -> GitkitResult<Self> {
        let email = config
            .service_account_email
            .as_deref()
            .filter(|email| !email.is_empty())
            .ok_or_else(|| config_error(ConfigError::missing("serviceAccountEmail")))?;
        let key = config.read_private_key().map_err(config_error)?;

        let credentials = ServiceAccountCredentials::from_key_bytes(email, &key)?;
        let transport = ReqwestTransport::new(Some(credentials), DEFAULT_TIMEOUT)?;

        Ok(Self::new(
            transport,
            &config.api_base,
            config.server_api_key.clone(),
        ))
    }
}

impl<T: HttpTransport> RpcGateway<T> {
    pub fn new(transport: T, api_base: &str, server_api_key: Option<String>) -> Self {
        Self {
            transport,
            api_base: api_base.to_string(),
            server_api_key: server_api_key.filter(|key| !key.is_empty()),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// POST `params` to `{api_base}{method}` and classify the response
    pub fn invoke<P: Serialize>(&self, method: &str, params: &P) -> GitkitResult<Value> {
        let url = format!("{}{}", self.api_base, method);
        debug!("Gitkit RPC {method}");

        let request = HttpRequest::post(url, serde_json::to_string(params)?)
            .with_header("content-type", JSON_CONTENT_TYPE);
        let body = self.transport.authenticated_request(request)?;
        let response: Value = serde_json::from_str(&body)?;

        check_gitkit_error(response)
    }

    #[track_caller]
    fn first_user(response: Value) -> GitkitResult<Map<String, Value>> {
        match response {
            Value::Object(mut body) => match body.remove("users") {
                Some(Value::Array(users)) => match users.into_iter().next() {
                    Some(Value::Object(user)) => Ok(user),
                    _ => Err(GitkitError::client("user not found")),
                },
                _ => Err(GitkitError::client("user not found")),
            },
            _ => Err(GitkitError::client("user not found")),
        }
    }

    fn certs_url(&self) -> GitkitResult<String> {
        let base = format!("{}publicKeys", self.api_base);
        match &self.server_api_key {
            Some(key) => {
                let mut url = Url::parse(&base)
                    .map_err(|e| GitkitError::client(format!("Invalid API base {base}: {e}")))?;
                url.query_pairs_mut().append_pair("key", key);
                Ok(url.into())
            }
            None => Ok(base),
        }
    }
}

impl<T: HttpTransport> GitkitRpc for RpcGateway<T> {
    fn get_account_info_by_email(&self, email: &str) -> GitkitResult<Map<String, Value>> {
        #[derive(Serialize)]
        struct GetAccountInfoRequest<'a> {
            email: [&'a str; 1],
        }

        let response = self.invoke(
            "getAccountInfo",
            &GetAccountInfoRequest { email: [email] },
        )?;
        Self::first_user(response)
    }

    fn get_account_info_by_id(&self, user_id: &str) -> GitkitResult<Map<String, Value>> {
        #[derive(Serialize)]
        struct GetAccountInfoRequest<'a> {
            #[serde(rename = "localId")]
            local_id: [&'a str; 1],
        }

        let response = self.invoke(
            "getAccountInfo",
            &GetAccountInfoRequest {
                local_id: [user_id],
            },
        )?;
        Self::first_user(response)
    }

    fn update_account(&self, account: &Account) -> GitkitResult<Value> {
        // Every field is sent; absent values go out as null.
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct SetAccountInfoRequest<'a> {
            email: Option<&'a str>,
            local_id: Option<&'a str>,
            display_name: Option<&'a str>,
            email_verified: Option<bool>,
            photo_url: Option<&'a str>,
        }

        let body = SetAccountInfoRequest {
            email: account.email.as_deref(),
            local_id: account.user_id.as_deref(),
            display_name: account.display_name.as_deref(),
            email_verified: account.email_verified,
            photo_url: account.photo_url.as_deref(),
        };
        self.invoke("setAccountInfo", &body)
    }

    fn delete_account(&self, user_id: &str) -> GitkitResult<Value> {
        #[derive(Serialize)]
        struct DeleteAccountRequest<'a> {
            #[serde(rename = "localId")]
            local_id: &'a str,
        }

        self.invoke("deleteAccount", &DeleteAccountRequest { local_id: user_id })
    }

    fn upload_account(
        &self,
        hash_algorithm: &str,
        hash_key: &[u8],
        accounts: &[Account],
        rounds: Option<u32>,
        memory_cost: Option<u32>,
    ) -> GitkitResult<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct UploadUser<'a> {
            email: Option<&'a str>,
            local_id: Option<&'a str>,
            email_verified: Option<bool>,
            display_name: Option<&'a str>,
            password_hash: Option<String>,
            salt: Option<String>,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct UploadAccountRequest<'a> {
            hash_algorithm: &'a str,
            signer_key: String,
            users: Vec<UploadUser<'a>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            rounds: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            memory_cost: Option<u32>,
        }

        let users = accounts
            .iter()
            .map(|account| UploadUser {
                email: account.email.as_deref(),
                local_id: account.user_id.as_deref(),
                email_verified: account.email_verified,
                display_name: account.display_name.as_deref(),
                password_hash: account
                    .password_hash
                    .as_ref()
                    .map(|hash| URL_SAFE_NO_PAD.encode(hash)),
                salt: account.salt.as_ref().map(|salt| URL_SAFE_NO_PAD.encode(salt)),
            })
            .collect();

        let body = UploadAccountRequest {
            hash_algorithm,
            signer_key: URL_SAFE_NO_PAD.encode(hash_key),
            users,
            rounds: rounds.filter(|r| *r != 0),
            memory_cost: memory_cost.filter(|m| *m != 0),
        };
        self.invoke("uploadAccount", &body)?;

        Ok(())
    }

    fn download_account(
        &self,
        page_token: Option<&str>,
        max_results: u32,
    ) -> GitkitResult<DownloadPage> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct DownloadAccountRequest<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            next_page_token: Option<&'a str>,
            max_results: u32,
        }

        let body = DownloadAccountRequest {
            next_page_token: page_token.filter(|token| !token.is_empty()),
            max_results,
        };
        let response = self.invoke("downloadAccount", &body)?;
        DownloadPage::from_response(response)
    }

    fn get_oob_code(&self, request: &OobRequest) -> GitkitResult<String> {
        let response = self.invoke("getOobConfirmationCode", request)?;

        response
            .get("oobCode")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| GitkitError::client("can not get oob-code"))
    }

    fn get_gitkit_certs(&self) -> GitkitResult<HashMap<String, String>> {
        let url = self.certs_url()?;

        let body = if self.server_api_key.is_some() {
            self.transport.retrieve_certs(&url)?
        } else {
            self.transport.authenticated_request(HttpRequest::get(url))?
        };

        let response = check_gitkit_error(serde_json::from_str(&body)?)?;
        Ok(serde_json::from_value(response)?)
    }
}
