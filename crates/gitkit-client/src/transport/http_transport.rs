use gitkit_core::Result as GitkitResult;

use reqwest::Method;

/// A request for the authenticated HTTP client
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: String) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// HTTP capability used by the RPC gateway.
///
/// Implementations own credentials and token refresh; callers only see
/// response bodies.
pub trait HttpTransport {
    /// Send `request` with service-account credentials attached and return
    /// the response body, whatever the status code.
    fn authenticated_request(&self, request: HttpRequest) -> GitkitResult<String>;

    /// Plain GET used for public certificate retrieval
    fn retrieve_certs(&self, url: &str) -> GitkitResult<String>;
}
