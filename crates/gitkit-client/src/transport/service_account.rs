use gitkit_config::GITKIT_SCOPE;
use gitkit_core::{GitkitError, Result as GitkitResult};

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::Value;

/// Lifetime requested for each signed assertion
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Service account identity used for the OAuth2 JWT-bearer grant
#[derive(Clone)]
pub struct ServiceAccountCredentials {
    email: String,
    scope: String,
    key: EncodingKey,
}

impl std::fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("email", &self.email)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

impl ServiceAccountCredentials {
    /// Build credentials from raw key file contents.
    ///
    /// Accepts a PEM RSA private key (PKCS#1 or PKCS#8), a DER PKCS#1 key, or a
    /// Google JSON key file carrying `private_key`.
    #[track_caller]
    pub fn from_key_bytes(email: impl Into<String>, key_bytes: &[u8]) -> GitkitResult<Self> {
        let key = Self::parse_key(key_bytes)?;

        Ok(Self {
            email: email.into(),
            scope: String::from(GITKIT_SCOPE),
            key,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Sign the JWT assertion exchanged for an access token at `token_uri`
    #[track_caller]
    pub fn assertion(&self, token_uri: &str, now: i64) -> GitkitResult<String> {
        let claims = AssertionClaims {
            iss: &self.email,
            scope: &self.scope,
            aud: token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| GitkitError::client(format!("Failed to sign assertion: {e}")))
    }

    #[track_caller]
    fn parse_key(key_bytes: &[u8]) -> GitkitResult<EncodingKey> {
        let trimmed = key_bytes.trim_ascii_start();

        if trimmed.starts_with(b"{") {
            let key_file: Value = serde_json::from_slice(trimmed)?;
            let pem = key_file
                .get("private_key")
                .and_then(Value::as_str)
                .ok_or_else(|| GitkitError::client("JSON key file has no private_key"))?;
            return EncodingKey::from_rsa_pem(pem.as_bytes())
                .map_err(|e| GitkitError::client(format!("Invalid private key: {e}")));
        }

        if trimmed.starts_with(b"-----BEGIN") {
            return EncodingKey::from_rsa_pem(trimmed)
                .map_err(|e| GitkitError::client(format!("Invalid private key: {e}")));
        }

        // PKCS#12 bundles are not supported; anything else must be DER.
        Ok(EncodingKey::from_rsa_der(key_bytes))
    }
}
