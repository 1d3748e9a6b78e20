use crate::{GitkitClaims, Result as AuthErrorResult};

use std::collections::HashMap;

/// Verifies signed Gitkit tokens.
///
/// `certs` maps key ids to PEM certificates as served by the Gitkit
/// `publicKeys` endpoint.
pub trait TokenVerifier {
    fn verify(
        &self,
        token: &str,
        certs: &HashMap<String, String>,
        audience: &str,
        issuer: &str,
        max_age_secs: i64,
    ) -> AuthErrorResult<GitkitClaims>;
}
