use crate::{
    AuthError, GitkitClaims, Result as AuthErrorResult, TokenVerifier,
    decoding_key_from_certificate,
};

use std::collections::HashMap;
use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, Validation, decode, decode_header};
use log::debug;

/// Clock skew tolerated on time-based claims, in seconds
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// RS256 token verifier backed by `jsonwebtoken`
#[derive(Debug, Clone)]
pub struct JwtTokenVerifier {
    leeway: u64,
}

impl JwtTokenVerifier {
    pub fn new(leeway: u64) -> Self {
        Self { leeway }
    }

    fn validation(&self, audience: &str, issuer: &str) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[audience]);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation.validate_exp = true;
        validation.leeway = self.leeway;
        validation
    }

    #[track_caller]
    fn verify_with_cert(
        &self,
        token: &str,
        certificate_pem: &str,
        validation: &Validation,
    ) -> AuthErrorResult<GitkitClaims> {
        let decoding_key = decoding_key_from_certificate(certificate_pem)?;

        let token_data =
            decode::<GitkitClaims>(token, &decoding_key, validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        Ok(token_data.claims)
    }
}

impl Default for JwtTokenVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_LEEWAY_SECS)
    }
}

impl TokenVerifier for JwtTokenVerifier {
    #[track_caller]
    fn verify(
        &self,
        token: &str,
        certs: &HashMap<String, String>,
        audience: &str,
        issuer: &str,
        max_age_secs: i64,
    ) -> AuthErrorResult<GitkitClaims> {
        let header = decode_header(token).map_err(|e| AuthError::JwtDecode {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;
        let validation = self.validation(audience, issuer);

        let claims = match header.kid {
            Some(kid) => {
                let certificate = certs.get(&kid).ok_or_else(|| AuthError::UnknownKeyId {
                    key_id: kid.clone(),
                    location: ErrorLocation::from(Location::caller()),
                })?;
                self.verify_with_cert(token, certificate, &validation)?
            }
            None => {
                // No key id: any published certificate may have signed it.
                let mut key_ids: Vec<&String> = certs.keys().collect();
                key_ids.sort();

                let mut last_error = AuthError::InvalidToken {
                    message: "no certificates available".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                };
                let mut verified = None;
                for key_id in key_ids {
                    match self.verify_with_cert(token, &certs[key_id], &validation) {
                        Ok(claims) => {
                            verified = Some(claims);
                            break;
                        }
                        Err(e) => {
                            debug!("Token did not verify against key {key_id}: {e}");
                            last_error = e;
                        }
                    }
                }
                verified.ok_or(last_error)?
            }
        };

        claims.validate()?;
        claims.check_age(
            chrono::Utc::now().timestamp(),
            max_age_secs,
            self.leeway as i64,
        )?;

        Ok(claims)
    }
}
