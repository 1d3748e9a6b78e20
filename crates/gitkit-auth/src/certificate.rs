use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::DecodingKey;
use x509_parser::prelude::{FromDer, X509Certificate};

const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// Build an RS256 decoding key from a PEM X.509 certificate.
///
/// Gitkit publishes its signing keys as certificates; the RSA key inside the
/// certificate's SubjectPublicKeyInfo is what verifies token signatures. Bare
/// `PUBLIC KEY` / `RSA PUBLIC KEY` PEM blocks are accepted as well.
#[track_caller]
pub fn decoding_key_from_certificate(certificate_pem: &str) -> AuthErrorResult<DecodingKey> {
    let pem = ::pem::parse(certificate_pem).map_err(|e| AuthError::InvalidCertificate {
        message: format!("Failed to parse PEM: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    if pem.tag() != CERTIFICATE_TAG {
        return DecodingKey::from_rsa_pem(certificate_pem.as_bytes()).map_err(|e| {
            AuthError::InvalidCertificate {
                message: format!("Invalid RSA public key: {e}"),
                location: ErrorLocation::from(Location::caller()),
            }
        });
    }

    let (_, certificate) =
        X509Certificate::from_der(pem.contents()).map_err(|e| AuthError::InvalidCertificate {
            message: format!("Failed to parse X.509: {e:?}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(DecodingKey::from_rsa_der(
        &certificate.public_key().subject_public_key.data,
    ))
}
