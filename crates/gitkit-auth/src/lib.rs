pub mod certificate;
pub mod claims;
pub mod error;
pub mod jwt_token_verifier;
pub mod token_verifier;

pub use certificate::decoding_key_from_certificate;
pub use claims::GitkitClaims;
pub use error::{AuthError, Result};
pub use jwt_token_verifier::{DEFAULT_LEEWAY_SECS, JwtTokenVerifier};
pub use token_verifier::TokenVerifier;
