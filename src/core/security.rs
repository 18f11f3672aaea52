use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::domain::types::Role;

#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("session token could not be decoded")]
    Malformed,
}

/// Claims the front end reads from the access token issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: Role,
    pub exp: i64,
}

impl SessionClaims {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now.unix_timestamp() >= self.exp
    }
}

/// Reads the claims of a session token without checking its signature.
///
/// The backend verifies every request; the client only needs the subject and role to
/// decide which controls to show.
pub fn decode_session_claims(token: &str) -> Result<SessionClaims, SecurityError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|err| {
            tracing::debug!(error = %err, "Rejected session token");
            SecurityError::Malformed
        })
}
