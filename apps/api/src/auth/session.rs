//! Identity-provider session verification.
//!
//! Sessions are issued by the external identity provider as HS256 JWTs; this
//! service only verifies them and extracts the external account id from the
//! `sub` claim. Token issuance, refresh, and revocation live upstream.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
    #[allow(dead_code)]
    exp: usize,
}

/// Verifies a session token and returns the external account id, or `None`
/// for any invalid, expired, or malformed token.
pub fn verify_session_token(token: &str, secret: &str) -> Option<String> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .ok()?;

    if data.claims.sub.is_empty() {
        return None;
    }

    Some(data.claims.sub)
}
