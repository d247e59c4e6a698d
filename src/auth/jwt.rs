use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use thiserror::Error;
use uuid::Uuid;

use crate::{model::role::Role, models::Claims};

/// Failures of the bearer-token layer. Surfaced to callers as HTTP 400 with
/// a human-readable message; no 401/403 split (kept from the original API).
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Authentication failed. No token provided.")]
    Missing,
    #[error("Authentication failed. Token expired.")]
    Expired,
    #[error("Authentication failed. Invalid token.")]
    Invalid,
    #[error("Error generating token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs() as usize
}

/// Issues a signed access token for the given identity, valid for `ttl`
/// seconds from now.
pub fn issue_token(
    user_id: u64,
    user_name: String,
    role: Role,
    secret: &str,
    ttl: usize,
) -> Result<String, CredentialError> {
    let iat = now();
    let claims = Claims {
        user_id,
        sub: user_name,
        role,
        iat,
        exp: iat + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(CredentialError::Signing)
}

/// Validates signature and expiry. Pure function of token, secret and the
/// current time; no side effects.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, CredentialError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => CredentialError::Expired,
        _ => CredentialError::Invalid,
    })
}
