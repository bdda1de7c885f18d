use std::sync::OnceLock;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::constants::TOKEN_TTL_SECS;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password with bcrypt at the given work factor
///
/// bcrypt embeds a random salt in its output, so hashing the same password
/// twice yields different strings that both verify.
///
/// CPU-bound: call from `spawn_blocking`.
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// Check a candidate password against a stored bcrypt hash
///
/// A malformed stored hash is reported as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::error!("Stored password hash could not be parsed: {}", e);
            false
        }
    }
}

/// Hash checked when a login names an unknown email
pub(crate) static DECOY_HASH: OnceLock<String> = OnceLock::new();

/// Run a full bcrypt verification whose outcome is discarded
///
/// Lets the unknown-email login path cost the same as a wrong password, so
/// response time does not reveal which accounts exist. The decoy hash is
/// generated once, at the first caller's cost.
pub fn verify_decoy_password(password: &str, cost: u32) {
    let hash = DECOY_HASH.get_or_init(|| {
        let decoy = format!("decoy-{}", uuid::Uuid::now_v7());
        bcrypt::hash(decoy, cost).unwrap_or_else(|e| {
            tracing::error!("Failed to generate decoy password hash: {}", e);
            String::new()
        })
    });
    let _ = verify_password(password, hash);
}

// =============================================================================
// Bearer Tokens
// =============================================================================

/// Claims embedded in every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims for a token issued now and valid for one hour
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: id.into(),
            role: role.into(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        }
    }
}

/// Sign claims with HS256 using the shared secret
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the embedded claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
