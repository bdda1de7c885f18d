use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_ROLE;

/// User document stored in redb
///
/// Never returned to HTTP clients: it carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Trimmed and lowercased; unique across all users
    pub email: String,
    pub password_hash: String,
    pub role: String,
    /// Unix timestamp
    pub created_at: i64,
}

impl User {
    /// Build a new user with the default role and a fresh id
    pub fn new(name: &str, email: &str, password_hash: String) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: name.trim().to_string(),
            email: normalize_email(email),
            password_hash,
            role: DEFAULT_ROLE.to_string(),
            created_at: Utc::now().timestamp(),
        }
    }
}

/// Canonical form used for uniqueness and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Loose structural check: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty() && !host.starts_with('.') && !host.ends_with('.') && tld.len() >= 2
        }
        None => false,
    }
}
