use chrono::Utc;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Affiliate link document
///
/// Reserved: the table exists but no route reads or writes it yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateLink {
    pub id: String,
    pub url: String,
    /// Id of the owning platform; not enforced by the store
    pub platform: String,
    /// Unix timestamp
    pub created_at: i64,
}

impl AffiliateLink {
    /// Build a link, rejecting anything that is not an absolute http(s) URL
    pub fn new(url: &str, platform_id: &str) -> Result<Self, String> {
        if !Self::validate_url(url) {
            return Err(format!("Invalid affiliate URL: {}", url));
        }

        Ok(Self {
            id: Uuid::now_v7().to_string(),
            url: url.trim().to_string(),
            platform: platform_id.to_string(),
            created_at: Utc::now().timestamp(),
        })
    }

    /// Scheme-qualified URL with a host
    pub fn validate_url(url: &str) -> bool {
        match Url::parse(url.trim()) {
            Ok(parsed) => {
                matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
            }
            Err(_) => false,
        }
    }
}
