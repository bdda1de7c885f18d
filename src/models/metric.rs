use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Click/conversion counters for one affiliate link
///
/// Reserved: the table exists but no route reads or writes it yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetric {
    pub id: String,
    pub affiliate_link_id: String,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
    /// Unix timestamp
    pub created_at: i64,
}

impl PerformanceMetric {
    pub fn new(affiliate_link_id: &str) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            affiliate_link_id: affiliate_link_id.to_string(),
            clicks: 0,
            conversions: 0,
            created_at: Utc::now().timestamp(),
        }
    }

    /// Conversions per click, or `None` before the first click
    pub fn conversion_rate(&self) -> Option<f64> {
        if self.clicks == 0 {
            return None;
        }
        Some(self.conversions as f64 / self.clicks as f64)
    }
}
