use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

/// Affiliate platform document, also the API representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: String,
    pub name: String,
    pub description: String,
    pub niches: Vec<String>,
    /// Stored as text exactly as submitted ("7.5", "12%", ...)
    pub commission_rate: String,
    pub api_url: String,
    pub join_steps: Vec<String>,
}

impl Platform {
    /// Case-insensitive substring match against the name or any niche
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.has_niche(needle)
    }

    /// Case-insensitive substring match against any niche
    ///
    /// `needle` must already be lowercased.
    pub fn has_niche(&self, needle: &str) -> bool {
        self.niches
            .iter()
            .any(|niche| niche.to_lowercase().contains(needle))
    }

    /// Numeric value of the commission rate, if it parses
    ///
    /// Surrounding whitespace and a trailing `%` are ignored.
    pub fn commission_value(&self) -> Option<f64> {
        let raw = self.commission_rate.trim();
        let raw = raw.strip_suffix('%').unwrap_or(raw).trim_end();
        raw.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

/// Order platforms by commission rate, highest first
///
/// Unparseable rates go last. The sort is stable, so equal rates keep
/// their stored (insertion) order.
pub fn sort_by_commission_desc(platforms: &mut [Platform]) {
    platforms.sort_by(|a, b| match (a.commission_value(), b.commission_value()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Accept a commission rate given either as a JSON string or a JSON number
pub fn deserialize_rate<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRate {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawRate>::deserialize(deserializer)? {
        Some(RawRate::Text(text)) => text,
        Some(RawRate::Number(number)) => number.to_string(),
        None => String::new(),
    })
}
