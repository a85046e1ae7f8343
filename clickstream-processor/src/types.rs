use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One clickstream interaction as it arrives on the wire.
///
/// Every field is nullable: a missing field deserializes to `None`, and
/// unknown fields in the payload are ignored.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClickEvent {
    pub row_key: Option<String>,
    pub user_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub device: Option<String>,
}

/// One aggregated `(url, country)` group, indexed as a single document.
///
/// `avg_time_spent` is the mean of the group's non-null timestamps as epoch
/// seconds, `None` when the group has no timestamps at all.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AggregateRow {
    pub url: Option<String>,
    pub country: Option<String>,
    pub click_count: u64,
    pub avg_time_spent: Option<f64>,
}

/// Parse one raw message payload into a batch of events.
///
/// A payload is either a JSON array of event objects or one event object per
/// non-empty line (which covers the single-object case). An empty payload is
/// an empty batch; malformed JSON is an error for the whole payload.
pub fn parse_batch(payload: &str) -> Result<Vec<ClickEvent>, serde_json::Error> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed);
    }

    trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str)
        .collect()
}
