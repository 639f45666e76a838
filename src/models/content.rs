use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A public announcement published by the municipality. Plain content, no
/// state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub category: String,
}

/// A completed-works / achievements board entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    /// Image/video URLs, in display order.
    #[serde(rename = "mediaUrls", default)]
    pub media_urls: Vec<String>,
}
