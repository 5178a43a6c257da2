//! Content items produced by lookup agents.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use super::waypoint::Waypoint;

/// Category of content attached to a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Video clip about the location.
    Video,
    /// A song matching the location's mood.
    Song,
    /// A historical note about the location.
    History,
    /// Generic zero-confidence content used when no agent succeeds.
    Fallback,
}

impl ContentType {
    /// All content type variants, used to pre-seed breakdown buckets.
    pub const ALL: [ContentType; 4] = [
        ContentType::Video,
        ContentType::Song,
        ContentType::History,
        ContentType::Fallback,
    ];

    /// Stable string form used in statistics breakdowns and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Video => "video",
            ContentType::Song => "song",
            ContentType::History => "history",
            ContentType::Fallback => "fallback",
        }
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(ContentType::Video),
            "song" => Ok(ContentType::Song),
            "history" => Ok(ContentType::History),
            "fallback" => Ok(ContentType::Fallback),
            _ => Err(format!("Invalid content type: {}", s)),
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single piece of contextual content found for a waypoint.
///
/// Agents produce one of these per successful lookup. The relevance score
/// is the agent's own estimate in `[0.0, 1.0]` and is what the score-max
/// arbiter compares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub content_type: ContentType,
    pub title: String,
    pub description: String,
    /// Relevance estimate in [0.0, 1.0].
    pub relevance_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Free-form agent-specific metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Content {
    /// Generic fallback content referencing the waypoint's location name.
    ///
    /// Used whenever no agent succeeded or arbitration itself failed.
    /// Always carries a zero relevance score.
    pub fn fallback_for(waypoint: &Waypoint) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert("fallback".to_string(), serde_json::Value::Bool(true));

        Self {
            content_type: ContentType::Fallback,
            title: format!("About {}", waypoint.location_name),
            description: format!("Passing through {}", waypoint.location_name),
            relevance_score: 0.0,
            url: None,
            metadata,
        }
    }
}
