//! Simulated music lookup agent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{AgentError, ContentAgent};
use crate::model::{Content, ContentType, TransactionContext, Waypoint};

/// Simulated music agent.
///
/// Stands in for a real music search API and returns a mock song pick
/// for the waypoint's location.
pub struct MusicAgent {
    name: String,
    latency: Duration,
    relevance_score: f64,
}

impl MusicAgent {
    pub fn new(name: impl Into<String>, latency_ms: u64, relevance_score: f64) -> Self {
        Self {
            name: name.into(),
            latency: Duration::from_millis(latency_ms),
            relevance_score,
        }
    }
}

#[async_trait]
impl ContentAgent for MusicAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> ContentType {
        ContentType::Song
    }

    async fn invoke(
        &self,
        _ctx: &TransactionContext,
        waypoint: &Waypoint,
        cancel: CancellationToken,
    ) -> Result<Content, AgentError> {
        tokio::select! {
            _ = cancel.cancelled() => return Err(AgentError::Cancelled),
            _ = tokio::time::sleep(self.latency) => {}
        }

        let mut metadata = HashMap::new();
        metadata.insert(
            "source".to_string(),
            serde_json::Value::String("simulated".to_string()),
        );
        metadata.insert(
            "artist".to_string(),
            serde_json::Value::String("Mock Artist".to_string()),
        );

        Ok(Content {
            content_type: ContentType::Song,
            title: format!("Song for {}", waypoint.location_name),
            description: "A fitting soundtrack for this location".to_string(),
            relevance_score: self.relevance_score,
            url: Some(format!("https://open.spotify.com/track/mock_{}", waypoint.id)),
            metadata,
        })
    }
}
