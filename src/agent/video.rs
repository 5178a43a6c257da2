//! Simulated video lookup agent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{AgentError, ContentAgent};
use crate::model::{Content, ContentType, TransactionContext, Waypoint};

/// Simulated video agent.
///
/// Stands in for a real video search API: sleeps for a configured latency,
/// then returns a mock video clip about the waypoint's location. Honors
/// cancellation, so the dispatcher's deadline actually stops the work.
pub struct VideoAgent {
    name: String,
    latency: Duration,
    relevance_score: f64,
}

impl VideoAgent {
    pub fn new(name: impl Into<String>, latency_ms: u64, relevance_score: f64) -> Self {
        Self {
            name: name.into(),
            latency: Duration::from_millis(latency_ms),
            relevance_score,
        }
    }
}

#[async_trait]
impl ContentAgent for VideoAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> ContentType {
        ContentType::Video
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
        if let Some(query) = waypoint.query_for(&self.name) {
            metadata.insert(
                "query".to_string(),
                serde_json::Value::String(query.to_string()),
            );
        }

        Ok(Content {
            content_type: ContentType::Video,
            title: format!("Video about {}", waypoint.location_name),
            description: format!("A virtual tour of {}", waypoint.location_name),
            relevance_score: self.relevance_score,
            url: Some(format!("https://youtube.com/watch?v=mock_{}", waypoint.id)),
            metadata,
        })
    }
}
