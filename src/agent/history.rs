//! Simulated historical-note lookup agent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{AgentError, ContentAgent};
use crate::model::{Content, ContentType, TransactionContext, Waypoint};

/// Simulated history agent.
///
/// Stands in for a Wikipedia / historical database query and returns a
/// mock historical note about the waypoint's location. History content
/// carries no URL.
pub struct HistoryAgent {
    name: String,
    latency: Duration,
    relevance_score: f64,
}

impl HistoryAgent {
    pub fn new(name: impl Into<String>, latency_ms: u64, relevance_score: f64) -> Self {
        Self {
            name: name.into(),
            latency: Duration::from_millis(latency_ms),
            relevance_score,
        }
    }
}

#[async_trait]
impl ContentAgent for HistoryAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> ContentType {
        ContentType::History
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

        Ok(Content {
            content_type: ContentType::History,
            title: format!("History of {}", waypoint.location_name),
            description: format!(
                "Fascinating historical facts about {} and its significance.",
                waypoint.location_name
            ),
            relevance_score: self.relevance_score,
            url: None,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;

    #[tokio::test]
    async fn returns_history_content_without_url() {
        let agent = HistoryAgent::new("history", 0, 0.68);
        let ctx = TransactionContext::new("A", "B");
        let wp = Waypoint::new(5, "Wall Street", Coordinates::new(40.7074, -74.0113), "Continue");

        let content = agent
            .invoke(&ctx, &wp, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(content.content_type, ContentType::History);
        assert_eq!(content.relevance_score, 0.68);
        assert!(content.url.is_none());
        assert!(content.description.contains("Wall Street"));
    }
}
