//! Per-agent outcomes of one enrichment attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::content::Content;

/// Status of a single agent invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    Timeout,
    Error,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Success => "success",
            OutcomeStatus::Timeout => "timeout",
            OutcomeStatus::Error => "error",
        }
    }
}

/// One outcome per registered agent, keyed by agent name.
pub type OutcomeMap = HashMap<String, AgentOutcome>;

/// Result of one agent invocation for one waypoint.
///
/// Exactly one of these is produced per registered agent per waypoint,
/// whatever happened: a timeout or failure is recorded here rather than
/// propagated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutcome {
    pub agent_name: String,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub execution_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}

impl AgentOutcome {
    /// Successful lookup with content.
    pub fn success(agent_name: impl Into<String>, content: Content, execution_time_ms: u64) -> Self {
        Self {
            agent_name: agent_name.into(),
            status: OutcomeStatus::Success,
            content: Some(content),
            error_message: None,
            execution_time_ms,
            timestamp: Utc::now(),
        }
    }

    /// Synthesized outcome for an agent that exceeded its deadline.
    ///
    /// Carries the configured deadline as the execution latency, since the
    /// dispatcher stopped waiting at exactly that point.
    pub fn timeout(agent_name: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            agent_name: agent_name.into(),
            status: OutcomeStatus::Timeout,
            content: None,
            error_message: Some(format!("Agent execution exceeded {}ms timeout", timeout_ms)),
            execution_time_ms: timeout_ms,
            timestamp: Utc::now(),
        }
    }

    /// Synthesized outcome for an agent that returned or raised an error.
    pub fn error(
        agent_name: impl Into<String>,
        message: impl Into<String>,
        execution_time_ms: u64,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            status: OutcomeStatus::Error,
            content: None,
            error_message: Some(message.into()),
            execution_time_ms,
            timestamp: Utc::now(),
        }
    }

    /// Whether this outcome carries usable content.
    pub fn is_successful(&self) -> bool {
        self.status == OutcomeStatus::Success && self.content.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::ContentType;

    fn make_content(score: f64) -> Content {
        Content {
            content_type: ContentType::Video,
            title: "Test video".to_string(),
            description: "A test".to_string(),
            relevance_score: score,
            url: None,
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn success_outcome_is_successful() {
        let outcome = AgentOutcome::success("video", make_content(0.75), 120);
        assert!(outcome.is_successful());
        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert_eq!(outcome.execution_time_ms, 120);
    }

    #[test]
    fn timeout_outcome_carries_deadline_as_latency() {
        let outcome = AgentOutcome::timeout("music", 5000);
        assert!(!outcome.is_successful());
        assert_eq!(outcome.status, OutcomeStatus::Timeout);
        assert_eq!(outcome.execution_time_ms, 5000);
        assert!(outcome.error_message.unwrap().contains("5000ms"));
    }

    #[test]
    fn error_outcome_carries_message() {
        let outcome = AgentOutcome::error("history", "connection refused", 42);
        assert!(!outcome.is_successful());
        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.error_message.as_deref(), Some("connection refused"));
    }

    #[test]
    fn status_serde_snake_case() {
        let json = serde_json::to_string(&OutcomeStatus::Timeout).unwrap();
        assert_eq!(json, "\"timeout\"");
    }
}
