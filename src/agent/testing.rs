//! Scripted agents for unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

use super::{AgentError, ContentAgent};
use crate::model::{Content, ContentType, TransactionContext, Waypoint};

/// Content with a caller-chosen relevance score.
pub fn content_with_score(content_type: ContentType, score: f64) -> Content {
    Content {
        content_type,
        title: "Scripted content".to_string(),
        description: "Scripted content for tests".to_string(),
        relevance_score: score,
        url: None,
        metadata: HashMap::new(),
    }
}

/// Agent that always succeeds immediately with a fixed relevance score.
pub struct FixedScoreAgent {
    name: String,
    score: f64,
    content_type: ContentType,
}

impl FixedScoreAgent {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
            content_type: ContentType::Video,
        }
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }
}

#[async_trait]
impl ContentAgent for FixedScoreAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> ContentType {
        self.content_type
    }

    async fn invoke(
        &self,
        _ctx: &TransactionContext,
        _waypoint: &Waypoint,
        _cancel: CancellationToken,
    ) -> Result<Content, AgentError> {
        Ok(content_with_score(self.content_type, self.score))
    }
}

/// Agent that fails every invocation with a fixed message.
pub struct ScriptedAgent {
    name: String,
    error: String,
}

impl ScriptedAgent {
    pub fn failing(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            error: error.into(),
        }
    }
}

#[async_trait]
impl ContentAgent for ScriptedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> ContentType {
        ContentType::Video
    }

    async fn invoke(
        &self,
        _ctx: &TransactionContext,
        _waypoint: &Waypoint,
        _cancel: CancellationToken,
    ) -> Result<Content, AgentError> {
        Err(AgentError::Invocation(self.error.clone()))
    }
}

/// Agent that never completes unless cancelled.
pub struct HangingAgent {
    name: String,
}

impl HangingAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ContentAgent for HangingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> ContentType {
        ContentType::Video
    }

    async fn invoke(
        &self,
        _ctx: &TransactionContext,
        _waypoint: &Waypoint,
        cancel: CancellationToken,
    ) -> Result<Content, AgentError> {
        cancel.cancelled().await;
        Err(AgentError::Cancelled)
    }
}

/// Agent that panics on invocation.
pub struct PanickingAgent {
    name: String,
}

impl PanickingAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ContentAgent for PanickingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> ContentType {
        ContentType::Video
    }

    async fn invoke(
        &self,
        _ctx: &TransactionContext,
        _waypoint: &Waypoint,
        _cancel: CancellationToken,
    ) -> Result<Content, AgentError> {
        panic!("scripted panic in {}", self.name);
    }
}
