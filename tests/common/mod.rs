//! Shared test utilities for integration tests.
//!
//! Provides route builders, scripted agents, and scheduler construction
//! helpers to reduce duplication across test files.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tourguide::agent::{AgentError, ContentAgent};
use tourguide::arbiter::ArbitrationEngine;
use tourguide::config::{ArbiterStrategy, EngineConfig};
use tourguide::dispatch::TaskDispatcher;
use tourguide::model::{Content, ContentType, Coordinates, TransactionContext, Waypoint};
use tourguide::registry::AgentRegistry;
use tourguide::scheduler::BatchScheduler;

// =============================================================================
// Route Builders
// =============================================================================

/// Create a route of `count` sequential waypoints.
pub fn make_route(count: u32) -> Vec<Waypoint> {
    (0..count)
        .map(|i| {
            let mut wp = Waypoint::new(
                i,
                format!("Stop {}", i),
                Coordinates::new(40.70 + i as f64 * 0.01, -74.0),
                "Continue straight",
            );
            wp.step_index = i;
            wp.distance_from_start = i as f64 * 100.0;
            wp
        })
        .collect()
}

/// Create a transaction context for a test run.
pub fn make_ctx() -> TransactionContext {
    TransactionContext::new("Test Origin", "Test Destination")
}

// =============================================================================
// Scripted Agents
// =============================================================================

/// Agent that succeeds immediately with a fixed relevance score.
pub struct StubAgent {
    name: String,
    content_type: ContentType,
    relevance_score: f64,
}

impl StubAgent {
    pub fn new(name: &str, content_type: ContentType, relevance_score: f64) -> Self {
        Self {
            name: name.to_string(),
            content_type,
            relevance_score,
        }
    }
}

#[async_trait]
impl ContentAgent for StubAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> ContentType {
        self.content_type
    }

    async fn invoke(
        &self,
        _ctx: &TransactionContext,
        waypoint: &Waypoint,
        _cancel: CancellationToken,
    ) -> Result<Content, AgentError> {
        Ok(Content {
            content_type: self.content_type,
            title: format!("{} for {}", self.name, waypoint.location_name),
            description: format!("Stub content from {}", self.name),
            relevance_score: self.relevance_score,
            url: None,
            metadata: Default::default(),
        })
    }
}

/// Agent that always fails with the given message.
pub struct FailingAgent {
    name: String,
    message: String,
}

impl FailingAgent {
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl ContentAgent for FailingAgent {
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
        Err(AgentError::Invocation(self.message.clone()))
    }
}

/// Agent that never completes until cancelled.
pub struct HangingAgent {
    name: String,
}

impl HangingAgent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl ContentAgent for HangingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> ContentType {
        ContentType::History
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

// =============================================================================
// Engine Builders
// =============================================================================

/// Engine config with short timeouts suitable for tests.
pub fn fast_engine_config() -> EngineConfig {
    EngineConfig {
        agent_timeout_ms: 200,
        arbitration_timeout_ms: 200,
        batch_size: 5,
        worker_pool_size: 50,
        safety_margin_ms: 200,
    }
}

/// Build a full scheduler stack over the given agents.
pub fn make_scheduler(
    agents: Vec<Arc<dyn ContentAgent>>,
    config: &EngineConfig,
) -> BatchScheduler {
    let mut registry = AgentRegistry::new();
    for agent in agents {
        registry.register(agent).unwrap();
    }
    let registry = Arc::new(registry);
    let priority_order = registry.priority_order();

    let dispatcher = Arc::new(TaskDispatcher::new(
        Arc::clone(&registry),
        Arc::new(Semaphore::new(config.worker_pool_size)),
        config,
    ));
    let arbitration = Arc::new(ArbitrationEngine::from_strategy(
        ArbiterStrategy::ScoreMax,
        priority_order,
        config,
    ));

    BatchScheduler::new(dispatcher, arbitration, config)
}

/// The standard three-agent fan-out with stubbed implementations:
/// video 0.75, music 0.82, history 0.68.
pub fn standard_agents() -> Vec<Arc<dyn ContentAgent>> {
    vec![
        Arc::new(StubAgent::new("video", ContentType::Video, 0.75)),
        Arc::new(StubAgent::new("music", ContentType::Song, 0.82)),
        Arc::new(StubAgent::new("history", ContentType::History, 0.68)),
    ]
}
