//! Agent factory for creating ContentAgent trait objects from configuration.

use super::{ContentAgent, HistoryAgent, MusicAgent, VideoAgent};
use crate::config::{AgentConfig, AgentKind, TourConfig};
use crate::registry::{AgentRegistry, RegistryError};
use std::sync::Arc;

/// Create an agent from its configuration entry.
///
/// The kind determines the agent implementation; name, latency, and
/// relevance come from the entry (with per-kind defaults).
///
/// # Examples
///
/// ```
/// use tourguide::agent::build_agent;
/// use tourguide::config::{AgentConfig, AgentKind};
///
/// let config = AgentConfig {
///     name: "video".to_string(),
///     kind: AgentKind::Video,
///     latency_ms: None,
///     relevance_score: None,
/// };
/// let agent = build_agent(&config);
/// assert_eq!(agent.name(), "video");
/// ```
pub fn build_agent(config: &AgentConfig) -> Arc<dyn ContentAgent> {
    let name = config.name.clone();
    let latency = config.latency_ms();
    let relevance = config.relevance_score();

    match config.kind {
        AgentKind::Video => Arc::new(VideoAgent::new(name, latency, relevance)),
        AgentKind::Music => Arc::new(MusicAgent::new(name, latency, relevance)),
        AgentKind::History => Arc::new(HistoryAgent::new(name, latency, relevance)),
    }
}

/// Build the full agent registry from configuration, preserving the
/// configured order as tie-break priority.
pub fn build_registry(config: &TourConfig) -> Result<AgentRegistry, RegistryError> {
    let mut registry = AgentRegistry::new();
    for agent_config in &config.agents {
        registry.register(build_agent(agent_config))?;
    }
    if registry.is_empty() {
        return Err(RegistryError::Empty);
    }
    Ok(registry)
}
