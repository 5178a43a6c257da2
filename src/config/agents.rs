//! Agent registry configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of simulated agent to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Video,
    Music,
    History,
}

impl AgentKind {
    /// Simulated lookup latency observed for this kind, in milliseconds.
    pub fn default_latency_ms(&self) -> u64 {
        match self {
            AgentKind::Video => 500,
            AgentKind::Music => 400,
            AgentKind::History => 300,
        }
    }

    /// Relevance score the simulated agent reports for this kind.
    pub fn default_relevance(&self) -> f64 {
        match self {
            AgentKind::Video => 0.75,
            AgentKind::Music => 0.82,
            AgentKind::History => 0.68,
        }
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(AgentKind::Video),
            "music" => Ok(AgentKind::Music),
            "history" => Ok(AgentKind::History),
            _ => Err(format!("Invalid agent kind: {}", s)),
        }
    }
}

/// One configured content agent.
///
/// List order in the configuration file defines the arbitration tie-break
/// priority: earlier agents win ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Registry name; must be unique across the agent list.
    pub name: String,
    pub kind: AgentKind,
    /// Simulated lookup latency. Defaults per kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Relevance score the simulated agent reports. Defaults per kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

impl AgentConfig {
    pub fn latency_ms(&self) -> u64 {
        self.latency_ms.unwrap_or_else(|| self.kind.default_latency_ms())
    }

    pub fn relevance_score(&self) -> f64 {
        self.relevance_score
            .unwrap_or_else(|| self.kind.default_relevance())
    }
}

/// The standard three-agent fan-out used when no agents are configured.
pub fn default_agents() -> Vec<AgentConfig> {
    vec![
        AgentConfig {
            name: "video".to_string(),
            kind: AgentKind::Video,
            latency_ms: None,
            relevance_score: None,
        },
        AgentConfig {
            name: "music".to_string(),
            kind: AgentKind::Music,
            latency_ms: None,
            relevance_score: None,
        },
        AgentConfig {
            name: "history".to_string(),
            kind: AgentKind::History,
            latency_ms: None,
            relevance_score: None,
        },
    ]
}
