//! Engine timing and concurrency configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeouts and concurrency bounds for the enrichment engine.
///
/// Every wait in the engine has an explicit upper bound derived from
/// these values; nothing blocks indefinitely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deadline for a single agent invocation, in milliseconds.
    pub agent_timeout_ms: u64,
    /// Deadline for one arbitration decision, in milliseconds.
    pub arbitration_timeout_ms: u64,
    /// Maximum waypoints processed concurrently within one batch.
    pub batch_size: usize,
    /// Cap on simultaneous agent invocations across the whole route.
    pub worker_pool_size: usize,
    /// Slack added on top of agent + arbitration deadlines for the
    /// per-waypoint overall deadline.
    pub safety_margin_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            agent_timeout_ms: 5000,
            arbitration_timeout_ms: 3000,
            batch_size: 5,
            worker_pool_size: 50,
            safety_margin_ms: 1000,
        }
    }
}

impl EngineConfig {
    /// Per-agent invocation deadline.
    pub fn agent_timeout(&self) -> Duration {
        Duration::from_millis(self.agent_timeout_ms)
    }

    /// Arbitration decision deadline.
    pub fn arbitration_timeout(&self) -> Duration {
        Duration::from_millis(self.arbitration_timeout_ms)
    }

    /// Overall deadline for one waypoint's full pipeline:
    /// agent deadline + arbitration deadline + safety margin.
    pub fn waypoint_deadline(&self) -> Duration {
        Duration::from_millis(
            self.agent_timeout_ms + self.arbitration_timeout_ms + self.safety_margin_ms,
        )
    }
}
