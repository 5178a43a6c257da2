//! Error types for agent operations.

use thiserror::Error;

/// Errors that can occur during a content agent invocation.
///
/// These never cross the engine boundary: the dispatcher records them as
/// classified fields on the per-agent outcome instead of propagating.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The lookup itself failed (API error, parse failure, etc.).
    #[error("Agent invocation failed: {0}")]
    Invocation(String),

    /// The agent observed its cancellation token and stopped early.
    #[error("Agent cancelled before completion")]
    Cancelled,

    /// The agent's own internal deadline expired.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Preprocessing did not prepare a query string for this agent.
    #[error("No search query prepared for agent '{0}'")]
    MissingQuery(String),
}
