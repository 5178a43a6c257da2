//! Content agent abstraction layer.
//!
//! Provides the `ContentAgent` trait that abstracts agent-specific lookup
//! logic, plus the simulated implementations used in mock mode and tests.
//! Real agents (YouTube, music search, historical databases) implement the
//! same trait and register without any dispatcher changes.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub mod error;
pub mod factory;
pub mod history;
pub mod music;
#[cfg(test)]
pub mod testing;
pub mod video;

pub use error::AgentError;
pub use factory::build_agent;
pub use history::HistoryAgent;
pub use music::MusicAgent;
pub use video::VideoAgent;

use crate::model::{Content, ContentType, TransactionContext, Waypoint};

/// Unified interface for all content lookup agents.
///
/// Each agent attempts to find one piece of content for a waypoint within
/// a deadline enforced by the dispatcher. Implementations never see the
/// outcomes of other agents.
///
/// # Object Safety
///
/// This trait is object-safe and designed to be used as
/// `Arc<dyn ContentAgent>`.
///
/// # Cancellation
///
/// `invoke` receives a [`CancellationToken`] that the dispatcher cancels
/// when the per-agent deadline expires. Cooperative agents select on it
/// and return [`AgentError::Cancelled`]; agents that ignore it keep
/// running in the background after the dispatcher has stopped waiting.
/// That bounded-wait-only behavior is a documented resource-leak risk for
/// non-cooperative implementations, not a safety guarantee.
#[async_trait]
pub trait ContentAgent: Send + Sync + 'static {
    /// Registry name of this agent (e.g., "video"). Also the key under
    /// which outcomes and query strings are stored.
    fn name(&self) -> &str;

    /// The content category this agent produces.
    fn content_type(&self) -> ContentType;

    /// Look up one piece of content for the waypoint.
    ///
    /// The dispatcher bounds the wait with its own timeout; `invoke` may
    /// additionally honor `cancel` to stop early.
    async fn invoke(
        &self,
        ctx: &TransactionContext,
        waypoint: &Waypoint,
        cancel: CancellationToken,
    ) -> Result<Content, AgentError>;
}
