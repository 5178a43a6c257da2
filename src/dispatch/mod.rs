//! Per-waypoint agent fan-out.
//!
//! The `TaskDispatcher` runs every registered agent concurrently for one
//! waypoint and always collects exactly one outcome per agent, whatever
//! mix of successes, timeouts, and errors occurs.

use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::agent::AgentError;
use crate::config::EngineConfig;
use crate::model::{AgentOutcome, OutcomeMap, TransactionContext, Waypoint};
use crate::registry::AgentRegistry;

/// Fans one waypoint out to every registered agent under a per-agent
/// deadline.
///
/// Latency for one waypoint is dominated by the slowest agent, not the
/// sum: all invocations are launched together on the runtime. The shared
/// semaphore caps simultaneous agent invocations across the whole route,
/// independent of batch size.
///
/// A single agent's failure or timeout never prevents collection of the
/// other outcomes and never fails the dispatcher itself.
pub struct TaskDispatcher {
    registry: Arc<AgentRegistry>,
    pool: Arc<Semaphore>,
    agent_timeout: Duration,
    agent_timeout_ms: u64,
}

impl TaskDispatcher {
    pub fn new(registry: Arc<AgentRegistry>, pool: Arc<Semaphore>, config: &EngineConfig) -> Self {
        Self {
            registry,
            pool,
            agent_timeout: config.agent_timeout(),
            agent_timeout_ms: config.agent_timeout_ms,
        }
    }

    /// Convenience constructor that sizes the worker pool from config.
    pub fn from_config(registry: Arc<AgentRegistry>, config: &EngineConfig) -> Self {
        Self::new(
            registry,
            Arc::new(Semaphore::new(config.worker_pool_size)),
            config,
        )
    }

    /// Number of registered agents this dispatcher fans out to.
    pub fn agent_count(&self) -> usize {
        self.registry.len()
    }

    /// Run all registered agents for one waypoint and collect one outcome
    /// per agent.
    ///
    /// The returned map always has exactly as many entries as the registry
    /// has agents. Deadline expiry synthesizes a `Timeout` outcome carrying
    /// the configured deadline as latency; agent errors and panics in the
    /// spawned task synthesize `Error` outcomes.
    ///
    /// The per-call cancellation token is cancelled on expiry, so
    /// cooperative agents stop their backing work. Agents that ignore the
    /// token keep running detached; the deadline only bounds how long the
    /// caller waits.
    pub async fn dispatch(&self, ctx: &TransactionContext, waypoint: &Waypoint) -> OutcomeMap {
        let mut names = Vec::with_capacity(self.registry.len());
        let mut handles = Vec::with_capacity(self.registry.len());

        for entry in self.registry.entries() {
            let agent = Arc::clone(&entry.agent);
            let name = entry.name.clone();
            let ctx = ctx.clone();
            let wp = waypoint.clone();
            let pool = Arc::clone(&self.pool);
            let timeout = self.agent_timeout;
            let timeout_ms = self.agent_timeout_ms;

            names.push(entry.name.clone());
            handles.push(tokio::spawn(async move {
                let cancel = CancellationToken::new();
                let agent_cancel = cancel.clone();
                let transaction_id = ctx.transaction_id.clone();
                let waypoint_id = wp.id;
                let start = Instant::now();

                tracing::debug!(
                    transaction_id = %transaction_id,
                    waypoint_id,
                    agent = %name,
                    "Agent invocation started"
                );

                let result = tokio::time::timeout(timeout, async move {
                    let _permit = pool.acquire_owned().await.map_err(|_| {
                        AgentError::Invocation("worker pool closed".to_string())
                    })?;
                    agent.invoke(&ctx, &wp, agent_cancel).await
                })
                .await;

                let elapsed_ms = start.elapsed().as_millis() as u64;
                let outcome = match result {
                    Ok(Ok(content)) => {
                        tracing::debug!(
                            transaction_id = %transaction_id,
                            waypoint_id,
                            agent = %name,
                            elapsed_ms,
                            relevance = content.relevance_score,
                            "Agent invocation succeeded"
                        );
                        AgentOutcome::success(&name, content, elapsed_ms)
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(
                            transaction_id = %transaction_id,
                            waypoint_id,
                            agent = %name,
                            elapsed_ms,
                            error = %e,
                            "Agent invocation failed"
                        );
                        AgentOutcome::error(&name, e.to_string(), elapsed_ms)
                    }
                    Err(_) => {
                        // Stop cooperative backing work; non-cooperative
                        // agents keep running detached.
                        cancel.cancel();
                        tracing::warn!(
                            transaction_id = %transaction_id,
                            waypoint_id,
                            agent = %name,
                            timeout_ms,
                            "Agent invocation timed out"
                        );
                        AgentOutcome::timeout(&name, timeout_ms)
                    }
                };

                metrics::counter!(
                    "tourguide_agent_outcomes_total",
                    "agent" => outcome.agent_name.clone(),
                    "status" => outcome.status.as_str()
                )
                .increment(1);

                outcome
            }));
        }

        let results = join_all(handles).await;

        let mut outcomes = OutcomeMap::with_capacity(names.len());
        for (name, result) in names.into_iter().zip(results) {
            let outcome = match result {
                Ok(outcome) => outcome,
                Err(join_err) => {
                    tracing::error!(agent = %name, error = %join_err, "Agent task aborted");
                    AgentOutcome::error(&name, format!("agent task aborted: {}", join_err), 0)
                }
            };
            outcomes.insert(name, outcome);
        }

        outcomes
    }
}
