//! Arbitration: picking the winning content for a waypoint.
//!
//! The `Arbiter` trait is the strategy seam: the shipped `ScoreMaxArbiter`
//! is a pure heuristic, and an external oracle (e.g., an LLM-backed judge)
//! can implement the same trait and be selected by configuration. The
//! `ArbitrationEngine` wraps whichever strategy is active with a deadline
//! and panic recovery so arbitration never fails outward.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub mod heuristic;

pub use heuristic::ScoreMaxArbiter;

use crate::config::{ArbiterStrategy, EngineConfig};
use crate::model::{
    ArbitrationDecision, Content, OutcomeMap, TransactionContext, Waypoint, FALLBACK_WINNER,
};

/// Strategy that turns an outcome map into one decision.
///
/// Implementations must be total: every outcome map yields a decision,
/// falling back to generic content when nothing succeeded.
#[async_trait]
pub trait Arbiter: Send + Sync + 'static {
    async fn decide(
        &self,
        ctx: &TransactionContext,
        waypoint: &Waypoint,
        outcomes: &OutcomeMap,
    ) -> ArbitrationDecision;
}

/// Deadline and failure guard around the active arbitration strategy.
///
/// `arbitrate` never errors: strategy timeouts and panics both degrade to
/// a fallback decision whose reasoning records what went wrong.
pub struct ArbitrationEngine {
    arbiter: Arc<dyn Arbiter>,
    timeout: Duration,
    timeout_ms: u64,
}

impl ArbitrationEngine {
    pub fn new(arbiter: Arc<dyn Arbiter>, config: &EngineConfig) -> Self {
        Self {
            arbiter,
            timeout: config.arbitration_timeout(),
            timeout_ms: config.arbitration_timeout_ms,
        }
    }

    /// Build the engine with the configured strategy.
    ///
    /// `priority_order` is the registry's agent list in registration
    /// order; it fixes the tie-break for the score-max heuristic.
    pub fn from_strategy(
        strategy: ArbiterStrategy,
        priority_order: Vec<String>,
        config: &EngineConfig,
    ) -> Self {
        let arbiter: Arc<dyn Arbiter> = match strategy {
            ArbiterStrategy::ScoreMax => Arc::new(ScoreMaxArbiter::new(priority_order)),
        };
        Self::new(arbiter, config)
    }

    /// Decide the winning content for one waypoint.
    pub async fn arbitrate(
        &self,
        ctx: &TransactionContext,
        waypoint: &Waypoint,
        outcomes: &OutcomeMap,
    ) -> ArbitrationDecision {
        // The strategy runs on its own task so a panic inside it surfaces
        // as a JoinError here instead of unwinding through the scheduler.
        let arbiter = Arc::clone(&self.arbiter);
        let task_ctx = ctx.clone();
        let task_wp = waypoint.clone();
        let task_outcomes = outcomes.clone();
        let handle = tokio::spawn(async move {
            arbiter.decide(&task_ctx, &task_wp, &task_outcomes).await
        });

        let decision = match tokio::time::timeout(self.timeout, handle).await {
            Ok(Ok(decision)) => decision,
            Ok(Err(join_err)) => {
                tracing::error!(
                    transaction_id = %ctx.transaction_id,
                    waypoint_id = waypoint.id,
                    error = %join_err,
                    "Arbitration failed internally, using fallback"
                );
                fallback_decision(
                    waypoint,
                    outcomes,
                    format!("Arbitration error: {}", join_err),
                )
            }
            Err(_) => {
                tracing::warn!(
                    transaction_id = %ctx.transaction_id,
                    waypoint_id = waypoint.id,
                    timeout_ms = self.timeout_ms,
                    "Arbitration timed out, using fallback"
                );
                fallback_decision(
                    waypoint,
                    outcomes,
                    format!("Arbitration exceeded {}ms timeout", self.timeout_ms),
                )
            }
        };

        tracing::info!(
            transaction_id = %ctx.transaction_id,
            waypoint_id = waypoint.id,
            winner = %decision.winner,
            confidence = decision.confidence_score,
            tie_breaker = decision.tie_breaker_applied,
            "Arbitration decision"
        );

        decision
    }
}

/// Zero-confidence decision selecting fallback content.
///
/// Used when no agent succeeded or the arbitration machinery itself
/// failed; the score map records 0.0 for every agent that was consulted.
pub fn fallback_decision(
    waypoint: &Waypoint,
    outcomes: &OutcomeMap,
    reasoning: String,
) -> ArbitrationDecision {
    let individual_scores: HashMap<String, f64> =
        outcomes.keys().map(|name| (name.clone(), 0.0)).collect();

    ArbitrationDecision {
        winner: FALLBACK_WINNER.to_string(),
        reasoning,
        confidence_score: 0.0,
        individual_scores,
        decision_time_ms: 0,
        tie_breaker_applied: false,
        selected_content: Content::fallback_for(waypoint),
    }
}
