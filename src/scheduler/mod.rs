//! Route-level batching and per-waypoint fault isolation.
//!
//! The `BatchScheduler` drives the whole route through the dispatcher and
//! arbitration engine: waypoints within a batch run concurrently, batches
//! run sequentially, and every waypoint comes back in its original
//! position whether or not its enrichment succeeded.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::arbiter::ArbitrationEngine;
use crate::config::{EngineConfig, TourConfig};
use crate::dispatch::TaskDispatcher;
use crate::model::{Enrichment, TransactionContext, Waypoint};
use crate::registry::RegistryError;

/// Bounded-concurrency scheduler for route enrichment.
///
/// Concurrency is bounded at two nested levels: at most `batch_size`
/// waypoints are in flight at once, and the dispatcher's shared worker
/// pool caps simultaneous agent invocations across all of them.
pub struct BatchScheduler {
    dispatcher: Arc<TaskDispatcher>,
    arbitration: Arc<ArbitrationEngine>,
    batch_size: usize,
    waypoint_deadline: Duration,
}

impl BatchScheduler {
    pub fn new(
        dispatcher: Arc<TaskDispatcher>,
        arbitration: Arc<ArbitrationEngine>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            dispatcher,
            arbitration,
            batch_size: config.batch_size.max(1),
            waypoint_deadline: config.waypoint_deadline(),
        }
    }

    /// Build the full engine stack (registry, dispatcher, arbitration,
    /// scheduler) from configuration.
    pub fn from_config(config: &TourConfig) -> Result<Self, RegistryError> {
        let registry = Arc::new(crate::agent::factory::build_registry(config)?);
        let priority_order = registry.priority_order();
        let dispatcher = Arc::new(TaskDispatcher::from_config(registry, &config.engine));
        let arbitration = Arc::new(ArbitrationEngine::from_strategy(
            config.arbiter.strategy,
            priority_order,
            &config.engine,
        ));
        Ok(Self::new(dispatcher, arbitration, &config.engine))
    }

    /// Enrich every waypoint on the route.
    ///
    /// Returns a list of the same length and order as the input. Each
    /// waypoint either carries an [`Enrichment`] or is returned untouched
    /// when its pipeline exceeded the overall per-waypoint deadline or
    /// failed unexpectedly. No per-waypoint failure aborts the batch or
    /// the route.
    pub async fn enrich_route(
        &self,
        ctx: &TransactionContext,
        waypoints: Vec<Waypoint>,
    ) -> Vec<Waypoint> {
        let total = waypoints.len();
        let batch_count = total.div_ceil(self.batch_size);
        let start = Instant::now();

        tracing::info!(
            transaction_id = %ctx.transaction_id,
            waypoint_count = total,
            batch_count,
            batch_size = self.batch_size,
            "Route enrichment started"
        );

        let mut enriched = Vec::with_capacity(total);
        for (batch_idx, batch) in waypoints.chunks(self.batch_size).enumerate() {
            tracing::debug!(
                transaction_id = %ctx.transaction_id,
                batch = batch_idx + 1,
                batch_count,
                batch_len = batch.len(),
                "Processing waypoint batch"
            );
            let results = self.process_batch(ctx, batch).await;
            enriched.extend(results);
        }

        let enriched_count = enriched.iter().filter(|wp| wp.is_enriched()).count();
        metrics::counter!("tourguide_waypoints_enriched_total").increment(enriched_count as u64);
        metrics::counter!("tourguide_waypoints_failed_total")
            .increment((total - enriched_count) as u64);

        tracing::info!(
            transaction_id = %ctx.transaction_id,
            duration_ms = start.elapsed().as_millis() as u64,
            enriched_count,
            failed_count = total - enriched_count,
            "Route enrichment completed"
        );

        enriched
    }

    /// Process one batch of waypoints concurrently.
    ///
    /// Results are collected in input order regardless of completion
    /// order. A waypoint whose task times out or aborts is replaced by
    /// its original, unenriched copy.
    async fn process_batch(&self, ctx: &TransactionContext, batch: &[Waypoint]) -> Vec<Waypoint> {
        let mut handles = Vec::with_capacity(batch.len());
        for waypoint in batch {
            let dispatcher = Arc::clone(&self.dispatcher);
            let arbitration = Arc::clone(&self.arbitration);
            let ctx = ctx.clone();
            let wp = waypoint.clone();
            handles.push(tokio::spawn(async move {
                enrich_one(&dispatcher, &arbitration, &ctx, wp).await
            }));
        }

        let mut results = Vec::with_capacity(batch.len());
        for (waypoint, handle) in batch.iter().zip(handles) {
            match tokio::time::timeout(self.waypoint_deadline, handle).await {
                Ok(Ok(enriched)) => results.push(enriched),
                Ok(Err(join_err)) => {
                    tracing::error!(
                        transaction_id = %ctx.transaction_id,
                        waypoint_id = waypoint.id,
                        error = %join_err,
                        "Waypoint processing aborted, returning unenriched"
                    );
                    results.push(waypoint.clone());
                }
                Err(_) => {
                    tracing::error!(
                        transaction_id = %ctx.transaction_id,
                        waypoint_id = waypoint.id,
                        deadline_ms = self.waypoint_deadline.as_millis() as u64,
                        "Waypoint processing timed out, returning unenriched"
                    );
                    results.push(waypoint.clone());
                }
            }
        }

        results
    }
}

/// Full pipeline for a single waypoint: dispatch, arbitrate, attach.
async fn enrich_one(
    dispatcher: &TaskDispatcher,
    arbitration: &ArbitrationEngine,
    ctx: &TransactionContext,
    mut waypoint: Waypoint,
) -> Waypoint {
    let start = Instant::now();

    tracing::info!(
        transaction_id = %ctx.transaction_id,
        waypoint_id = waypoint.id,
        location_name = %waypoint.location_name,
        "Waypoint enrichment started"
    );

    let outcomes = dispatcher.dispatch(ctx, &waypoint).await;
    let decision = arbitration.arbitrate(ctx, &waypoint, &outcomes).await;
    let processing_time_ms = start.elapsed().as_millis() as u64;

    let successful_agents = outcomes.values().filter(|o| o.is_successful()).count();
    tracing::info!(
        transaction_id = %ctx.transaction_id,
        waypoint_id = waypoint.id,
        selected_type = %decision.selected_content.content_type,
        processing_time_ms,
        agent_success_count = successful_agents,
        "Waypoint enrichment completed"
    );

    waypoint.enrichment = Some(Enrichment {
        selected_content: decision.selected_content.clone(),
        outcomes,
        decision,
        processing_time_ms,
    });

    waypoint
}
