//! Route-wide statistics over the (possibly partial) enrichment results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{ContentType, Waypoint};

/// Statistics for one enrichment run.
///
/// Derived, stateless, recomputed per run by [`aggregate_route`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStatistics {
    pub total_waypoints: usize,
    pub enriched_waypoints: usize,
    pub failed_waypoints: usize,
    /// Sum of per-waypoint processing time over enriched waypoints.
    pub total_processing_time_ms: u64,
    /// Average over enriched waypoints only; 0.0 when none enriched.
    pub average_processing_time_ms: f64,
    /// Count of selected content per type; all four buckets always present.
    pub content_breakdown: BTreeMap<String, usize>,
    /// enriched / total, or 0.0 for an empty route.
    pub success_rate: f64,
}

/// Compute route statistics from the final waypoint list.
///
/// Pure and deterministic: no I/O, no shared state. Waypoints without an
/// enrichment count as failed and contribute nothing to timing or the
/// content breakdown.
pub fn aggregate_route(waypoints: &[Waypoint]) -> RouteStatistics {
    let total = waypoints.len();
    let enriched: Vec<_> = waypoints.iter().filter_map(|wp| wp.enrichment.as_ref()).collect();
    let enriched_count = enriched.len();

    let total_processing_time_ms: u64 = enriched.iter().map(|e| e.processing_time_ms).sum();
    let average_processing_time_ms = if enriched_count > 0 {
        total_processing_time_ms as f64 / enriched_count as f64
    } else {
        0.0
    };

    let mut content_breakdown: BTreeMap<String, usize> = ContentType::ALL
        .iter()
        .map(|ct| (ct.as_str().to_string(), 0))
        .collect();
    for enrichment in &enriched {
        let key = enrichment.selected_content.content_type.as_str();
        *content_breakdown.entry(key.to_string()).or_insert(0) += 1;
    }

    let success_rate = if total > 0 {
        enriched_count as f64 / total as f64
    } else {
        0.0
    };

    RouteStatistics {
        total_waypoints: total,
        enriched_waypoints: enriched_count,
        failed_waypoints: total - enriched_count,
        total_processing_time_ms,
        average_processing_time_ms,
        content_breakdown,
        success_rate,
    }
}
