//! Waypoints and their enrichment record.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::content::Content;
use super::decision::ArbitrationDecision;
use super::outcome::OutcomeMap;

/// Geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Pre-built search query strings, keyed by agent name.
///
/// Produced by an upstream preprocessing stage; the dispatcher hands each
/// agent its own query. Keying by agent name (rather than fixed fields)
/// keeps the registry extensible without touching this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySet {
    queries: HashMap<String, String>,
}

impl QuerySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query string for a named agent.
    pub fn insert(&mut self, agent: impl Into<String>, query: impl Into<String>) {
        self.queries.insert(agent.into(), query.into());
    }

    /// Query string for a named agent, if one was prepared.
    pub fn get(&self, agent: &str) -> Option<&str> {
        self.queries.get(agent).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Enrichment record attached to a waypoint after agent processing.
///
/// `selected_content` is always present: when no agent succeeds the
/// arbiter substitutes fallback content rather than leaving a hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    pub selected_content: Content,
    /// One outcome per registered agent, keyed by agent name.
    pub outcomes: OutcomeMap,
    pub decision: ArbitrationDecision,
    /// Wall-clock time for the full dispatch + arbitration pipeline.
    pub processing_time_ms: u64,
}

/// A single point along the route eligible for content enrichment.
///
/// Created by upstream preprocessing, mutated exactly once by the engine
/// (enrichment attached), never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: u32,
    pub location_name: String,
    pub coordinates: Coordinates,
    /// Navigation instruction for this step.
    pub instruction: String,
    /// Distance from route start, in meters.
    #[serde(default)]
    pub distance_from_start: f64,
    #[serde(default)]
    pub step_index: u32,
    /// Agent-specific search queries built by preprocessing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<QuerySet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<Enrichment>,
}

impl Waypoint {
    pub fn new(
        id: u32,
        location_name: impl Into<String>,
        coordinates: Coordinates,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            id,
            location_name: location_name.into(),
            coordinates,
            instruction: instruction.into(),
            distance_from_start: 0.0,
            step_index: 0,
            queries: None,
            enrichment: None,
        }
    }

    /// Whether this waypoint carries an enrichment record.
    pub fn is_enriched(&self) -> bool {
        self.enrichment.is_some()
    }

    /// Query string for a named agent, if preprocessing prepared one.
    pub fn query_for(&self, agent: &str) -> Option<&str> {
        self.queries.as_ref().and_then(|q| q.get(agent))
    }
}
