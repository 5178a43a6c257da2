//! Core data model for the waypoint enrichment pipeline.
//!
//! Defines the types that flow between the dispatcher, arbiter, scheduler,
//! and aggregator: waypoints, agent outcomes, content items, and arbitration
//! decisions. Everything is serde-serializable so the enriched route can be
//! emitted as JSON.

pub mod content;
pub mod context;
pub mod decision;
pub mod outcome;
pub mod waypoint;

pub use content::{Content, ContentType};
pub use context::TransactionContext;
pub use decision::{ArbitrationDecision, FALLBACK_WINNER};
pub use outcome::{AgentOutcome, OutcomeMap, OutcomeStatus};
pub use waypoint::{Coordinates, Enrichment, QuerySet, Waypoint};
