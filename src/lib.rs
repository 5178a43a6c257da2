//! Tourguide - concurrent waypoint-enrichment engine
//!
//! Enriches each point along a navigation route with one piece of
//! contextual media (a video, a song, or a historical note) by fanning
//! out to independent content agents under deadlines and arbitrating
//! among their results.

pub mod agent;
pub mod arbiter;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod model;
pub mod registry;
pub mod scheduler;
pub mod stats;
