//! Arbitration strategy configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which arbitration strategy decides the winning content.
///
/// `ScoreMax` is the shipped heuristic. The enum is the configuration
/// seam for an external oracle variant (e.g., an LLM-backed judge) that
/// implements the same `Arbiter` trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArbiterStrategy {
    /// Pick the success outcome with the strictly highest relevance score;
    /// break ties by agent priority order.
    #[default]
    ScoreMax,
}

impl FromStr for ArbiterStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "score_max" => Ok(ArbiterStrategy::ScoreMax),
            _ => Err(format!("Invalid arbiter strategy: {}", s)),
        }
    }
}

/// Arbitration configuration section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ArbiterConfig {
    pub strategy: ArbiterStrategy,
}
