//! Arbitration decisions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::content::Content;

/// Winner name used when no agent succeeded or arbitration itself failed.
pub const FALLBACK_WINNER: &str = "fallback";

/// The arbiter's verdict for one waypoint.
///
/// `selected_content` is always present: the arbiter substitutes fallback
/// content rather than producing an empty decision, so downstream code
/// never has to handle a missing selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrationDecision {
    /// Winning agent name, or [`FALLBACK_WINNER`].
    pub winner: String,
    /// Human-readable explanation of the choice.
    pub reasoning: String,
    /// Confidence in [0.0, 1.0]; the winner's relevance score, or 0.0 on fallback.
    pub confidence_score: f64,
    /// Score assigned to each agent (0.0 for non-successful outcomes).
    pub individual_scores: HashMap<String, f64>,
    pub decision_time_ms: u64,
    /// True when the winner was chosen by priority order among tied scores.
    pub tie_breaker_applied: bool,
    pub selected_content: Content,
}

impl ArbitrationDecision {
    /// Whether this decision fell back to generic content.
    pub fn is_fallback(&self) -> bool {
        self.winner == FALLBACK_WINNER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::ContentType;

    #[test]
    fn fallback_detection() {
        let decision = ArbitrationDecision {
            winner: FALLBACK_WINNER.to_string(),
            reasoning: "All agents failed, using fallback content".to_string(),
            confidence_score: 0.0,
            individual_scores: HashMap::new(),
            decision_time_ms: 0,
            tie_breaker_applied: false,
            selected_content: Content {
                content_type: ContentType::Fallback,
                title: "About somewhere".to_string(),
                description: "Passing through somewhere".to_string(),
                relevance_score: 0.0,
                url: None,
                metadata: HashMap::new(),
            },
        };

        assert!(decision.is_fallback());
    }
}
