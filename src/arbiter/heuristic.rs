//! Score-max arbitration heuristic.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Instant;

use super::{fallback_decision, Arbiter};
use crate::model::{ArbitrationDecision, OutcomeMap, TransactionContext, Waypoint};

/// Picks the success outcome with the strictly highest relevance score.
///
/// Agents without a success outcome score 0.0. Ties resolve to the first
/// agent in the fixed priority order declared at registration time, never
/// to incidental map iteration order; when that happens the decision's
/// `tie_breaker_applied` flag is set. If nothing succeeded (or the best
/// success scored 0.0) the decision falls back to generic content.
pub struct ScoreMaxArbiter {
    priority_order: Vec<String>,
}

impl ScoreMaxArbiter {
    pub fn new(priority_order: Vec<String>) -> Self {
        Self { priority_order }
    }

    /// Outcome keys in evaluation order: the declared priority list first,
    /// then any unlisted agents in sorted order so evaluation stays
    /// deterministic even for outcomes from unregistered agents.
    fn evaluation_order(&self, outcomes: &OutcomeMap) -> Vec<String> {
        let mut order: Vec<String> = self
            .priority_order
            .iter()
            .filter(|name| outcomes.contains_key(*name))
            .cloned()
            .collect();

        let mut unlisted: Vec<String> = outcomes
            .keys()
            .filter(|name| !self.priority_order.contains(name))
            .cloned()
            .collect();
        unlisted.sort();
        order.extend(unlisted);

        order
    }
}

#[async_trait]
impl Arbiter for ScoreMaxArbiter {
    async fn decide(
        &self,
        ctx: &TransactionContext,
        waypoint: &Waypoint,
        outcomes: &OutcomeMap,
    ) -> ArbitrationDecision {
        let start = Instant::now();

        tracing::debug!(
            transaction_id = %ctx.transaction_id,
            waypoint_id = waypoint.id,
            outcome_count = outcomes.len(),
            "Score-max evaluation started"
        );

        let mut scores: HashMap<String, f64> = HashMap::with_capacity(outcomes.len());
        let mut best_agent: Option<&str> = None;
        let mut best_score = 0.0_f64;

        for name in self.evaluation_order(outcomes) {
            let outcome = &outcomes[&name];
            let score = match &outcome.content {
                Some(content) if outcome.is_successful() => content.relevance_score,
                _ => 0.0,
            };
            scores.insert(name.clone(), score);

            // Strictly greater keeps the earlier agent on ties.
            if outcome.is_successful() && score > best_score {
                best_score = score;
                best_agent = Some(&outcomes[&name].agent_name);
            }
        }

        let Some(winner) = best_agent else {
            let mut decision = fallback_decision(
                waypoint,
                outcomes,
                "All agents failed, using fallback content".to_string(),
            );
            decision.decision_time_ms = start.elapsed().as_millis() as u64;
            return decision;
        };

        let tied = outcomes
            .values()
            .filter(|o| o.is_successful())
            .filter(|o| scores.get(&o.agent_name) == Some(&best_score))
            .count()
            > 1;

        let reasoning = if tied {
            format!(
                "Selected {} with highest relevance score ({:.2}); tie broken by agent priority order",
                winner, best_score
            )
        } else {
            format!(
                "Selected {} with highest relevance score ({:.2})",
                winner, best_score
            )
        };

        // Winner is always a successful outcome, so content is present.
        let selected_content = outcomes[winner]
            .content
            .clone()
            .expect("winning outcome must carry content");

        ArbitrationDecision {
            winner: winner.to_string(),
            reasoning,
            confidence_score: best_score,
            individual_scores: scores,
            decision_time_ms: start.elapsed().as_millis() as u64,
            tie_breaker_applied: tied,
            selected_content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::content_with_score;
    use crate::model::{AgentOutcome, ContentType, Coordinates};

    fn make_waypoint() -> Waypoint {
        Waypoint::new(9, "Harlem", Coordinates::new(40.8116, -73.9465), "Continue north")
    }

    fn arbiter() -> ScoreMaxArbiter {
        ScoreMaxArbiter::new(vec![
            "video".to_string(),
            "music".to_string(),
            "history".to_string(),
        ])
    }

    fn success(name: &str, content_type: ContentType, score: f64) -> AgentOutcome {
        AgentOutcome::success(name, content_with_score(content_type, score), 10)
    }

    #[tokio::test]
    async fn highest_score_wins() {
        // Scenario: video 0.75, music 0.82, history 0.68
        let mut outcomes = OutcomeMap::new();
        outcomes.insert("video".into(), success("video", ContentType::Video, 0.75));
        outcomes.insert("music".into(), success("music", ContentType::Song, 0.82));
        outcomes.insert(
            "history".into(),
            success("history", ContentType::History, 0.68),
        );

        let ctx = TransactionContext::new("A", "B");
        let decision = arbiter().decide(&ctx, &make_waypoint(), &outcomes).await;

        assert_eq!(decision.winner, "music");
        assert_eq!(decision.confidence_score, 0.82);
        assert!(!decision.tie_breaker_applied);
        assert_eq!(decision.selected_content.content_type, ContentType::Song);
        assert_eq!(decision.individual_scores["video"], 0.75);
        assert_eq!(decision.individual_scores["history"], 0.68);
    }

    #[tokio::test]
    async fn all_failed_falls_back_with_location_name() {
        let mut outcomes = OutcomeMap::new();
        for name in ["video", "music", "history"] {
            outcomes.insert(name.to_string(), AgentOutcome::timeout(name, 100));
        }

        let ctx = TransactionContext::new("A", "B");
        let decision = arbiter().decide(&ctx, &make_waypoint(), &outcomes).await;

        assert!(decision.is_fallback());
        assert_eq!(decision.confidence_score, 0.0);
        assert_eq!(
            decision.selected_content.content_type,
            ContentType::Fallback
        );
        assert!(decision.selected_content.title.contains("Harlem"));
        assert!(decision.individual_scores.values().all(|s| *s == 0.0));
    }

    #[tokio::test]
    async fn tie_resolves_to_first_in_priority_order() {
        // Scenario: video errors; music and history both succeed at 0.50.
        // Priority order [video, music, history] makes music the winner.
        let mut outcomes = OutcomeMap::new();
        outcomes.insert(
            "video".into(),
            AgentOutcome::error("video", "connection reset", 5),
        );
        outcomes.insert("music".into(), success("music", ContentType::Song, 0.50));
        outcomes.insert(
            "history".into(),
            success("history", ContentType::History, 0.50),
        );

        let ctx = TransactionContext::new("A", "B");
        let decision = arbiter().decide(&ctx, &make_waypoint(), &outcomes).await;

        assert_eq!(decision.winner, "music");
        assert_eq!(decision.confidence_score, 0.50);
        assert!(decision.tie_breaker_applied);
        assert!(decision.reasoning.contains("priority order"));
        assert_eq!(decision.individual_scores["video"], 0.0);
    }

    #[tokio::test]
    async fn zero_score_success_falls_back() {
        let mut outcomes = OutcomeMap::new();
        outcomes.insert("video".into(), success("video", ContentType::Video, 0.0));
        outcomes.insert("music".into(), AgentOutcome::timeout("music", 100));

        let ctx = TransactionContext::new("A", "B");
        let decision = arbiter().decide(&ctx, &make_waypoint(), &outcomes).await;

        assert!(decision.is_fallback());
    }

    #[tokio::test]
    async fn single_success_wins_regardless_of_priority() {
        let mut outcomes = OutcomeMap::new();
        outcomes.insert("video".into(), AgentOutcome::timeout("video", 100));
        outcomes.insert("music".into(), AgentOutcome::error("music", "boom", 3));
        outcomes.insert(
            "history".into(),
            success("history", ContentType::History, 0.10),
        );

        let ctx = TransactionContext::new("A", "B");
        let decision = arbiter().decide(&ctx, &make_waypoint(), &outcomes).await;

        assert_eq!(decision.winner, "history");
        assert_eq!(decision.confidence_score, 0.10);
        assert!(!decision.tie_breaker_applied);
    }

    #[tokio::test]
    async fn unlisted_agents_evaluated_deterministically() {
        // Outcomes from agents missing from the priority list still get
        // scored; listed agents keep precedence on ties.
        let arbiter = ScoreMaxArbiter::new(vec!["music".to_string()]);
        let mut outcomes = OutcomeMap::new();
        outcomes.insert("music".into(), success("music", ContentType::Song, 0.50));
        outcomes.insert(
            "zeta".into(),
            success("zeta", ContentType::Video, 0.50),
        );

        let ctx = TransactionContext::new("A", "B");
        let decision = arbiter.decide(&ctx, &make_waypoint(), &outcomes).await;

        assert_eq!(decision.winner, "music");
        assert!(decision.tie_breaker_applied);
    }
}
