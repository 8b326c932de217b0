use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::knowledge::KnowledgeBase;
use super::metrics::PerformanceSummary;

/// Interactions required before the retraining review has enough signal.
const RETRAINING_MIN_INTERACTIONS: u64 = 100;

/// Success rate (percent) below which retraining is advised.
const RETRAINING_SUCCESS_FLOOR: f64 = 70.0;

/// Deduplication and advisory review over the knowledge base.
#[derive(Debug, Clone, Default)]
pub struct ConsolidationEngine;

/// Outcome of one consolidation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationReport {
    pub duplicates_removed: usize,
    pub retraining_advised: bool,
}

impl ConsolidationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Drop best practices whose pattern string already appeared earlier in
    /// the list; the first occurrence wins. Returns how many entries were
    /// removed. Idempotent.
    pub fn consolidate(&self, knowledge: &mut KnowledgeBase) -> usize {
        let before = knowledge.best_practices.len();
        let mut seen = HashSet::new();
        knowledge.best_practices.retain(|p| seen.insert(p.pattern.clone()));

        let removed = before - knowledge.best_practices.len();
        if removed > 0 {
            info!(removed, "consolidated duplicate best practices");
        }
        removed
    }

    /// Advisory only: flag when accumulated feedback suggests the model
    /// behind the assistant should be fine-tuned. Nothing is retrained
    /// here and nothing blocks on the answer.
    pub fn review_for_retraining(&self, summary: &PerformanceSummary) -> bool {
        let advised = summary.total_interactions > RETRAINING_MIN_INTERACTIONS
            && summary.success_rate < RETRAINING_SUCCESS_FLOOR;
        if advised {
            warn!(
                success_rate = summary.success_rate,
                total_interactions = summary.total_interactions,
                "success rate below target, consider fine-tuning"
            );
        }
        advised
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::knowledge::BestPractice;
    use chrono::Utc;
    use proptest::prelude::*;

    fn practice(pattern: &str, success_count: u64) -> BestPractice {
        BestPractice { pattern: pattern.to_string(), discovered: Utc::now(), success_count }
    }

    fn summary(total: u64, positive: u64) -> PerformanceSummary {
        PerformanceSummary {
            total_interactions: total,
            positive_feedback_count: positive,
            negative_feedback_count: 0,
            success_rate: if total == 0 {
                0.0
            } else {
                (positive as f64 / total as f64 * 10_000.0).round() / 100.0
            },
            avg_confidence: 0.0,
            best_practices_learned: 0,
            improvements_identified: 0,
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut knowledge = KnowledgeBase::default();
        knowledge.best_practices.push(practice("a", 1));
        knowledge.best_practices.push(practice("b", 2));
        knowledge.best_practices.push(practice("a", 9));

        let removed = ConsolidationEngine::new().consolidate(&mut knowledge);

        assert_eq!(removed, 1);
        assert_eq!(knowledge.best_practices.len(), 2);
        assert_eq!(knowledge.best_practices[0].success_count, 1);
    }

    #[test]
    fn test_retraining_advised_at_sixty_percent_over_hundred() {
        let engine = ConsolidationEngine::new();
        let s = summary(150, 90);
        assert_eq!(s.success_rate, 60.0);
        assert!(engine.review_for_retraining(&s));
    }

    #[test]
    fn test_retraining_needs_enough_interactions() {
        let engine = ConsolidationEngine::new();
        assert!(!engine.review_for_retraining(&summary(100, 10)));
        assert!(!engine.review_for_retraining(&summary(0, 0)));
    }

    #[test]
    fn test_retraining_not_advised_on_healthy_rate() {
        let engine = ConsolidationEngine::new();
        assert!(!engine.review_for_retraining(&summary(150, 120)));
    }

    proptest! {
        #[test]
        fn prop_no_duplicate_patterns_after_consolidation(
            patterns in proptest::collection::vec("[a-c]{1,2}", 0..24)
        ) {
            let mut knowledge = KnowledgeBase::default();
            for p in &patterns {
                knowledge.best_practices.push(practice(p, 1));
            }

            ConsolidationEngine::new().consolidate(&mut knowledge);

            let unique: std::collections::HashSet<&str> =
                knowledge.best_practices.iter().map(|p| p.pattern.as_str()).collect();
            prop_assert_eq!(unique.len(), knowledge.best_practices.len());
        }

        #[test]
        fn prop_consolidation_is_idempotent(
            patterns in proptest::collection::vec("[a-c]{1,2}", 0..24)
        ) {
            let mut knowledge = KnowledgeBase::default();
            for p in &patterns {
                knowledge.best_practices.push(practice(p, 1));
            }

            let engine = ConsolidationEngine::new();
            engine.consolidate(&mut knowledge);
            let after_once = knowledge.clone();

            let removed = engine.consolidate(&mut knowledge);
            prop_assert_eq!(removed, 0);
            prop_assert_eq!(knowledge, after_once);
        }
    }
}
