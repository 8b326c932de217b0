use serde::{Deserialize, Serialize};

use super::interaction::InteractionRecord;
use super::knowledge::KnowledgeBase;

/// Running counters over every recorded interaction. Lives in memory only;
/// the persisted document holds knowledge, not statistics.
#[derive(Debug, Clone, Default)]
pub struct MetricsTracker {
    total_interactions: u64,
    positive_feedback: u64,
    negative_feedback: u64,
    avg_confidence: f64,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one interaction, classifying its rating. Ratings of 3 (or no
    /// feedback at all) only move the total.
    pub fn observe(&mut self, record: &InteractionRecord) {
        self.total_interactions += 1;
        if record.is_positive() {
            self.positive_feedback += 1;
        } else if record.is_negative() {
            self.negative_feedback += 1;
        }
    }

    /// Replace the running average with the mean confidence of the most
    /// recently extracted buffer.
    pub fn set_avg_confidence(&mut self, avg: f64) {
        self.avg_confidence = avg;
    }

    pub fn total_interactions(&self) -> u64 {
        self.total_interactions
    }

    /// Share of interactions with positive feedback, as a percentage
    /// rounded to two decimals. Zero when nothing was recorded.
    pub fn success_rate(&self) -> f64 {
        if self.total_interactions == 0 {
            return 0.0;
        }
        round2(self.positive_feedback as f64 / self.total_interactions as f64 * 100.0)
    }

    pub fn summary(&self, knowledge: &KnowledgeBase) -> PerformanceSummary {
        PerformanceSummary {
            total_interactions: self.total_interactions,
            positive_feedback_count: self.positive_feedback,
            negative_feedback_count: self.negative_feedback,
            success_rate: self.success_rate(),
            avg_confidence: round2(self.avg_confidence),
            best_practices_learned: knowledge.best_practices.len(),
            improvements_identified: knowledge.improvements.len(),
        }
    }
}

/// Snapshot of learning performance for health and stats reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_interactions: u64,
    pub positive_feedback_count: u64,
    pub negative_feedback_count: u64,
    pub success_rate: f64,
    pub avg_confidence: f64,
    pub best_practices_learned: usize,
    pub improvements_identified: usize,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::interaction::Feedback;

    fn record(rating: Option<u8>, confidence: f64) -> InteractionRecord {
        InteractionRecord::new(
            "query".to_string(),
            "response".to_string(),
            rating.map(|r| Feedback { rating: r, comment: None }),
            confidence,
        )
    }

    #[test]
    fn test_empty_tracker_summary_is_zero() {
        let tracker = MetricsTracker::new();
        let summary = tracker.summary(&KnowledgeBase::default());

        assert_eq!(summary.total_interactions, 0);
        assert_eq!(summary.success_rate, 0.0);
        assert_eq!(summary.avg_confidence, 0.0);
    }

    #[test]
    fn test_rating_rule() {
        let mut tracker = MetricsTracker::new();
        tracker.observe(&record(Some(5), 0.9));
        tracker.observe(&record(Some(4), 0.9));
        tracker.observe(&record(Some(3), 0.9));
        tracker.observe(&record(Some(2), 0.9));
        tracker.observe(&record(None, 0.9));

        let summary = tracker.summary(&KnowledgeBase::default());
        assert_eq!(summary.total_interactions, 5);
        assert_eq!(summary.positive_feedback_count, 2);
        assert_eq!(summary.negative_feedback_count, 1);
    }

    #[test]
    fn test_success_rate_rounds_to_two_decimals() {
        let mut tracker = MetricsTracker::new();
        tracker.observe(&record(Some(5), 0.9));
        tracker.observe(&record(Some(3), 0.9));
        tracker.observe(&record(Some(3), 0.9));

        // 1/3 * 100 = 33.333...
        assert_eq!(tracker.success_rate(), 33.33);
    }

    #[test]
    fn test_summary_folds_in_knowledge_counts() {
        use super::super::knowledge::{BestPractice, Improvement};
        use chrono::Utc;

        let mut knowledge = KnowledgeBase::default();
        knowledge.best_practices.push(BestPractice {
            pattern: "p".to_string(),
            discovered: Utc::now(),
            success_count: 1,
        });
        knowledge
            .improvements
            .push(Improvement { issue: "i".to_string(), identified: Utc::now() });

        let summary = MetricsTracker::new().summary(&knowledge);
        assert_eq!(summary.best_practices_learned, 1);
        assert_eq!(summary.improvements_identified, 1);
    }

    #[test]
    fn test_avg_confidence_rounded_for_display() {
        let mut tracker = MetricsTracker::new();
        tracker.set_avg_confidence(0.8567);
        assert_eq!(tracker.summary(&KnowledgeBase::default()).avg_confidence, 0.86);
    }
}
