use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use tracing::info;

use super::interaction::InteractionRecord;
use super::knowledge::{BestPractice, Improvement, KnowledgeBase};

/// Query tokens must be longer than this to qualify as patterns.
const TOKEN_LENGTH_FLOOR: usize = 3;

/// Share of the successful set a token must reach to qualify.
const PATTERN_FREQUENCY_THRESHOLD: f64 = 0.3;

/// Confidence below this counts as a low-confidence response.
const LOW_CONFIDENCE: f64 = 0.5;

/// Share of the failed set below `LOW_CONFIDENCE` that triggers the
/// training-data improvement.
const LOW_CONFIDENCE_SHARE: f64 = 0.5;

pub(crate) const LOW_CONFIDENCE_IMPROVEMENT: &str =
    "Many responses have low confidence - need better training data";

/// Mines a full interaction buffer into best practices and improvements.
/// The token-length and frequency rules are the observable contract of
/// this extractor; keep them stable.
#[derive(Debug, Clone, Default)]
pub struct InsightExtractor;

/// What one learning cycle produced.
#[derive(Debug, Clone, Default)]
pub struct ExtractionOutcome {
    pub new_best_practices: usize,
    pub new_improvements: usize,
    /// Mean confidence over the whole buffer; `None` when the buffer was
    /// empty and the previous average should stand.
    pub avg_confidence: Option<f64>,
}

impl InsightExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Mine one buffer into the knowledge base. Mutates the document only;
    /// persistence and buffer clearing belong to the caller. No-op on an
    /// empty buffer.
    pub fn extract(
        &self,
        buffer: &[InteractionRecord],
        knowledge: &mut KnowledgeBase,
    ) -> ExtractionOutcome {
        if buffer.is_empty() {
            return ExtractionOutcome::default();
        }

        let successful: Vec<&InteractionRecord> =
            buffer.iter().filter(|r| r.is_positive()).collect();
        let failed: Vec<&InteractionRecord> = buffer.iter().filter(|r| r.is_negative()).collect();

        let new_best_practices = mine_patterns(&successful, knowledge);
        let new_improvements = mine_improvements(&failed, knowledge);

        let total: f64 = buffer.iter().map(|r| r.confidence).sum();
        let avg_confidence = total / buffer.len() as f64;

        info!(
            interactions = buffer.len(),
            successful = successful.len(),
            failed = failed.len(),
            new_best_practices,
            new_improvements,
            "insights extracted"
        );

        ExtractionOutcome {
            new_best_practices,
            new_improvements,
            avg_confidence: Some(avg_confidence),
        }
    }
}

/// Frequency-mine the successful queries for recurring tokens and append
/// each new one as a best practice. Returns how many were added.
fn mine_patterns(successful: &[&InteractionRecord], knowledge: &mut KnowledgeBase) -> usize {
    if successful.is_empty() {
        return 0;
    }

    // BTreeMap keeps emission order deterministic across runs.
    let mut token_counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in successful {
        for token in record.query.to_lowercase().split_whitespace() {
            if token.chars().count() > TOKEN_LENGTH_FLOOR {
                *token_counts.entry(token.to_string()).or_default() += 1;
            }
        }
    }

    let known: HashSet<String> =
        knowledge.best_practices.iter().map(|p| p.pattern.clone()).collect();
    let threshold = PATTERN_FREQUENCY_THRESHOLD * successful.len() as f64;
    let now = Utc::now();
    let mut added = 0;

    for (token, count) in &token_counts {
        if (*count as f64) < threshold {
            continue;
        }

        let pattern = format!("Queries about '{token}' tend to be successful");
        if known.contains(&pattern) {
            continue;
        }

        let success_count = successful
            .iter()
            .filter(|r| r.query.to_lowercase().contains(token.as_str()))
            .count() as u64;

        knowledge.best_practices.push(BestPractice { pattern, discovered: now, success_count });
        added += 1;
    }

    added
}

/// Turn failed-set feedback comments into improvement entries, plus the
/// aggregate low-confidence signal. Returns how many were added.
fn mine_improvements(failed: &[&InteractionRecord], knowledge: &mut KnowledgeBase) -> usize {
    if failed.is_empty() {
        return 0;
    }

    let now = Utc::now();
    let mut added = 0;

    for record in failed {
        let comment = record.feedback.as_ref().and_then(|f| f.comment.as_deref()).unwrap_or("");
        if comment.is_empty() {
            continue;
        }
        knowledge
            .improvements
            .push(Improvement { issue: format!("User feedback: {comment}"), identified: now });
        added += 1;
    }

    let low = failed.iter().filter(|r| r.confidence < LOW_CONFIDENCE).count();
    if low as f64 / failed.len() as f64 > LOW_CONFIDENCE_SHARE {
        knowledge
            .improvements
            .push(Improvement { issue: LOW_CONFIDENCE_IMPROVEMENT.to_string(), identified: now });
        added += 1;
    }

    added
}
