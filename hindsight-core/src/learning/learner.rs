use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, error, warn};

use crate::config::LearningConfig;

use super::consolidate::{ConsolidationEngine, ConsolidationReport};
use super::extractor::InsightExtractor;
use super::interaction::{Feedback, InteractionRecord, MAX_RATING, MIN_RATING};
use super::knowledge::{KnowledgeBase, KnowledgeStore};
use super::metrics::{MetricsTracker, PerformanceSummary};
use super::retriever::{KnowledgeRetriever, RelevantKnowledge};
use super::{LearnError, Result};

/// One learner instance per process. Construct it at startup and hand it
/// to every consumer; there is no global accessor. Hosts with concurrent
/// callers should wrap it in [`SharedLearner`].
pub struct SelfLearner {
    config: LearningConfig,
    store: KnowledgeStore,
    knowledge: KnowledgeBase,
    buffer: Vec<InteractionRecord>,
    step_counter: u32,
    metrics: MetricsTracker,
    extractor: InsightExtractor,
    consolidation: ConsolidationEngine,
    retriever: KnowledgeRetriever,
}

impl SelfLearner {
    /// Build a learner over the configured knowledge document, picking up
    /// whatever previous runs persisted.
    pub fn new(config: LearningConfig) -> Self {
        let store = KnowledgeStore::new(config.knowledge_path.clone());
        let knowledge = store.load();
        debug!(
            best_practices = knowledge.best_practices.len(),
            improvements = knowledge.improvements.len(),
            "self-learner initialized"
        );

        Self {
            store,
            knowledge,
            buffer: Vec::new(),
            step_counter: 0,
            metrics: MetricsTracker::new(),
            extractor: InsightExtractor::new(),
            consolidation: ConsolidationEngine::new(),
            retriever: KnowledgeRetriever::new(),
            config,
        }
    }

    /// Log one completed exchange. An empty query or response and an
    /// out-of-range rating are rejected before anything enters the buffer;
    /// out-of-range confidence is clamped into [0, 1]. Every
    /// `learning_interval` calls this triggers a synchronous learning
    /// cycle including one disk write; failures on that path are logged
    /// and never surface to the caller.
    pub fn record(
        &mut self,
        query: &str,
        response: &str,
        feedback: Option<Feedback>,
        confidence: f64,
    ) -> Result<()> {
        if query.trim().is_empty() {
            return Err(LearnError::Validation { message: "query must not be empty".to_string() });
        }
        if response.trim().is_empty() {
            return Err(LearnError::Validation {
                message: "response must not be empty".to_string(),
            });
        }
        if let Some(feedback) = &feedback {
            if !(MIN_RATING..=MAX_RATING).contains(&feedback.rating) {
                return Err(LearnError::Validation {
                    message: format!(
                        "rating {} outside {MIN_RATING}-{MAX_RATING}",
                        feedback.rating
                    ),
                });
            }
        }

        if !self.config.enabled {
            debug!("learning disabled, interaction dropped");
            return Ok(());
        }

        let confidence = if (0.0..=1.0).contains(&confidence) {
            confidence
        } else {
            let clamped = confidence.clamp(0.0, 1.0);
            warn!(confidence, clamped, "confidence outside [0, 1], clamping");
            clamped
        };

        let record = InteractionRecord::new(
            query.to_string(),
            response.to_string(),
            feedback,
            confidence,
        );
        debug!(id = %record.id, "interaction buffered");
        self.metrics.observe(&record);
        self.buffer.push(record);

        self.step_counter += 1;
        if self.step_counter >= self.config.learning_interval {
            if let Err(e) = self.run_learning_cycle() {
                error!("learning cycle failed: {e}");
            }
            // The counter resets whether or not the cycle went through.
            self.step_counter = 0;
        }

        Ok(())
    }

    /// One extraction cycle: mine the buffer into the knowledge base,
    /// persist, clear the buffer. A failed save leaves the buffer in place
    /// so the next cycle can pick those interactions up again; the
    /// in-memory document keeps the new insights either way.
    fn run_learning_cycle(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let outcome = self.extractor.extract(&self.buffer, &mut self.knowledge);
        if let Some(avg) = outcome.avg_confidence {
            self.metrics.set_avg_confidence(avg);
        }

        self.store.save(&self.knowledge)?;
        self.buffer.clear();
        Ok(())
    }

    /// Read-only knowledge lookup for context augmentation.
    pub fn retrieve(&self, query: &str) -> RelevantKnowledge {
        self.retriever.retrieve(&self.knowledge, query)
    }

    /// Current performance counters and knowledge totals.
    pub fn summary(&self) -> PerformanceSummary {
        self.metrics.summary(&self.knowledge)
    }

    /// Deduplicate best practices, persist, and run the advisory
    /// retraining review. Unlike the record path, a persistence failure
    /// here surfaces to the caller: consolidation is an explicit
    /// maintenance call, not part of serving an interaction.
    pub fn consolidate(&mut self) -> Result<ConsolidationReport> {
        let duplicates_removed = self.consolidation.consolidate(&mut self.knowledge);
        self.store.save(&self.knowledge)?;
        let retraining_advised = self.consolidation.review_for_retraining(&self.summary());
        Ok(ConsolidationReport { duplicates_removed, retraining_advised })
    }

    /// The current in-memory knowledge document.
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    #[cfg(test)]
    pub(crate) fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    #[cfg(test)]
    pub(crate) fn step_counter(&self) -> u32 {
        self.step_counter
    }
}

/// Cloneable handle for hosts that call in from several threads. Writes
/// (`record`, `consolidate`) hold the lock across the whole
/// buffer/counter/trigger region, so no interaction is lost and
/// extraction fires exactly once per threshold crossing; reads run
/// concurrently and never observe a half-written document. A poisoned
/// lock is absorbed rather than wedging the serving path.
#[derive(Clone)]
pub struct SharedLearner {
    inner: Arc<RwLock<SelfLearner>>,
}

impl SharedLearner {
    pub fn new(config: LearningConfig) -> Self {
        Self { inner: Arc::new(RwLock::new(SelfLearner::new(config))) }
    }

    pub fn record(
        &self,
        query: &str,
        response: &str,
        feedback: Option<Feedback>,
        confidence: f64,
    ) -> Result<()> {
        self.write().record(query, response, feedback, confidence)
    }

    pub fn retrieve(&self, query: &str) -> RelevantKnowledge {
        self.read().retrieve(query)
    }

    pub fn summary(&self) -> PerformanceSummary {
        self.read().summary()
    }

    pub fn consolidate(&self) -> Result<ConsolidationReport> {
        self.write().consolidate()
    }

    fn read(&self) -> RwLockReadGuard<'_, SelfLearner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SelfLearner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
