//! The learning loop: buffer interactions, extract insights on an interval,
//! persist the knowledge base, and answer read-only queries against it.

pub mod consolidate;
pub mod extractor;
pub mod interaction;
pub mod knowledge;
pub mod learner;
pub mod metrics;
pub mod retriever;


use thiserror::Error;

/// Errors surfaced by the learning core.
#[derive(Debug, Error)]
pub enum LearnError {
    /// Malformed interaction input, rejected before it enters the buffer.
    #[error("invalid interaction: {message}")]
    Validation { message: String },

    /// The knowledge document could not be written.
    #[error("failed to persist knowledge: {0}")]
    Persistence(#[from] std::io::Error),

    /// The knowledge document could not be serialized.
    #[error("failed to serialize knowledge: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Unreadable or invalid configuration.
    #[error("configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, LearnError>;

pub use consolidate::{ConsolidationEngine, ConsolidationReport};
pub use extractor::{ExtractionOutcome, InsightExtractor};
pub use interaction::{Feedback, InteractionRecord};
pub use knowledge::{BestPractice, Improvement, KnowledgeBase, KnowledgeStore};
pub use learner::{SelfLearner, SharedLearner};
pub use metrics::{MetricsTracker, PerformanceSummary};
pub use retriever::{KnowledgeRetriever, RelevantKnowledge};
