use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest rating a user can give.
pub const MIN_RATING: u8 = 1;
/// Highest rating a user can give.
pub const MAX_RATING: u8 = 5;
/// Ratings at or above this count as positive feedback.
pub const POSITIVE_RATING: u8 = 4;
/// Ratings at or below this count as negative feedback.
pub const NEGATIVE_RATING: u8 = 2;

/// One logged exchange between a user and the assistant. Immutable once
/// created; feedback attaches at record time or not at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub id: Uuid,
    pub query: String,
    pub response: String,
    pub feedback: Option<Feedback>,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

/// User feedback on a single response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    /// Rating on a 1-5 scale.
    pub rating: u8,
    pub comment: Option<String>,
}

impl InteractionRecord {
    pub fn new(
        query: String,
        response: String,
        feedback: Option<Feedback>,
        confidence: f64,
    ) -> Self {
        Self { id: Uuid::new_v4(), query, response, feedback, confidence, timestamp: Utc::now() }
    }

    /// Rated 4 or above.
    pub fn is_positive(&self) -> bool {
        self.feedback.as_ref().is_some_and(|f| f.rating >= POSITIVE_RATING)
    }

    /// Rated 2 or below.
    pub fn is_negative(&self) -> bool {
        self.feedback.as_ref().is_some_and(|f| f.rating <= NEGATIVE_RATING)
    }
}
