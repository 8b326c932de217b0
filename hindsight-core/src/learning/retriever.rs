use serde::{Deserialize, Serialize};

use super::knowledge::{BestPractice, KnowledgeBase};

/// Read-only lookup of learned knowledge for context augmentation.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeRetriever;

/// Knowledge relevant to one query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelevantKnowledge {
    pub best_practices: Vec<BestPractice>,
    /// Stable placeholder in the response shape; nothing fills it yet.
    pub similar_patterns: Vec<String>,
}

impl KnowledgeRetriever {
    pub fn new() -> Self {
        Self
    }

    /// Return every best practice whose pattern mentions any whitespace
    /// token of the query, case-insensitively. No ranking or scoring.
    pub fn retrieve(&self, knowledge: &KnowledgeBase, query: &str) -> RelevantKnowledge {
        let query = query.to_lowercase();
        let tokens: Vec<&str> = query.split_whitespace().collect();

        let best_practices = knowledge
            .best_practices
            .iter()
            .filter(|practice| {
                let pattern = practice.pattern.to_lowercase();
                tokens.iter().any(|token| pattern.contains(token))
            })
            .cloned()
            .collect();

        RelevantKnowledge { best_practices, similar_patterns: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn knowledge_with(patterns: &[&str]) -> KnowledgeBase {
        let mut knowledge = KnowledgeBase::default();
        for pattern in patterns {
            knowledge.best_practices.push(BestPractice {
                pattern: pattern.to_string(),
                discovered: Utc::now(),
                success_count: 1,
            });
        }
        knowledge
    }

    #[test]
    fn test_any_token_matches_as_substring() {
        let knowledge = knowledge_with(&[
            "Queries about 'weather' tend to be successful",
            "Queries about 'deploy' tend to be successful",
        ]);

        let relevant =
            KnowledgeRetriever::new().retrieve(&knowledge, "Is the WEATHER nice today");
        assert_eq!(relevant.best_practices.len(), 1);
        assert!(relevant.best_practices[0].pattern.contains("weather"));
    }

    #[test]
    fn test_short_tokens_still_match_on_retrieval() {
        // Unlike mining, retrieval applies no token-length floor.
        let knowledge = knowledge_with(&["Queries about 'api' tend to be successful"]);

        let relevant = KnowledgeRetriever::new().retrieve(&knowledge, "api");
        assert_eq!(relevant.best_practices.len(), 1);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let knowledge = knowledge_with(&["Queries about 'weather' tend to be successful"]);

        let relevant = KnowledgeRetriever::new().retrieve(&knowledge, "kubernetes rollout");
        assert!(relevant.best_practices.is_empty());
    }

    #[test]
    fn test_similar_patterns_placeholder_stays_empty() {
        let knowledge = knowledge_with(&["Queries about 'weather' tend to be successful"]);

        let relevant = KnowledgeRetriever::new().retrieve(&knowledge, "weather");
        assert!(relevant.similar_patterns.is_empty());
    }
}
