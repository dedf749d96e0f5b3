//! Palate Core Library
//!
//! Customer feedback analysis for restaurant kitchens. Given a customer's
//! rating and comment history, the crate produces:
//!
//! - a cached per-customer analysis (statistics, sentiment, emotion, summary,
//!   keywords, food entities and rule-based recommendations),
//! - a per-order note with a preparation priority and advisor text,
//! - a one-off analysis of a single comment.
//!
//! ## Architecture
//!
//! - **Local first**: statistics, sentiment and keyword extraction never
//!   leave the process.
//! - **Bounded external calls**: emotion, summary and advisor calls each run
//!   under a timeout and degrade to neutral defaults on failure.
//! - **Owned cache**: analyses are cached per customer with a TTL, and
//!   concurrent misses for one customer share a single computation.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod llm;
pub mod repository;

pub use analysis::{
    AnalysisCache, AnalysisError, FeedbackAnalysisOrchestrator, FeedbackRecord,
    ItemFeedbackAnalysis, ItemFeedbackAnalyzer, OrderRiskAnalyzer, OrderRiskNote, OrderedItem,
    Priority, RecommendationSynthesizer, SentimentLabel, TextSignal, TextSignalExtractor,
    UserFeedbackAnalysis,
};
pub use config::{ConfigManager, PalateConfig};
pub use engine::{EngineServices, FeedbackEngine};
pub use llm::ServiceError;
pub use repository::{
    FeedbackRepository, InMemoryFeedbackRepository, JsonFileFeedbackRepository, RepositoryError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_engine_from_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let repository = Arc::new(JsonFileFeedbackRepository::new(
            temp_dir.path().join("feedback.json"),
        ));
        let config = PalateConfig {
            advisor: config::AdvisorConfig {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };

        let engine = FeedbackEngine::from_config(&config, repository).unwrap();
        assert!(engine.cache().is_some());

        // Missing feedback file is a storage failure, reported as a flagged default.
        let analysis = engine.analyze("c-1").await;
        assert!(analysis.is_error);
        assert_eq!(analysis.recommendations, vec!["Standard preparation recommended"]);
    }

    #[test]
    fn test_error_display() {
        let err = AnalysisError::InvalidInput("customer id must not be blank".to_string());
        assert!(err.to_string().contains("customer id"));

        let err = ServiceError::Timeout {
            service: "emotion",
            millis: 250,
        };
        assert_eq!(err.to_string(), "emotion timed out after 250ms");
    }
}
