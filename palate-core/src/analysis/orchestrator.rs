//! Per-customer feedback analysis
//!
//! `analyze` is total: it never fails, it degrades. Storage failures and
//! service failures produce flagged defaults that are never cached, so the
//! next call tries again.

use crate::analysis::cache::{AnalysisCache, Computed};
use crate::analysis::recommendations::RecommendationSynthesizer;
use crate::analysis::signals::TextSignalExtractor;
use crate::analysis::statistics;
use crate::analysis::types::{FeedbackRecord, UserFeedbackAnalysis};
use crate::config::constants::contexts;
use crate::repository::FeedbackRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct FeedbackAnalysisOrchestrator {
    repository: Arc<dyn FeedbackRepository>,
    extractor: TextSignalExtractor,
    synthesizer: Arc<RecommendationSynthesizer>,
    cache: Option<Arc<AnalysisCache>>,
}

impl FeedbackAnalysisOrchestrator {
    pub fn new(repository: Arc<dyn FeedbackRepository>, extractor: TextSignalExtractor) -> Self {
        Self {
            repository,
            extractor,
            synthesizer: Arc::new(RecommendationSynthesizer::default()),
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<AnalysisCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: RecommendationSynthesizer) -> Self {
        self.synthesizer = Arc::new(synthesizer);
        self
    }

    pub fn cache(&self) -> Option<&Arc<AnalysisCache>> {
        self.cache.as_ref()
    }

    pub async fn analyze(&self, customer_id: &str) -> UserFeedbackAnalysis {
        match &self.cache {
            Some(cache) => {
                cache
                    .get_or_compute(customer_id, || self.compute(customer_id))
                    .await
            }
            None => self.compute(customer_id).await.value,
        }
    }

    async fn compute(&self, customer_id: &str) -> Computed<UserFeedbackAnalysis> {
        let records = match self.repository.records_for_customer(customer_id).await {
            Ok(records) => records,
            Err(err) => {
                warn!(customer_id, error = %err, "failed to load feedback history");
                return Computed::transient(UserFeedbackAnalysis {
                    is_error: true,
                    ..UserFeedbackAnalysis::no_history(customer_id)
                });
            }
        };

        if records.is_empty() {
            info!(customer_id, "no feedback history");
            return Computed::transient(UserFeedbackAnalysis::no_history(customer_id));
        }

        let text = combined_comments(&records);
        let (stats, signal) = tokio::join!(
            async { statistics::aggregate(&records) },
            self.extractor.extract(&text)
        );

        let statistics = match stats {
            Ok(stats) => stats,
            Err(err) => {
                warn!(customer_id, error = %err, "statistics unavailable");
                return Computed::transient(UserFeedbackAnalysis::no_history(customer_id));
            }
        };

        let recommendations =
            self.synthesizer
                .synthesize(&text, &signal, contexts::USER_PREFERENCES);
        let degraded = signal.is_error;

        let analysis = UserFeedbackAnalysis {
            customer_id: customer_id.to_string(),
            signal,
            statistics,
            recommendations,
            analyzed_at: Utc::now(),
            is_error: degraded,
        };

        info!(
            customer_id,
            total_feedback = analysis.statistics.total_feedback,
            sentiment = %analysis.sentiment(),
            degraded,
            "feedback analysis complete"
        );

        if degraded {
            Computed::transient(analysis)
        } else {
            Computed::cacheable(analysis)
        }
    }
}

/// Non-empty comments joined by a single space
pub fn combined_comments(records: &[FeedbackRecord]) -> String {
    records
        .iter()
        .map(|r| r.comment.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{RatingTrend, SentimentLabel};
    use crate::llm::services::{
        EmotionClassifier, EmotionScore, ServiceError, Summarizer, Summary,
    };
    use crate::repository::{InMemoryFeedbackRepository, RepositoryError};
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Joyful;

    #[async_trait]
    impl EmotionClassifier for Joyful {
        async fn classify(&self, _text: &str) -> Result<Vec<EmotionScore>, ServiceError> {
            Ok(vec![EmotionScore {
                label: "joy".to_string(),
                confidence: 0.9,
            }])
        }
    }

    #[derive(Default)]
    struct CountingSummarizer {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Summarizer for CountingSummarizer {
        async fn summarize(&self, _text: &str, _max_length: u32) -> Result<Summary, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ServiceError::Network("connection reset".to_string()));
            }
            Ok(Summary {
                text: "Enjoys the pasta".to_string(),
            })
        }
    }

    struct BrokenRepository;

    #[async_trait]
    impl FeedbackRepository for BrokenRepository {
        async fn records_for_customer(
            &self,
            _customer_id: &str,
        ) -> Result<Vec<FeedbackRecord>, RepositoryError> {
            Err(RepositoryError::Unavailable("database offline".to_string()))
        }
    }

    fn record(item: &str, comment: &str, rating: u8, day: i64) -> FeedbackRecord {
        FeedbackRecord {
            customer_id: "c-1".to_string(),
            food_item_id: format!("id-{item}"),
            food_item_name: item.to_string(),
            category: Some("Italian".to_string()),
            dietary_tags: Default::default(),
            comment: comment.to_string(),
            rating,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap() + Duration::days(day),
        }
    }

    fn orchestrator(
        repository: Arc<dyn FeedbackRepository>,
        summarizer: Arc<CountingSummarizer>,
    ) -> FeedbackAnalysisOrchestrator {
        let extractor = TextSignalExtractor::new(Arc::new(Joyful), summarizer);
        FeedbackAnalysisOrchestrator::new(repository, extractor).with_cache(Arc::new(
            AnalysisCache::new(std::time::Duration::from_secs(60), 16),
        ))
    }

    #[test]
    fn test_combined_comments_skip_blank() {
        let records = vec![
            record("Pasta", " Great pasta ", 5, 0),
            record("Soup", "", 3, 1),
            record("Cake", "nice cake", 4, 2),
        ];
        assert_eq!(combined_comments(&records), "Great pasta nice cake");
    }

    #[tokio::test]
    async fn test_analysis_merges_statistics_and_signal() {
        let repo = Arc::new(InMemoryFeedbackRepository::with_records(vec![
            record("Pasta", "Delicious pasta", 4, 0),
            record("Lasagna", "Great lasagna, loved it", 5, 1),
        ]));
        let summarizer = Arc::new(CountingSummarizer::default());
        let analysis = orchestrator(repo, summarizer).analyze("c-1").await;

        assert!(!analysis.is_error);
        assert_eq!(analysis.statistics.total_feedback, 2);
        assert_eq!(analysis.trend(), RatingTrend::Improving);
        // nine valence points over six tokens
        assert_eq!(analysis.sentiment(), SentimentLabel::Positive);
        assert_eq!(analysis.signal.summary, "Enjoys the pasta");
        assert_eq!(
            analysis.recommendations[..2],
            [
                "Consider customer preferences when preparing their order",
                "Customer has generally positive feedback - maintain quality",
            ]
        );
    }

    #[tokio::test]
    async fn test_cached_analysis_is_reused() {
        let repo = Arc::new(InMemoryFeedbackRepository::with_records(vec![record(
            "Pasta",
            "Delicious pasta",
            4,
            0,
        )]));
        let summarizer = Arc::new(CountingSummarizer::default());
        let orchestrator = orchestrator(repo, summarizer.clone());

        let first = orchestrator.analyze("c-1").await;
        let second = orchestrator.analyze("c-1").await;
        assert_eq!(first.analyzed_at, second.analyzed_at);
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_degraded_analysis_is_not_cached() {
        let repo = Arc::new(InMemoryFeedbackRepository::with_records(vec![record(
            "Pasta",
            "Cold and bland pasta",
            2,
            0,
        )]));
        let summarizer = Arc::new(CountingSummarizer {
            fail: true,
            ..Default::default()
        });
        let orchestrator = orchestrator(repo, summarizer.clone());

        let analysis = orchestrator.analyze("c-1").await;
        assert!(analysis.is_error);
        assert_eq!(analysis.sentiment(), SentimentLabel::Neutral);
        assert!(!analysis.recommendations.is_empty());
        assert_eq!(analysis.statistics.total_feedback, 1);

        orchestrator.analyze("c-1").await;
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_repository_failure_is_flagged_default() {
        let summarizer = Arc::new(CountingSummarizer::default());
        let orchestrator = orchestrator(Arc::new(BrokenRepository), summarizer);

        let analysis = orchestrator.analyze("c-9").await;
        assert!(analysis.is_error);
        assert_eq!(analysis.recommendations, vec!["Standard preparation recommended"]);
        assert_eq!(analysis.trend(), RatingTrend::Unknown);
        let stats = orchestrator.cache().unwrap().stats().await;
        assert_eq!(stats.entries, 0);
    }

    #[tokio::test]
    async fn test_no_history_default() {
        let summarizer = Arc::new(CountingSummarizer::default());
        let orchestrator =
            orchestrator(Arc::new(InMemoryFeedbackRepository::new()), summarizer.clone());

        let analysis = orchestrator.analyze("nobody").await;
        assert!(!analysis.is_error);
        assert_eq!(
            analysis.signal.summary,
            "No previous feedback available for this customer"
        );
        assert_eq!(analysis.average_rating(), 0.0);
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    }
}
