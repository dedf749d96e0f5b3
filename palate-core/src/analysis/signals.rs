//! Text signal extraction: sentiment, emotion, summary, keywords, entities
//!
//! Sentiment and keyword extraction run locally. Emotion classification and
//! summarization are external calls joined concurrently under one timeout
//! each; if either fails the whole signal degrades to
//! [`TextSignal::unavailable`].

use crate::analysis::keywords;
use crate::analysis::lexicon::{LexiconScorer, SentimentScorer};
use crate::analysis::types::{SentimentLabel, TextSignal};
use crate::config::ServicesConfig;
use crate::config::constants::{defaults, messages, thresholds};
use crate::llm::services::{EmotionClassifier, Summarizer, bounded};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Whether `text` is long enough to be worth scoring and sending out.
pub fn is_substantive(text: &str) -> bool {
    text.trim().chars().count() >= thresholds::MIN_TEXT_CHARS
}

#[derive(Clone)]
pub struct TextSignalExtractor {
    scorer: Arc<dyn SentimentScorer>,
    emotions: Arc<dyn EmotionClassifier>,
    summarizer: Arc<dyn Summarizer>,
    timeout: Duration,
    summary_max_length: u32,
}

impl TextSignalExtractor {
    pub fn new(emotions: Arc<dyn EmotionClassifier>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            scorer: Arc::new(LexiconScorer::new()),
            emotions,
            summarizer,
            timeout: Duration::from_millis(defaults::SERVICE_TIMEOUT_MS),
            summary_max_length: defaults::SUMMARY_MAX_LENGTH,
        }
    }

    pub fn from_config(
        config: &ServicesConfig,
        emotions: Arc<dyn EmotionClassifier>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self::new(emotions, summarizer)
            .with_timeout(config.timeout())
            .with_summary_max_length(config.summary_max_length)
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn SentimentScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_summary_max_length(mut self, max_length: u32) -> Self {
        self.summary_max_length = max_length;
        self
    }

    pub fn scorer(&self) -> &Arc<dyn SentimentScorer> {
        &self.scorer
    }

    /// Never fails: short text yields [`TextSignal::insufficient`], a service
    /// failure yields [`TextSignal::unavailable`].
    pub async fn extract(&self, text: &str) -> TextSignal {
        if !is_substantive(text) {
            debug!(chars = text.trim().chars().count(), "text too short for analysis");
            return TextSignal::insufficient();
        }
        let trimmed = text.trim();

        let sentiment_score = self.scorer.score(trimmed);

        let outcome = tokio::try_join!(
            bounded("emotion", self.timeout, self.emotions.classify(trimmed)),
            bounded(
                "summary",
                self.timeout,
                self.summarizer.summarize(trimmed, self.summary_max_length)
            ),
        );

        let (emotions, summary) = match outcome {
            Ok(pair) => pair,
            Err(err) => {
                warn!(error = %err, "language services failed; using neutral signal");
                return TextSignal::unavailable();
            }
        };

        let dominant_emotion = emotions
            .into_iter()
            .next()
            .map(|e| e.label)
            .unwrap_or_else(|| messages::NEUTRAL_EMOTION.to_string());
        let extraction = keywords::extract(trimmed);

        TextSignal {
            sentiment_score,
            sentiment_label: SentimentLabel::from_score(sentiment_score),
            dominant_emotion,
            summary: summary.text,
            keywords: extraction.keywords,
            entities: extraction.entities,
            is_error: false,
        }
    }
}
