//! Kitchen notes for an incoming order
//!
//! Combines the customer's rating history with a generative advisor to tell
//! the kitchen how much care an order needs. Notes are computed fresh on
//! every call.

use crate::analysis::AnalysisError;
use crate::analysis::lexicon::{LexiconScorer, SentimentScorer};
use crate::analysis::statistics::{mean, population_std_dev, round1};
use crate::analysis::types::{
    FeedbackRecord, HistoricalData, OrderRiskNote, OrderedItem, Priority, SentimentDistribution,
    SentimentLabel,
};
use crate::config::AdvisorConfig;
use crate::config::constants::{defaults, messages, prompts, thresholds};
use crate::llm::services::{AdvisorRequest, GenerativeAdvisor, bounded};
use crate::repository::FeedbackRepository;
use chrono::Utc;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Clone)]
pub struct OrderRiskAnalyzer {
    repository: Arc<dyn FeedbackRepository>,
    scorer: Arc<dyn SentimentScorer>,
    advisor: Option<Arc<dyn GenerativeAdvisor>>,
    timeout: Duration,
    max_tokens: u32,
}

impl OrderRiskAnalyzer {
    pub fn new(repository: Arc<dyn FeedbackRepository>) -> Self {
        Self {
            repository,
            scorer: Arc::new(LexiconScorer::new()),
            advisor: None,
            timeout: Duration::from_millis(defaults::SERVICE_TIMEOUT_MS),
            max_tokens: defaults::ADVISOR_MAX_TOKENS,
        }
    }

    pub fn with_advisor(mut self, advisor: Arc<dyn GenerativeAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn SentimentScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_advisor_config(self, config: &AdvisorConfig) -> Self {
        self.with_timeout(config.timeout())
            .with_max_tokens(config.max_tokens)
    }

    pub fn has_advisor(&self) -> bool {
        self.advisor.is_some()
    }

    /// Only malformed input is an error; every other failure becomes a
    /// flagged fallback note.
    pub async fn assess(
        &self,
        customer_id: &str,
        ordered_items: &[OrderedItem],
    ) -> Result<OrderRiskNote, AnalysisError> {
        let customer_id = customer_id.trim();
        if customer_id.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "customer id must not be blank".to_string(),
            ));
        }
        if ordered_items.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "an order needs at least one item".to_string(),
            ));
        }
        if let Some(blank) = ordered_items.iter().position(|i| i.name.trim().is_empty()) {
            return Err(AnalysisError::InvalidInput(format!(
                "ordered item #{} has no name",
                blank + 1
            )));
        }

        let records = match self.repository.records_for_customer(customer_id).await {
            Ok(records) => records,
            Err(err) => {
                warn!(customer_id, error = %err, "failed to load history for order");
                return Ok(OrderRiskNote::fallback(
                    customer_id,
                    HistoricalData::default(),
                ));
            }
        };

        if records.is_empty() {
            return Ok(OrderRiskNote::no_history(customer_id));
        }

        let scores: Vec<f64> = records
            .iter()
            .map(|record| self.scorer.score(&record.comment))
            .collect();
        let historical_data = historical_data(&records, &scores);
        let priority = Priority::from_metrics(
            historical_data.average_rating,
            historical_data.rating_variance,
        );
        let sentiment = SentimentLabel::from_score(mean(&scores));

        let Some(advisor) = &self.advisor else {
            info!(customer_id, %priority, "no advisor configured; using standard note");
            return Ok(OrderRiskNote {
                customer_id: customer_id.to_string(),
                recommendation_text: messages::ORDER_FALLBACK.to_string(),
                priority,
                sentiment,
                historical_data,
                analyzed_at: Utc::now(),
                is_error: false,
            });
        };

        let request = AdvisorRequest {
            system: prompts::ADVISOR_SYSTEM.to_string(),
            prompt: build_prompt(&records, &historical_data, ordered_items),
            max_tokens: self.max_tokens,
        };

        match bounded("advisor", self.timeout, advisor.complete(request)).await {
            Ok(response) if !response.text.trim().is_empty() => {
                info!(customer_id, %priority, %sentiment, "order note generated");
                Ok(OrderRiskNote {
                    customer_id: customer_id.to_string(),
                    recommendation_text: response.text.trim().to_string(),
                    priority,
                    sentiment,
                    historical_data,
                    analyzed_at: Utc::now(),
                    is_error: false,
                })
            }
            Ok(_) => {
                warn!(customer_id, "advisor returned an empty note");
                Ok(OrderRiskNote::fallback(customer_id, historical_data))
            }
            Err(err) => {
                warn!(customer_id, error = %err, "advisor unavailable");
                Ok(OrderRiskNote::fallback(customer_id, historical_data))
            }
        }
    }
}

/// `scores` holds one sentiment score per record, in the same order.
fn historical_data(records: &[FeedbackRecord], scores: &[f64]) -> HistoricalData {
    let ratings: Vec<f64> = records.iter().map(|r| f64::from(r.rating)).collect();

    let mut sentiment_distribution = SentimentDistribution::default();
    for score in scores {
        sentiment_distribution.record(SentimentLabel::from_score(*score));
    }

    HistoricalData {
        average_rating: mean(&ratings),
        rating_variance: population_std_dev(&ratings),
        total_feedback: records.len(),
        sentiment_distribution,
    }
}

/// Advisor prompt: recent history newest first, then the order lines.
pub fn build_prompt(
    records: &[FeedbackRecord],
    history: &HistoricalData,
    ordered_items: &[OrderedItem],
) -> String {
    let mut recent: Vec<&FeedbackRecord> = records.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut prompt = String::from("Customer feedback history (newest first):\n");
    for record in recent.iter().take(thresholds::MAX_PROMPT_HISTORY) {
        let _ = write!(
            prompt,
            "- {} | {} | rated {}/5",
            record.created_at.format("%Y-%m-%d"),
            record.food_item_name,
            record.rating
        );
        if !record.comment.trim().is_empty() {
            let _ = write!(prompt, " | \"{}\"", record.comment.trim());
        }
        prompt.push('\n');
    }

    let _ = writeln!(
        prompt,
        "\nAverage rating: {:.1}/5 over {} reviews (spread {:.1}).",
        round1(history.average_rating),
        history.total_feedback,
        round1(history.rating_variance)
    );
    let _ = writeln!(
        prompt,
        "Comment tone: {} positive, {} neutral, {} negative.",
        history.sentiment_distribution.positive,
        history.sentiment_distribution.neutral,
        history.sentiment_distribution.negative
    );

    prompt.push_str("\nCurrent order:\n");
    for item in ordered_items {
        let _ = write!(prompt, "- {} x {}", item.quantity, item.name.trim());
        if let Some(notes) = item.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            let _ = write!(prompt, " (notes: {notes})");
        }
        prompt.push('\n');
    }

    prompt.push_str("\nHow should the kitchen prepare this order?");
    prompt
}
