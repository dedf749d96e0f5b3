//! Records produced and consumed by the analysis pipeline
//!
//! Wire names are camelCase and enums serialize as snake_case strings so the
//! JSON matches what the order and feedback controllers already expect.

use crate::config::constants::{messages, thresholds};
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One customer's feedback on one food item, owned by the storage collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub customer_id: String,
    pub food_item_id: String,
    pub food_item_name: String,
    /// Records without a category contribute to no category bucket
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub dietary_tags: IndexSet<String>,
    #[serde(default)]
    pub comment: String,
    /// 1..=5
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    pub fn has_valid_rating(&self) -> bool {
        (1..=5).contains(&self.rating)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryNegative,
    Negative,
    #[default]
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentLabel {
    /// Band a lexicon score. All comparisons are strict, so -3 is negative,
    /// 0 and 1 are neutral, and 3 is positive.
    pub fn from_score(score: f64) -> Self {
        if score < -3.0 {
            SentimentLabel::VeryNegative
        } else if score < 0.0 {
            SentimentLabel::Negative
        } else if score > 3.0 {
            SentimentLabel::VeryPositive
        } else if score > 1.0 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, SentimentLabel::Positive | SentimentLabel::VeryPositive)
    }

    pub fn is_negative(self) -> bool {
        matches!(self, SentimentLabel::Negative | SentimentLabel::VeryNegative)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::VeryNegative => "very_negative",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Positive => "positive",
            SentimentLabel::VeryPositive => "very_positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Food-domain terms found in feedback text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntities {
    pub foods: Vec<String>,
    pub ingredients: Vec<String>,
    pub cooking_methods: Vec<String>,
    pub qualities: Vec<String>,
}

impl FoodEntities {
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
            && self.ingredients.is_empty()
            && self.cooking_methods.is_empty()
            && self.qualities.is_empty()
    }
}

/// Text-derived signals of a block of feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSignal {
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub dominant_emotion: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub entities: FoodEntities,
    pub is_error: bool,
}

impl TextSignal {
    /// Signal for empty or too-short text
    pub fn insufficient() -> Self {
        Self::neutral(messages::NO_SUBSTANTIVE_FEEDBACK, false)
    }

    /// Signal used when any external call failed
    pub fn unavailable() -> Self {
        Self::neutral(messages::ANALYSIS_UNAVAILABLE, true)
    }

    fn neutral(summary: &str, is_error: bool) -> Self {
        Self {
            sentiment_score: 0.0,
            sentiment_label: SentimentLabel::Neutral,
            dominant_emotion: messages::NEUTRAL_EMOTION.to_string(),
            summary: summary.to_string(),
            keywords: Vec::new(),
            entities: FoodEntities::default(),
            is_error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStatistics {
    pub average_rating: f64,
    pub positive_count: usize,
    pub negative_count: usize,
    /// Distinct item names rated 4 or 5
    pub preferred_items: Vec<String>,
    /// Distinct item names rated 1 or 2; mixed items appear in both lists
    pub disliked_items: Vec<String>,
    pub rating_distribution: BTreeMap<u8, usize>,
}

impl RatingStatistics {
    pub fn empty() -> Self {
        Self {
            average_rating: 0.0,
            positive_count: 0,
            negative_count: 0,
            preferred_items: Vec::new(),
            disliked_items: Vec::new(),
            rating_distribution: (1..=5).map(|rating| (rating, 0)).collect(),
        }
    }
}

/// Per-category or per-dietary-tag aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStatistic {
    pub key: String,
    pub average_rating: f64,
    /// Distinct food items in the group
    pub item_count: usize,
    pub feedback_count: usize,
}

pub type CategoryStatistic = GroupStatistic;
pub type DietaryStatistic = GroupStatistic;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// First-encountered order
    pub categories: Vec<CategoryStatistic>,
    pub best_category: Option<CategoryStatistic>,
    pub worst_category: Option<CategoryStatistic>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietaryBreakdown {
    pub tags: Vec<DietaryStatistic>,
    pub preferred_tags: Vec<String>,
    pub avoided_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub date: DateTime<Utc>,
    pub rating: u8,
    pub food_item: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTrend {
    Improving,
    Declining,
    Stable,
    /// Only used when there is no history at all
    Unknown,
}

impl RatingTrend {
    pub fn from_slope(slope: f64) -> Self {
        if slope > thresholds::TREND_SLOPE {
            RatingTrend::Improving
        } else if slope < -thresholds::TREND_SLOPE {
            RatingTrend::Declining
        } else {
            RatingTrend::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineTrend {
    /// Ascending by date
    pub points: Vec<TimelinePoint>,
    pub slope: f64,
    pub trend: RatingTrend,
    pub first_feedback_date: Option<DateTime<Utc>>,
    pub last_feedback_date: Option<DateTime<Utc>>,
}

impl TimelineTrend {
    pub fn unknown() -> Self {
        Self {
            points: Vec::new(),
            slope: 0.0,
            trend: RatingTrend::Unknown,
            first_feedback_date: None,
            last_feedback_date: None,
        }
    }
}

/// Everything the statistics aggregator derives from a customer's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStatistics {
    pub ratings: RatingStatistics,
    pub categories: CategoryBreakdown,
    pub dietary: DietaryBreakdown,
    pub timeline: TimelineTrend,
    pub total_feedback: usize,
    pub last_feedback_date: Option<DateTime<Utc>>,
}

impl FeedbackStatistics {
    pub fn empty() -> Self {
        Self {
            ratings: RatingStatistics::empty(),
            categories: CategoryBreakdown::default(),
            dietary: DietaryBreakdown::default(),
            timeline: TimelineTrend::unknown(),
            total_feedback: 0,
            last_feedback_date: None,
        }
    }
}

/// Composed per-customer analysis; this is what the cache stores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFeedbackAnalysis {
    pub customer_id: String,
    pub signal: TextSignal,
    pub statistics: FeedbackStatistics,
    /// Warnings first, then recommendations
    pub recommendations: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
    pub is_error: bool,
}

impl UserFeedbackAnalysis {
    /// Result for a customer without any feedback
    pub fn no_history(customer_id: &str) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            signal: TextSignal {
                summary: messages::NO_HISTORY_SUMMARY.to_string(),
                ..TextSignal::insufficient()
            },
            statistics: FeedbackStatistics::empty(),
            recommendations: vec![messages::STANDARD_PREPARATION.to_string()],
            analyzed_at: Utc::now(),
            is_error: false,
        }
    }

    pub fn sentiment(&self) -> SentimentLabel {
        self.signal.sentiment_label
    }

    pub fn average_rating(&self) -> f64 {
        self.statistics.ratings.average_rating
    }

    pub fn trend(&self) -> RatingTrend {
        self.statistics.timeline.trend
    }
}

/// A line of the order currently being prepared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedItem {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl OrderedItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: default_quantity(),
            notes: None,
        }
    }
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    /// `variance` is the population standard deviation of the ratings
    pub fn from_metrics(average_rating: f64, variance: f64) -> Self {
        if average_rating < thresholds::HIGH_PRIORITY_AVERAGE
            || variance > thresholds::HIGH_PRIORITY_VARIANCE
        {
            Priority::High
        } else if average_rating > thresholds::LOW_PRIORITY_AVERAGE
            && variance < thresholds::LOW_PRIORITY_VARIANCE
        {
            Priority::Low
        } else {
            Priority::Normal
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentDistribution {
    pub fn record(&mut self, label: SentimentLabel) {
        if label.is_positive() {
            self.positive += 1;
        } else if label.is_negative() {
            self.negative += 1;
        } else {
            self.neutral += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalData {
    pub average_rating: f64,
    /// Population standard deviation of the ratings
    pub rating_variance: f64,
    pub total_feedback: usize,
    pub sentiment_distribution: SentimentDistribution,
}

/// Kitchen note for one order; computed fresh every time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRiskNote {
    pub customer_id: String,
    pub recommendation_text: String,
    pub priority: Priority,
    pub sentiment: SentimentLabel,
    pub historical_data: HistoricalData,
    pub analyzed_at: DateTime<Utc>,
    pub is_error: bool,
}

impl OrderRiskNote {
    pub fn no_history(customer_id: &str) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            recommendation_text: messages::ORDER_NO_HISTORY.to_string(),
            priority: Priority::Normal,
            sentiment: SentimentLabel::Neutral,
            historical_data: HistoricalData::default(),
            analyzed_at: Utc::now(),
            is_error: false,
        }
    }

    /// Static note used when the advisor or the repository failed
    pub fn fallback(customer_id: &str, historical_data: HistoricalData) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            recommendation_text: messages::ORDER_FALLBACK.to_string(),
            priority: Priority::Normal,
            sentiment: SentimentLabel::Neutral,
            historical_data,
            analyzed_at: Utc::now(),
            is_error: true,
        }
    }
}

/// Analysis of a single comment in a free-form context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFeedbackAnalysis {
    pub sentiment: SentimentLabel,
    pub sentiment_score: f64,
    pub emotion: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub entities: FoodEntities,
    pub recommendations: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
    pub analysis_context: String,
    pub is_error: bool,
}
