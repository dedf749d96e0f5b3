//! Shared doubles for the language services and feedback fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use palate_core::FeedbackRecord;
use palate_core::engine::EngineServices;
use palate_core::llm::{
    AdvisorRequest, AdvisorResponse, EmotionClassifier, EmotionScore, GenerativeAdvisor,
    ServiceError, Summarizer, Summary,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Emotion classifier returning a fixed label after an optional delay
pub struct MockEmotions {
    pub label: &'static str,
    pub delay: Duration,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl MockEmotions {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            delay: Duration::ZERO,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn slow(label: &'static str, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(label)
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("neutral")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmotionClassifier for MockEmotions {
    async fn classify(&self, _text: &str) -> Result<Vec<EmotionScore>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(ServiceError::Http {
                status: 503,
                body: "model is loading".to_string(),
            });
        }
        Ok(vec![
            EmotionScore {
                label: self.label.to_string(),
                confidence: 0.8,
            },
            EmotionScore {
                label: "neutral".to_string(),
                confidence: 0.1,
            },
        ])
    }
}

pub struct MockSummarizer;

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, text: &str, _max_length: u32) -> Result<Summary, ServiceError> {
        Ok(Summary {
            text: format!("Summary: {}", text.split_whitespace().take(4).collect::<Vec<_>>().join(" ")),
        })
    }
}

pub struct MockAdvisor {
    pub reply: Option<&'static str>,
    pub calls: AtomicUsize,
}

impl MockAdvisor {
    pub fn replying(reply: &'static str) -> Self {
        Self {
            reply: Some(reply),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GenerativeAdvisor for MockAdvisor {
    async fn complete(&self, _request: AdvisorRequest) -> Result<AdvisorResponse, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Some(text) => Ok(AdvisorResponse {
                text: text.to_string(),
            }),
            None => Err(ServiceError::Authentication("invalid api key".to_string())),
        }
    }
}

pub fn services(
    emotions: Arc<MockEmotions>,
    advisor: Option<Arc<MockAdvisor>>,
) -> EngineServices {
    EngineServices {
        emotions,
        summarizer: Arc::new(MockSummarizer),
        advisor: advisor.map(|a| a as Arc<dyn GenerativeAdvisor>),
    }
}

pub fn feedback(
    customer: &str,
    item: &str,
    category: &str,
    rating: u8,
    comment: &str,
    day: i64,
) -> FeedbackRecord {
    FeedbackRecord {
        customer_id: customer.to_string(),
        food_item_id: format!("food-{}", item.to_lowercase().replace(' ', "-")),
        food_item_name: item.to_string(),
        category: Some(category.to_string()),
        dietary_tags: Default::default(),
        comment: comment.to_string(),
        rating,
        created_at: Utc
            .with_ymd_and_hms(2024, 6, 1, 19, 30, 0)
            .single()
            .expect("valid fixture date")
            + ChronoDuration::days(day),
    }
}

/// A regular with mostly good experiences and one salty curry
pub fn regular_customer() -> Vec<FeedbackRecord> {
    vec![
        feedback("alice", "Margherita", "Pizza", 5, "Delicious crispy crust, fresh basil", 0),
        feedback("alice", "Lamb Curry", "Indian", 2, "Way too salty and a bit cold", 3),
        feedback("alice", "Garlic Naan", "Indian", 4, "Great garlic flavor", 7),
        feedback("alice", "Tiramisu", "Dessert", 5, "Amazing, loved it", 12),
    ]
}
