//! # Feedback Analysis
//!
//! The pipeline turns a customer's feedback history into kitchen guidance:
//!
//! - `statistics`: pure rating, category, dietary and timeline aggregates.
//! - `lexicon` / `keywords`: local sentiment scoring and keyword/entity
//!   extraction.
//! - `signals`: joins the local scores with the external emotion and summary
//!   services into a [`TextSignal`].
//! - `recommendations`: ordered rule list producing warnings and advice.
//! - `cache`: TTL + LRU cache with single-flight computation.
//! - `orchestrator`: cached per-customer analysis.
//! - `order_risk`: per-order priority and advisor note.
//! - `item`: one-off analysis of a single comment.

pub mod cache;
pub mod item;
pub mod keywords;
pub mod lexicon;
pub mod orchestrator;
pub mod order_risk;
pub mod recommendations;
pub mod signals;
pub mod statistics;
pub mod types;

pub use cache::{AnalysisCache, CacheStats, Computed, TtlCache};
pub use item::ItemFeedbackAnalyzer;
pub use lexicon::{LexiconScorer, SentimentScorer};
pub use orchestrator::FeedbackAnalysisOrchestrator;
pub use order_risk::OrderRiskAnalyzer;
pub use recommendations::{Advice, RecommendationSynthesizer, Rule, RuleContext};
pub use signals::TextSignalExtractor;
pub use types::*;

use crate::repository::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("insufficient data: {0}")]
    InsufficientData(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
