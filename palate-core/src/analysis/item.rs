//! Analysis of a single comment, e.g. fresh feedback on one dish
//!
//! Nothing here is cached; every call hits the language services unless the
//! text is too short to be worth it.

use crate::analysis::recommendations::RecommendationSynthesizer;
use crate::analysis::signals::{self, TextSignalExtractor};
use crate::analysis::types::{ItemFeedbackAnalysis, TextSignal};
use crate::config::constants::{contexts, messages};
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ItemFeedbackAnalyzer {
    extractor: TextSignalExtractor,
    synthesizer: Arc<RecommendationSynthesizer>,
}

impl ItemFeedbackAnalyzer {
    pub fn new(extractor: TextSignalExtractor) -> Self {
        Self {
            extractor,
            synthesizer: Arc::new(RecommendationSynthesizer::default()),
        }
    }

    pub fn with_synthesizer(mut self, synthesizer: RecommendationSynthesizer) -> Self {
        self.synthesizer = Arc::new(synthesizer);
        self
    }

    /// A blank `context` means [`contexts::ITEM`].
    pub async fn analyze_text(&self, text: &str, context: &str) -> ItemFeedbackAnalysis {
        let context = match context.trim() {
            "" => contexts::ITEM,
            trimmed => trimmed,
        };

        if !signals::is_substantive(text) {
            debug!(context, "item text too short; using defaults");
            return default_analysis(&TextSignal::insufficient(), context);
        }

        let signal = self.extractor.extract(text).await;
        if signal.is_error {
            debug!(context, "item analysis degraded; using defaults");
            return default_analysis(&signal, context);
        }

        ItemFeedbackAnalysis {
            recommendations: self.synthesizer.synthesize(text, &signal, context),
            sentiment: signal.sentiment_label,
            sentiment_score: signal.sentiment_score,
            emotion: signal.dominant_emotion,
            summary: signal.summary,
            keywords: signal.keywords,
            entities: signal.entities,
            analyzed_at: Utc::now(),
            analysis_context: context.to_string(),
            is_error: false,
        }
    }
}

fn default_analysis(signal: &TextSignal, context: &str) -> ItemFeedbackAnalysis {
    let recommendation = if context == contexts::USER_PREFERENCES {
        messages::INSUFFICIENT_USER_DATA.to_string()
    } else {
        format!("Prepare {context} with standard care")
    };

    ItemFeedbackAnalysis {
        sentiment: signal.sentiment_label,
        sentiment_score: 0.0,
        emotion: signal.dominant_emotion.clone(),
        summary: signal.summary.clone(),
        keywords: Vec::new(),
        entities: Default::default(),
        recommendations: vec![recommendation],
        analyzed_at: Utc::now(),
        analysis_context: context.to_string(),
        is_error: signal.is_error,
    }
}
