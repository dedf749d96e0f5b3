//! Wiring of the analysis services from a loaded configuration
//!
//! [`FeedbackEngine`] is the single entry point used by the CLI and by
//! embedding applications. It owns the shared cache and hands out the three
//! consumer operations.

use crate::analysis::{
    AnalysisCache, AnalysisError, FeedbackAnalysisOrchestrator, FeedbackStatistics,
    ItemFeedbackAnalysis, ItemFeedbackAnalyzer, OrderRiskAnalyzer, OrderRiskNote, OrderedItem,
    TextSignalExtractor, UserFeedbackAnalysis, statistics,
};
use crate::config::PalateConfig;
use crate::llm::services::{EmotionClassifier, GenerativeAdvisor, Summarizer};
use crate::llm::{HuggingFaceInference, OpenAIProvider, ProviderAdvisor};
use crate::repository::FeedbackRepository;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// External services the engine talks to; swap these out in tests.
#[derive(Clone)]
pub struct EngineServices {
    pub emotions: Arc<dyn EmotionClassifier>,
    pub summarizer: Arc<dyn Summarizer>,
    pub advisor: Option<Arc<dyn GenerativeAdvisor>>,
}

impl EngineServices {
    /// Hugging Face for emotion and summary, an OpenAI-compatible endpoint for
    /// the advisor. The advisor is left out when disabled or without a key.
    pub fn from_config(config: &PalateConfig) -> Result<Self> {
        let hf_key = read_key(&config.services.huggingface_api_key_env);
        if hf_key.is_none() {
            warn!(
                env = %config.services.huggingface_api_key_env,
                "no Hugging Face API key; requests will be anonymous"
            );
        }
        let inference = Arc::new(HuggingFaceInference::from_config(&config.services, hf_key));

        let advisor: Option<Arc<dyn GenerativeAdvisor>> = if !config.advisor.enabled {
            None
        } else if let Some(key) = read_key(&config.advisor.api_key_env) {
            let provider = OpenAIProvider::with_model(key, config.advisor.model.clone())
                .with_base_url(config.advisor.base_url.clone());
            let advisor = ProviderAdvisor::new(Arc::new(provider), config.advisor.model.clone())
                .with_temperature(config.advisor.temperature);
            Some(Arc::new(advisor))
        } else {
            warn!(
                env = %config.advisor.api_key_env,
                "no advisor API key; order notes use the standard text"
            );
            None
        };

        Ok(Self {
            emotions: inference.clone(),
            summarizer: inference,
            advisor,
        })
    }
}

fn read_key(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Clone)]
pub struct FeedbackEngine {
    repository: Arc<dyn FeedbackRepository>,
    orchestrator: FeedbackAnalysisOrchestrator,
    order_risk: OrderRiskAnalyzer,
    items: ItemFeedbackAnalyzer,
}

impl FeedbackEngine {
    pub fn from_config(
        config: &PalateConfig,
        repository: Arc<dyn FeedbackRepository>,
    ) -> Result<Self> {
        let services =
            EngineServices::from_config(config).context("Failed to initialize language services")?;
        Ok(Self::with_services(config, repository, services))
    }

    pub fn with_services(
        config: &PalateConfig,
        repository: Arc<dyn FeedbackRepository>,
        services: EngineServices,
    ) -> Self {
        let extractor =
            TextSignalExtractor::from_config(&config.services, services.emotions, services.summarizer);

        let mut orchestrator =
            FeedbackAnalysisOrchestrator::new(repository.clone(), extractor.clone());
        if config.cache.enabled {
            orchestrator =
                orchestrator.with_cache(Arc::new(AnalysisCache::from_config(&config.cache)));
        }

        let mut order_risk = OrderRiskAnalyzer::new(repository.clone())
            .with_scorer(extractor.scorer().clone())
            .with_advisor_config(&config.advisor);
        if let Some(advisor) = services.advisor {
            order_risk = order_risk.with_advisor(advisor);
        }

        info!(
            cache = config.cache.enabled,
            advisor = order_risk.has_advisor(),
            "feedback engine ready"
        );

        Self {
            repository,
            orchestrator,
            order_risk,
            items: ItemFeedbackAnalyzer::new(extractor),
        }
    }

    pub async fn analyze(&self, customer_id: &str) -> UserFeedbackAnalysis {
        self.orchestrator.analyze(customer_id).await
    }

    pub async fn assess(
        &self,
        customer_id: &str,
        ordered_items: &[OrderedItem],
    ) -> Result<OrderRiskNote, AnalysisError> {
        self.order_risk.assess(customer_id, ordered_items).await
    }

    pub async fn analyze_text(&self, text: &str, context: &str) -> ItemFeedbackAnalysis {
        self.items.analyze_text(text, context).await
    }

    /// Statistics only, with no external calls and no caching. Unlike
    /// `analyze`, storage failures and empty histories are errors.
    pub async fn statistics(&self, customer_id: &str) -> Result<FeedbackStatistics, AnalysisError> {
        let records = self.repository.records_for_customer(customer_id).await?;
        statistics::aggregate(&records)
    }

    pub fn cache(&self) -> Option<&Arc<AnalysisCache>> {
        self.orchestrator.cache()
    }
}
