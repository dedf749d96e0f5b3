use crate::llm::provider::{LLMProvider, LLMRequest, Message};
use crate::llm::services::{AdvisorRequest, AdvisorResponse, GenerativeAdvisor, ServiceError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// [`GenerativeAdvisor`] backed by any chat-completion [`LLMProvider`]
pub struct ProviderAdvisor {
    provider: Arc<dyn LLMProvider>,
    model: String,
    temperature: Option<f32>,
}

impl ProviderAdvisor {
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[async_trait]
impl GenerativeAdvisor for ProviderAdvisor {
    async fn complete(&self, request: AdvisorRequest) -> Result<AdvisorResponse, ServiceError> {
        let llm_request = LLMRequest {
            messages: vec![Message::user(request.prompt)],
            system_prompt: Some(request.system),
            model: self.model.clone(),
            max_tokens: Some(request.max_tokens),
            temperature: self.temperature,
        };

        let response = self.provider.generate(llm_request).await?;
        if let Some(usage) = response.usage {
            debug!(
                provider = self.provider.name(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "advisor completion"
            );
        }
        if response.finish_reason.is_truncated() {
            warn!(provider = self.provider.name(), "advisor reply hit the token limit");
        }
        let text = response
            .content
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                ServiceError::Malformed(format!(
                    "{} returned an empty completion",
                    self.provider.name()
                ))
            })?;

        Ok(AdvisorResponse { text })
    }
}
