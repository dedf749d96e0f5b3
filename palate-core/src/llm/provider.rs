//! Chat-completion provider abstraction
//!
//! The kitchen advisor drafts its recommendation through a chat-completion
//! API. Concrete clients implement [`LLMProvider`]; the advisor only ever
//! sends one system prompt and one user turn.

use crate::llm::services::ServiceError;
use async_trait::async_trait;

/// One completion call: a system prompt, the conversation so far and the
/// sampling knobs the advisor exposes.
#[derive(Debug, Clone)]
pub struct LLMRequest {
    pub messages: Vec<Message>,
    pub system_prompt: Option<String>,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    /// Wire name used by chat-completion APIs
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: Option<String>,
    pub usage: Option<Usage>,
    pub finish_reason: FinishReason,
}

/// Token accounting reported by the provider, when it reports any
#[derive(Debug, Clone, Copy)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other(String),
}

impl FinishReason {
    pub fn from_wire(reason: &str) -> Self {
        match reason {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            "content_filter" => FinishReason::ContentFilter,
            other => FinishReason::Other(other.to_string()),
        }
    }

    /// The reply hit the token limit and may end mid-sentence.
    pub fn is_truncated(&self) -> bool {
        matches!(self, FinishReason::Length)
    }
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError>;

    fn supported_models(&self) -> Vec<String>;

    /// Reject requests the endpoint would refuse, before any network traffic.
    fn validate_request(&self, request: &LLMRequest) -> Result<(), LLMError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("rate limited by provider")]
    RateLimit,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("provider error: {0}")]
    Provider(String),
}

impl From<LLMError> for ServiceError {
    fn from(err: LLMError) -> ServiceError {
        match err {
            LLMError::Authentication(msg) => ServiceError::Authentication(msg),
            LLMError::RateLimit => ServiceError::Http {
                status: 429,
                body: "rate limit exceeded".to_string(),
            },
            LLMError::Network(msg) => ServiceError::Network(msg),
            LLMError::InvalidRequest(msg) | LLMError::Provider(msg) => ServiceError::Provider(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reason_from_wire() {
        assert_eq!(FinishReason::from_wire("stop"), FinishReason::Stop);
        assert!(FinishReason::from_wire("length").is_truncated());
        assert_eq!(
            FinishReason::from_wire("tool_calls"),
            FinishReason::Other("tool_calls".to_string())
        );
    }

    #[test]
    fn test_rate_limit_maps_to_http_429() {
        let err: ServiceError = LLMError::RateLimit.into();
        assert!(matches!(err, ServiceError::Http { status: 429, .. }));
    }
}
