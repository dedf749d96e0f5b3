use crate::config::constants::models;
use crate::llm::provider::{
    FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, MessageRole, Usage,
};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};

/// Client for OpenAI-compatible `/chat/completions` endpoints
pub struct OpenAIProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ReplyUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ReplyMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReplyUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, models::openai::DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            http_client: HttpClient::new(),
            base_url: models::openai::BASE_URL.to_string(),
            model,
        }
    }

    /// Point the client at a self-hosted or proxy endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&self, request: &'a LLMRequest) -> ChatBody<'a> {
        let system = request.system_prompt.as_deref().map(|content| ChatMessage {
            role: MessageRole::System.as_str(),
            content,
        });
        let turns = request.messages.iter().map(|msg| ChatMessage {
            role: msg.role.as_str(),
            content: &msg.content,
        });

        ChatBody {
            model: &request.model,
            messages: system.into_iter().chain(turns).collect(),
            stream: false,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    fn read_reply(reply: ChatReply) -> Result<LLMResponse, LLMError> {
        let usage = reply.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        let choice = reply
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::Provider("reply contained no choices".to_string()))?;

        Ok(LLMResponse {
            content: choice.message.content,
            usage,
            finish_reason: choice
                .finish_reason
                .as_deref()
                .map_or(FinishReason::Stop, FinishReason::from_wire),
        })
    }

    fn provider_error(detail: String) -> LLMError {
        LLMError::Provider(format!("openai: {detail}"))
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.validate_request(&request)?;

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.request_body(&request))
            .send()
            .await
            .map_err(|e| LLMError::Network(format!("openai: {e}")))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                Err(LLMError::Authentication(body))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(LLMError::RateLimit),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                Err(Self::provider_error(format!("HTTP {status}: {body}")))
            }
            _ => {
                let reply: ChatReply = response
                    .json()
                    .await
                    .map_err(|e| Self::provider_error(format!("unreadable reply: {e}")))?;
                Self::read_reply(reply)
            }
        }
    }

    fn supported_models(&self) -> Vec<String> {
        models::openai::SUPPORTED_MODELS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn validate_request(&self, request: &LLMRequest) -> Result<(), LLMError> {
        if request.messages.is_empty() {
            return Err(LLMError::InvalidRequest("no messages to send".to_string()));
        }
        if request.model.trim().is_empty() {
            return Err(LLMError::InvalidRequest("model name is blank".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::Message;
    use serde_json::json;

    fn request() -> LLMRequest {
        LLMRequest {
            messages: vec![Message::user("Order: 2 x Pad Thai")],
            system_prompt: Some("You are a head chef.".to_string()),
            model: "gpt-4o-mini".to_string(),
            max_tokens: Some(150),
            temperature: None,
        }
    }

    #[test]
    fn test_body_puts_system_prompt_first() {
        let provider = OpenAIProvider::new("test_key".to_string());
        let req = request();
        let body = serde_json::to_value(provider.request_body(&req)).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 150);
        assert!(body.get("temperature").is_none());
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are a head chef.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Order: 2 x Pad Thai");
    }

    #[test]
    fn test_reply_reads_first_choice() {
        let reply: ChatReply = serde_json::from_value(json!({
            "choices": [{
                "message": {"role": "assistant", "content": "Go easy on the chili."},
                "finish_reason": "length"
            }],
            "usage": {"prompt_tokens": 40, "completion_tokens": 8, "total_tokens": 48}
        }))
        .unwrap();
        let response = OpenAIProvider::read_reply(reply).unwrap();

        assert_eq!(response.content.as_deref(), Some("Go easy on the chili."));
        assert!(response.finish_reason.is_truncated());
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(48));
    }

    #[test]
    fn test_reply_without_choices_is_an_error() {
        let reply: ChatReply = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            OpenAIProvider::read_reply(reply),
            Err(LLMError::Provider(_))
        ));
    }

    #[test]
    fn test_provider_errors_carry_no_styling() {
        let err = OpenAIProvider::provider_error("HTTP 500: upstream".to_string());
        assert_eq!(err.to_string(), "provider error: openai: HTTP 500: upstream");
    }

    #[test]
    fn test_validate_rejects_empty_messages() {
        let provider = OpenAIProvider::new("test_key".to_string());
        let mut req = request();
        req.messages.clear();
        assert!(matches!(
            provider.validate_request(&req),
            Err(LLMError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let provider = OpenAIProvider::with_model("k".to_string(), "gpt-4o".to_string())
            .with_base_url("http://localhost:8080/v1/");
        assert_eq!(provider.base_url, "http://localhost:8080/v1");
        assert_eq!(provider.model(), "gpt-4o");
        assert!(provider.supported_models().contains(&"gpt-4o".to_string()));
    }
}
