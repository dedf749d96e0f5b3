//! Hugging Face inference client for emotion classification and summarization
//!
//! Both tasks POST `{"inputs": ..., "parameters": ...}` to
//! `{base_url}/{model}`. Text-classification models answer with either a flat
//! list of `{label, score}` or a list wrapping one such list per input; both
//! shapes are accepted and the labels are returned by descending score.

use crate::config::ServicesConfig;
use crate::config::constants::models;
use crate::llm::services::{EmotionClassifier, EmotionScore, ServiceError, Summarizer, Summary};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};

const SERVICE: &str = "huggingface";

pub struct HuggingFaceInference {
    http_client: HttpClient,
    base_url: String,
    api_key: Option<String>,
    emotion_model: String,
    summary_model: String,
}

impl HuggingFaceInference {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: models::huggingface::BASE_URL.to_string(),
            api_key,
            emotion_model: models::huggingface::EMOTION_MODEL.to_string(),
            summary_model: models::huggingface::SUMMARY_MODEL.to_string(),
        }
    }

    pub fn from_config(config: &ServicesConfig, api_key: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: config.huggingface_base_url.trim_end_matches('/').to_string(),
            api_key,
            emotion_model: config.emotion_model.clone(),
            summary_model: config.summary_model.clone(),
        }
    }

    async fn post(&self, model: &str, body: Value) -> Result<Value, ServiceError> {
        let url = format!("{}/{}", self.base_url, model);
        let mut request = self.http_client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Authentication(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ServiceError::Malformed(format!("{SERVICE}: unreadable body: {e}")))
    }
}

/// Plain text only: these messages end up in logs and JSON output.
fn transport_error(err: impl std::fmt::Display) -> ServiceError {
    ServiceError::Network(format!("{SERVICE}: {err}"))
}

#[async_trait]
impl EmotionClassifier for HuggingFaceInference {
    async fn classify(&self, text: &str) -> Result<Vec<EmotionScore>, ServiceError> {
        let payload = self
            .post(&self.emotion_model, json!({ "inputs": text }))
            .await?;
        parse_classification(payload)
    }
}

#[async_trait]
impl Summarizer for HuggingFaceInference {
    async fn summarize(&self, text: &str, max_length: u32) -> Result<Summary, ServiceError> {
        let payload = self
            .post(
                &self.summary_model,
                json!({ "inputs": text, "parameters": { "max_length": max_length } }),
            )
            .await?;
        parse_summary(payload)
    }
}

fn parse_classification(payload: Value) -> Result<Vec<EmotionScore>, ServiceError> {
    let items = match payload {
        Value::Array(items) => items,
        other => {
            return Err(ServiceError::Malformed(format!(
                "expected a label list, got {other}"
            )));
        }
    };

    // Batched shape: [[{label, score}, ...]]
    let nested = matches!(items.first(), Some(Value::Array(_)));
    let items = if nested {
        match items.into_iter().next() {
            Some(Value::Array(inner)) => inner,
            _ => Vec::new(),
        }
    } else {
        items
    };

    let mut scores = items
        .into_iter()
        .map(serde_json::from_value::<EmotionScore>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServiceError::Malformed(format!("invalid label entry: {e}")))?;

    scores.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    Ok(scores)
}

fn parse_summary(payload: Value) -> Result<Summary, ServiceError> {
    let first = match payload {
        Value::Array(items) => items.into_iter().next(),
        Value::Object(_) => Some(payload),
        _ => None,
    }
    .ok_or_else(|| ServiceError::Malformed("empty summarization response".to_string()))?;

    serde_json::from_value::<Summary>(first)
        .map_err(|e| ServiceError::Malformed(format!("invalid summary entry: {e}")))
}
