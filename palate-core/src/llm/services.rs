//! Boundary contracts for the external language services
//!
//! The analysis pipeline only talks to these traits. Production code wires in
//! the Hugging Face and OpenAI-compatible clients from this module's siblings;
//! tests substitute in-process doubles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Failure of an external language-service call
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{service} timed out after {millis}ms")]
    Timeout { service: &'static str, millis: u64 },
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("Provider error: {0}")]
    Provider(String),
}

/// One label of an emotion classifier, highest confidence first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    #[serde(alias = "score")]
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "summary_text")]
    pub text: String,
}

/// Request for the generative advisor: one system instruction, one user prompt
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorResponse {
    pub text: String,
}

#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Labels ordered by descending confidence
    async fn classify(&self, text: &str) -> Result<Vec<EmotionScore>, ServiceError>;
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, max_length: u32) -> Result<Summary, ServiceError>;
}

#[async_trait]
pub trait GenerativeAdvisor: Send + Sync {
    async fn complete(&self, request: AdvisorRequest) -> Result<AdvisorResponse, ServiceError>;
}

/// Run `call` with an upper time bound, turning an elapsed deadline into
/// [`ServiceError::Timeout`].
pub async fn bounded<T, F>(service: &'static str, limit: Duration, call: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ServiceError::Timeout {
            service,
            millis: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_passes_through_result() {
        let value = bounded("echo", Duration::from_millis(50), async { Ok::<_, ServiceError>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_bounded_reports_timeout() {
        let result: Result<(), ServiceError> = bounded("slow", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await;

        match result {
            Err(ServiceError::Timeout { service, millis }) => {
                assert_eq!(service, "slow");
                assert_eq!(millis, 10);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_emotion_score_accepts_inference_field_name() {
        let scores: Vec<EmotionScore> =
            serde_json::from_str(r#"[{"label":"joy","score":0.91}]"#).unwrap();
        assert_eq!(scores[0].label, "joy");
        assert!((scores[0].confidence - 0.91).abs() < f64::EPSILON);
    }
}
