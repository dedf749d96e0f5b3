use crate::config::constants::{defaults, env_vars, models};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Emotion classification and summarization service settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServicesConfig {
    /// Upper bound for every emotion/summary call, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Base URL of the Hugging Face inference API
    #[serde(default = "default_huggingface_base_url")]
    pub huggingface_base_url: String,

    /// Environment variable holding the Hugging Face API token
    #[serde(default = "default_huggingface_api_key_env")]
    pub huggingface_api_key_env: String,

    #[serde(default = "default_emotion_model")]
    pub emotion_model: String,

    #[serde(default = "default_summary_model")]
    pub summary_model: String,

    /// Maximum summary length passed to the summarization model
    #[serde(default = "default_summary_max_length")]
    pub summary_max_length: u32,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            huggingface_base_url: default_huggingface_base_url(),
            huggingface_api_key_env: default_huggingface_api_key_env(),
            emotion_model: default_emotion_model(),
            summary_model: default_summary_model(),
            summary_max_length: default_summary_max_length(),
        }
    }
}

impl ServicesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Generative kitchen advisor (OpenAI-compatible chat completions)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdvisorConfig {
    /// Disable to always use the static fallback recommendation
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_advisor_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key
    #[serde(default = "default_advisor_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_advisor_model")]
    pub model: String,

    #[serde(default = "default_advisor_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_advisor_temperature")]
    pub temperature: f32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_advisor_base_url(),
            api_key_env: default_advisor_api_key_env(),
            model: default_advisor_model(),
            max_tokens: default_advisor_max_tokens(),
            temperature: default_advisor_temperature(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AdvisorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    defaults::SERVICE_TIMEOUT_MS
}

fn default_huggingface_base_url() -> String {
    models::huggingface::BASE_URL.to_string()
}

fn default_huggingface_api_key_env() -> String {
    env_vars::HUGGINGFACE_API_KEY.to_string()
}

fn default_emotion_model() -> String {
    models::huggingface::EMOTION_MODEL.to_string()
}

fn default_summary_model() -> String {
    models::huggingface::SUMMARY_MODEL.to_string()
}

fn default_summary_max_length() -> u32 {
    defaults::SUMMARY_MAX_LENGTH
}

fn default_advisor_base_url() -> String {
    models::openai::BASE_URL.to_string()
}

fn default_advisor_api_key_env() -> String {
    env_vars::OPENAI_API_KEY.to_string()
}

fn default_advisor_model() -> String {
    models::openai::DEFAULT_MODEL.to_string()
}

fn default_advisor_max_tokens() -> u32 {
    defaults::ADVISOR_MAX_TOKENS
}

fn default_advisor_temperature() -> f32 {
    defaults::ADVISOR_TEMPERATURE
}
