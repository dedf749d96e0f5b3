//! # External Language Services
//!
//! Everything that leaves the process lives here:
//!
//! - `services`: the traits the analysis pipeline consumes (emotion
//!   classification, summarization, generative advice) and their error type.
//! - `huggingface`: HTTP client for the Hugging Face inference API, used for
//!   emotion classification and summarization.
//! - `provider` / `providers`: chat-completion abstraction with an
//!   OpenAI-compatible implementation.
//! - `advisor`: adapts any chat-completion provider into a generative advisor.

pub mod advisor;
pub mod error_display;
pub mod huggingface;
pub mod provider;
pub mod providers;
pub mod services;

pub use advisor::ProviderAdvisor;
pub use huggingface::HuggingFaceInference;
pub use provider::{LLMError, LLMProvider, LLMRequest, LLMResponse, Message, MessageRole};
pub use providers::OpenAIProvider;
pub use services::{
    AdvisorRequest, AdvisorResponse, EmotionClassifier, EmotionScore, GenerativeAdvisor,
    ServiceError, Summarizer, Summary, bounded,
};
