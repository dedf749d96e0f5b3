/// Model ID and endpoint constants for the external language services
pub mod models {
    // Hugging Face inference models used for emotion and summarization
    pub mod huggingface {
        pub const BASE_URL: &str = "https://api-inference.huggingface.co/models";
        pub const EMOTION_MODEL: &str = "SamLowe/roberta-base-go_emotions";
        pub const SUMMARY_MODEL: &str = "facebook/bart-large-cnn";
    }

    // OpenAI-compatible chat completion endpoint for the kitchen advisor
    pub mod openai {
        pub const BASE_URL: &str = "https://api.openai.com/v1";
        pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
        pub const SUPPORTED_MODELS: &[&str] = &["gpt-4o-mini", "gpt-4o", "gpt-4.1-mini", "gpt-5-mini"];
    }
}

/// Environment variables consulted for API credentials
pub mod env_vars {
    pub const HUGGINGFACE_API_KEY: &str = "HUGGINGFACE_API_KEY";
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
}

/// Default values shared by the configuration structs
pub mod defaults {
    pub const CACHE_TTL_SECONDS: u64 = 60 * 60;
    pub const CACHE_MAX_ENTRIES: usize = 1000;
    pub const SERVICE_TIMEOUT_MS: u64 = 10_000;
    pub const SUMMARY_MAX_LENGTH: u32 = 60;
    pub const ADVISOR_MAX_TOKENS: u32 = 150;
    pub const ADVISOR_TEMPERATURE: f32 = 0.7;
    pub const LOG_LEVEL: &str = "info";
    pub const CONFIG_FILE_NAME: &str = "palate.toml";
    pub const CONFIG_DIR_NAME: &str = ".palate";
}

/// Context labels passed to the recommendation rules
pub mod contexts {
    pub const USER_PREFERENCES: &str = "user preferences";
    pub const ITEM: &str = "item";
}

/// Fixed user-facing texts of the default and fallback results
pub mod messages {
    pub const NO_SUBSTANTIVE_FEEDBACK: &str = "No substantive feedback provided";
    pub const ANALYSIS_UNAVAILABLE: &str = "Analysis unavailable";
    pub const NO_HISTORY_SUMMARY: &str = "No previous feedback available for this customer";
    pub const STANDARD_PREPARATION: &str = "Standard preparation recommended";
    pub const INSUFFICIENT_USER_DATA: &str = "Insufficient data to analyze user preferences";
    pub const ORDER_NO_HISTORY: &str =
        "No previous feedback available. Prepare with standard care.";
    pub const ORDER_FALLBACK: &str =
        "Prepare the order with standard care and follow the usual quality checks.";
    pub const NEUTRAL_EMOTION: &str = "neutral";
}

/// Numeric thresholds of the analysis pipeline
pub mod thresholds {
    /// Trimmed text shorter than this is treated as insufficient
    pub const MIN_TEXT_CHARS: usize = 3;
    pub const MAX_KEYWORDS: usize = 10;
    /// Keywords must be strictly longer than this many characters
    pub const MIN_KEYWORD_CHARS: usize = 3;
    pub const TREND_SLOPE: f64 = 0.1;
    pub const POSITIVE_RATING: u8 = 4;
    pub const NEGATIVE_RATING: u8 = 2;
    pub const PREFERRED_TAG_AVERAGE: f64 = 4.0;
    pub const AVOIDED_TAG_AVERAGE: f64 = 2.0;
    pub const HIGH_PRIORITY_AVERAGE: f64 = 2.5;
    pub const HIGH_PRIORITY_VARIANCE: f64 = 1.5;
    pub const LOW_PRIORITY_AVERAGE: f64 = 4.2;
    pub const LOW_PRIORITY_VARIANCE: f64 = 0.5;
    /// Fallback recommendation is appended when at most this many exist
    pub const MIN_RECOMMENDATIONS: usize = 2;
    /// Most recent feedback entries quoted in an advisor prompt
    pub const MAX_PROMPT_HISTORY: usize = 20;
}

/// Prompt texts for the generative kitchen advisor
pub mod prompts {
    pub const ADVISOR_SYSTEM: &str = "You are an experienced head chef advising kitchen staff. \
Given a customer's past feedback and their current order, write two or three short, practical \
sentences on how to prepare this order so the customer is satisfied. Mention concrete adjustments \
(seasoning, doneness, texture, portion) only when the feedback supports them.";
}
