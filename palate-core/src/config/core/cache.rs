use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-customer analysis cache configuration loaded from palate.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Enable caching of composed customer analyses
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Time-to-live of a cached analysis. New feedback does not invalidate
    /// an entry, so this is also the staleness bound.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Maximum number of customers kept in memory before LRU eviction
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            ttl_seconds: default_ttl_seconds(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

fn default_enabled() -> bool {
    true
}

fn default_ttl_seconds() -> u64 {
    defaults::CACHE_TTL_SECONDS
}

fn default_max_entries() -> usize {
    defaults::CACHE_MAX_ENTRIES
}
