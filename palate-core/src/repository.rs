//! Feedback storage collaborators
//!
//! The analysis pipeline reads history through [`FeedbackRepository`]; it
//! never writes. Two implementations ship with the crate: an in-memory store
//! for embedding and tests, and a JSON file store read on every lookup so new
//! feedback appended to the file is picked up without a restart.

use crate::analysis::types::FeedbackRecord;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse feedback: {0}")]
    Parse(String),
    #[error("feedback store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// All feedback of one customer, in storage order. Unknown customers
    /// yield an empty list, not an error.
    async fn records_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<FeedbackRecord>, RepositoryError>;
}

#[derive(Default)]
pub struct InMemoryFeedbackRepository {
    records: RwLock<Vec<FeedbackRecord>>,
}

impl InMemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<FeedbackRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn insert(&self, record: FeedbackRecord) {
        self.records.write().await.push(record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn records_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<FeedbackRecord>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect())
    }
}

/// Feedback stored as one JSON array of records
pub struct JsonFileFeedbackRepository {
    path: PathBuf,
}

impl JsonFileFeedbackRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<FeedbackRecord>, RepositoryError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| RepositoryError::Io {
                path: self.path.clone(),
                source,
            })?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<FeedbackRecord> = serde_json::from_str(&content)
            .map_err(|e| RepositoryError::Parse(format!("{}: {e}", self.path.display())))?;

        if let Some(invalid) = records.iter().find(|r| !r.has_valid_rating()) {
            return Err(RepositoryError::Parse(format!(
                "rating {} for item '{}' is outside 1..=5",
                invalid.rating, invalid.food_item_name
            )));
        }

        debug!(path = %self.path.display(), count = records.len(), "loaded feedback file");
        Ok(records)
    }
}

#[async_trait]
impl FeedbackRepository for JsonFileFeedbackRepository {
    async fn records_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<FeedbackRecord>, RepositoryError> {
        let records = self.load().await?;
        Ok(records
            .into_iter()
            .filter(|r| r.customer_id == customer_id)
            .collect())
    }
}
