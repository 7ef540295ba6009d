//! Access to the remote vocabulary store.

mod http;

use async_trait::async_trait;
use std::sync::Arc;
use vocab_core::{ParsedEntry, RecordId, VocabularyRecord};

pub use http::HttpStore;

/// Store errors. Passed through to the caller unmodified; nothing here retries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Vocabulary record {0} not found")]
    NotFound(RecordId),

    #[error("Rejected by store: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// CRUD operations the client needs from the vocabulary collection.
#[async_trait]
pub trait VocabularyStore: Send + Sync {
    /// Fetch every record in the collection.
    async fn list_all(&self) -> Result<Vec<VocabularyRecord>, StoreError>;

    /// Create a record; the store assigns its ID.
    async fn create(&self, entry: &ParsedEntry) -> Result<VocabularyRecord, StoreError>;

    /// Replace the word and meaning of an existing record.
    async fn update(
        &self,
        id: &RecordId,
        entry: &ParsedEntry,
    ) -> Result<VocabularyRecord, StoreError>;

    async fn delete(&self, id: &RecordId) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: VocabularyStore + ?Sized> VocabularyStore for Arc<T> {
    async fn list_all(&self) -> Result<Vec<VocabularyRecord>, StoreError> {
        (**self).list_all().await
    }

    async fn create(&self, entry: &ParsedEntry) -> Result<VocabularyRecord, StoreError> {
        (**self).create(entry).await
    }

    async fn update(
        &self,
        id: &RecordId,
        entry: &ParsedEntry,
    ) -> Result<VocabularyRecord, StoreError> {
        (**self).update(id, entry).await
    }

    async fn delete(&self, id: &RecordId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}
