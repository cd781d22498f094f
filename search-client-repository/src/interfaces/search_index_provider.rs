//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, in-memory, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchIndexError;
use crate::types::{IndexReceipt, RawSearchHits, RefreshPolicy, StoredDocument};
use search_client_shared::{IndexSchema, SearchQuery};

/// Abstracts the underlying search index implementation (OpenSearch, Elasticsearch, etc.).
///
/// Providers exchange documents as raw JSON so the trait stays object safe.
/// Implementations are injected into `SearchIndexClient`, which performs the
/// typed serialization and decoding on top.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error handling across
/// different backend implementations. Transport failures map to
/// `SearchIndexError::BackendUnavailable`.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check whether an index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index exists
    /// * `Ok(false)` - If it does not
    /// * `Err(SearchIndexError)` - If the backend cannot be asked
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError>;

    /// Create an index with the given field mapping.
    ///
    /// An index created concurrently by someone else is not an error.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If this call created the index
    /// * `Ok(false)` - If the index already existed
    /// * `Err(SearchIndexError::SchemaRejected)` - If the backend refuses the mapping
    async fn create_index(&self, index: &str, schema: &IndexSchema)
        -> Result<bool, SearchIndexError>;

    /// Write a document under `id`, replacing any existing document with that id.
    ///
    /// # Arguments
    ///
    /// * `index` - Target index
    /// * `id` - Document identifier
    /// * `body` - Serialized document
    /// * `refresh` - When the write must become visible
    ///
    /// # Returns
    ///
    /// * `Ok(IndexReceipt)` - Backend metadata for the write
    /// * `Err(SearchIndexError::WriteFailed)` - If the backend rejects the write
    async fn index_document(
        &self,
        index: &str,
        id: &str,
        body: Value,
        refresh: RefreshPolicy,
    ) -> Result<IndexReceipt, SearchIndexError>;

    /// Fetch a document's source and metadata by identifier.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(StoredDocument))` - If the document exists
    /// * `Ok(None)` - If it does not
    async fn get_document(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<StoredDocument<Value>>, SearchIndexError>;

    /// Run an exact-match term query with sorting and a result window.
    ///
    /// # Returns
    ///
    /// * `Ok(RawSearchHits)` - Total count and the `_source` of each hit in order
    /// * `Err(SearchIndexError::QueryFailed)` - If the backend rejects the query
    async fn search(
        &self,
        index: &str,
        query: &SearchQuery,
        pretty: bool,
    ) -> Result<RawSearchHits, SearchIndexError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the cluster status is green or yellow
    /// * `Ok(false)` - If the cluster responds but is red
    /// * `Err(SearchIndexError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}
