//! Search index error types.
//!
//! This module defines the error types that can occur during search index operations.
//! An absent document is not an error: lookups return `Ok(None)` instead.

use thiserror::Error;

/// Errors that can occur during search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Caller input was rejected before any request was sent.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The backend could not be reached or the transport failed.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend refused to create the index with the given mapping.
    #[error("Schema rejected: {0}")]
    SchemaRejected(String),

    /// Writing a document failed.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// A stored document does not match the expected shape.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// The search request was malformed or rejected.
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a backend unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::BackendUnavailable(msg.into())
    }

    /// Create a schema rejected error.
    pub fn schema_rejected(msg: impl Into<String>) -> Self {
        Self::SchemaRejected(msg.into())
    }

    /// Create a write failed error.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::WriteFailed(msg.into())
    }

    /// Create a deserialization error.
    pub fn deserialization(msg: impl Into<String>) -> Self {
        Self::DeserializationError(msg.into())
    }

    /// Create a query failed error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryFailed(msg.into())
    }

    /// Whether the failure came from the transport rather than the request.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_))
    }
}
