//! # Search Client Repository
//!
//! This crate provides the typed [`SearchIndexClient`] used by application
//! code, the [`SearchIndexProvider`] trait it talks to, and a concrete
//! provider backed by OpenSearch.
//!
//! The provider speaks raw JSON; the client owns serialization of documents
//! on the way in and typed deserialization of hits on the way out.

pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod memory;

pub use client::SearchIndexClient;
pub use config::SearchIndexConfig;
pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::OpenSearchClient;
pub use types::{IndexReceipt, RefreshPolicy, StoredDocument};
