//! # Search Client Shared
//!
//! Plain data types shared between the search client repository and the
//! programs built on top of it: the [`Document`] trait, index schemas and
//! term queries with their results.

pub mod document;
pub mod query;
pub mod schema;

pub use document::Document;
pub use query::{SearchQuery, SearchResult, SortOrder};
pub use schema::{FieldKind, IndexSchema};
