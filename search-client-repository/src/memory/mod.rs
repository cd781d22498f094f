//! In-memory search index provider.
//!
//! Implements just enough of the backend's behaviour to exercise
//! `SearchIndexClient` without a cluster: index creation, document
//! replacement with versions, term matching on scalar and array fields,
//! sorting and windowing. Writes are visible immediately regardless of the
//! refresh policy.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{IndexReceipt, RawSearchHits, RefreshPolicy, StoredDocument};
use search_client_shared::{IndexSchema, SearchQuery, SortOrder};

#[derive(Debug, Default)]
struct MemoryIndex {
    schema: IndexSchema,
    documents: BTreeMap<String, (i64, Value)>,
}

/// Search index provider that keeps every index in process memory.
///
/// Clones share the same storage, so a test can keep a handle for
/// inspection after boxing one into a client.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    indexes: Arc<Mutex<HashMap<String, MemoryIndex>>>,
    unavailable: bool,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose every call fails as if the backend were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Number of indexes created so far.
    pub async fn index_count(&self) -> usize {
        self.indexes.lock().await.len()
    }

    /// Number of documents stored in an index.
    pub async fn document_count(&self, index: &str) -> usize {
        self.indexes
            .lock()
            .await
            .get(index)
            .map(|i| i.documents.len())
            .unwrap_or(0)
    }

    /// Schema an index was created with.
    pub async fn schema_of(&self, index: &str) -> Option<IndexSchema> {
        self.indexes
            .lock()
            .await
            .get(index)
            .map(|i| i.schema.clone())
    }

    fn check_available(&self) -> Result<(), SearchIndexError> {
        if self.unavailable {
            return Err(SearchIndexError::unavailable("connection refused"));
        }
        Ok(())
    }
}

/// Whether a field holds `value`, either directly or as an array element.
fn term_matches(field: Option<&Value>, value: &str) -> bool {
    match field {
        Some(Value::Array(items)) => items.iter().any(|item| scalar_equals(item, value)),
        Some(other) => scalar_equals(other, value),
        None => false,
    }
}

fn scalar_equals(item: &Value, value: &str) -> bool {
    match item {
        Value::String(s) => s == value,
        Value::Number(n) => n.to_string() == value,
        Value::Bool(b) => b.to_string() == value,
        _ => false,
    }
}

/// Order two sort keys, numbers before strings, missing values last.
fn compare_keys(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(_)), Some(_)) => Ordering::Less,
        (Some(_), Some(Value::Number(_))) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl SearchIndexProvider for InMemoryProvider {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        self.check_available()?;
        Ok(self.indexes.lock().await.contains_key(index))
    }

    async fn create_index(
        &self,
        index: &str,
        schema: &IndexSchema,
    ) -> Result<bool, SearchIndexError> {
        self.check_available()?;
        let mut indexes = self.indexes.lock().await;
        if indexes.contains_key(index) {
            return Ok(false);
        }
        indexes.insert(
            index.to_string(),
            MemoryIndex {
                schema: schema.clone(),
                documents: BTreeMap::new(),
            },
        );
        Ok(true)
    }

    async fn index_document(
        &self,
        index: &str,
        id: &str,
        body: Value,
        _refresh: RefreshPolicy,
    ) -> Result<IndexReceipt, SearchIndexError> {
        self.check_available()?;
        let mut indexes = self.indexes.lock().await;
        // Like the backend, writing to a missing index creates it with a dynamic mapping
        let target = indexes.entry(index.to_string()).or_default();

        let version = target.documents.get(id).map(|(v, _)| v + 1).unwrap_or(1);
        let result = if version == 1 { "created" } else { "updated" };
        target.documents.insert(id.to_string(), (version, body));

        Ok(IndexReceipt {
            index: index.to_string(),
            id: id.to_string(),
            version: Some(version),
            result: result.to_string(),
        })
    }

    async fn get_document(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<StoredDocument<Value>>, SearchIndexError> {
        self.check_available()?;
        let indexes = self.indexes.lock().await;
        let stored = indexes
            .get(index)
            .and_then(|i| i.documents.get(id))
            .map(|(version, source)| StoredDocument {
                index: index.to_string(),
                id: id.to_string(),
                version: Some(*version),
                document: source.clone(),
            });
        Ok(stored)
    }

    async fn search(
        &self,
        index: &str,
        query: &SearchQuery,
        _pretty: bool,
    ) -> Result<RawSearchHits, SearchIndexError> {
        self.check_available()?;
        let indexes = self.indexes.lock().await;
        let target = indexes
            .get(index)
            .ok_or_else(|| SearchIndexError::query(format!("no such index [{}]", index)))?;

        let mut matched: Vec<&Value> = target
            .documents
            .values()
            .map(|(_, source)| source)
            .filter(|source| term_matches(source.get(&query.field), &query.value))
            .collect();

        matched.sort_by(|a, b| {
            let ordering = compare_keys(a.get(&query.sort_field), b.get(&query.sort_field));
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = matched.len() as u64;
        let sources = matched
            .into_iter()
            .skip(query.from)
            .take(query.size)
            .cloned()
            .collect();

        Ok(RawSearchHits {
            total,
            took_ms: 0,
            sources,
        })
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        self.check_available()?;
        Ok(true)
    }
}
