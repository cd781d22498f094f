//! Search index client implementation.
//!
//! This module provides the main client for interacting with the search index.
//! Application code uses this to declare indexes, write and read typed
//! documents, and run term queries.

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::SearchIndexConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{IndexReceipt, StoredDocument};
use search_client_shared::{Document, IndexSchema, SearchQuery, SearchResult};

/// The main client for interacting with the search index.
///
/// Every operation is a single request/response against the injected
/// provider. The client adds input validation, document serialization and
/// typed decoding of what comes back.
pub struct SearchIndexClient {
    provider: Box<dyn SearchIndexProvider>,
    config: SearchIndexConfig,
}

impl SearchIndexClient {
    /// Create a new SearchIndexClient with default configuration.
    pub fn new(provider: Box<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            config: SearchIndexConfig::default(),
        }
    }

    /// Create a new SearchIndexClient with custom configuration.
    pub fn with_config(provider: Box<dyn SearchIndexProvider>, config: SearchIndexConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &SearchIndexConfig {
        &self.config
    }

    fn validate_index_name(index: &str) -> Result<(), SearchIndexError> {
        if index.trim().is_empty() {
            return Err(SearchIndexError::validation("index name is required"));
        }
        Ok(())
    }

    /// Reject a serialized document carrying fields the schema does not declare.
    fn check_against_schema(
        schema: &IndexSchema,
        id: &str,
        body: &Value,
    ) -> Result<(), SearchIndexError> {
        let Some(fields) = body.as_object() else {
            return Err(SearchIndexError::validation(format!(
                "Document {} does not serialize to a JSON object",
                id
            )));
        };

        if let Some(undeclared) = fields.keys().find(|key| schema.kind_of(key).is_none()) {
            return Err(SearchIndexError::validation(format!(
                "Document {} has field {} not declared in the schema",
                id, undeclared
            )));
        }
        Ok(())
    }

    /// Make sure `index` exists, creating it with `schema` if it does not.
    ///
    /// Safe to call repeatedly. Returns `true` when this call created the index.
    #[instrument(skip(self, schema))]
    pub async fn ensure_index(
        &self,
        index: &str,
        schema: &IndexSchema,
    ) -> Result<bool, SearchIndexError> {
        Self::validate_index_name(index)?;
        schema.validate().map_err(SearchIndexError::validation)?;

        if self.provider.index_exists(index).await? {
            debug!(index = %index, "Index already exists");
            return Ok(false);
        }

        let created = self.provider.create_index(index, schema).await?;
        if created {
            info!(index = %index, fields = schema.len(), "Created index");
        }
        Ok(created)
    }

    /// Write `document` under its identifier, replacing any previous version.
    ///
    /// Waits for visibility according to the configured refresh policy.
    pub async fn upsert_document<D: Document>(
        &self,
        index: &str,
        document: &D,
    ) -> Result<IndexReceipt, SearchIndexError> {
        Self::validate_index_name(index)?;

        let id = document.document_id();
        let body = serde_json::to_value(document)
            .map_err(|e| SearchIndexError::write(format!("Cannot serialize document {}: {}", id, e)))?;
        Self::check_against_schema(&D::schema(), &id, &body)?;

        let receipt = self
            .provider
            .index_document(index, &id, body, self.config.refresh)
            .await?;

        debug!(index = %index, doc_id = %id, result = %receipt.result, "Upserted document");
        Ok(receipt)
    }

    /// Fetch a document by identifier.
    ///
    /// Returns `Ok(None)` when no document with that id exists.
    pub async fn get_document<D: Document>(
        &self,
        index: &str,
        id: i64,
    ) -> Result<Option<StoredDocument<D>>, SearchIndexError> {
        Self::validate_index_name(index)?;

        let Some(stored) = self.provider.get_document(index, &id.to_string()).await? else {
            return Ok(None);
        };

        let decoded = stored.map(serde_json::from_value::<D>);
        let document = decoded.document.map_err(|e| {
            SearchIndexError::deserialization(format!("Document {} in {}: {}", id, index, e))
        })?;

        Ok(Some(StoredDocument {
            index: decoded.index,
            id: decoded.id,
            version: decoded.version,
            document,
        }))
    }

    /// Run a term query and decode every hit into `D`.
    ///
    /// A query matching nothing yields an empty result, not an error.
    pub async fn search<D: Document>(
        &self,
        index: &str,
        query: &SearchQuery,
    ) -> Result<SearchResult<D>, SearchIndexError> {
        Self::validate_index_name(index)?;
        query.validate().map_err(SearchIndexError::validation)?;

        if query.window_end() > self.config.max_result_window {
            return Err(SearchIndexError::validation(format!(
                "Result window from={} size={} exceeds maximum {}",
                query.from, query.size, self.config.max_result_window
            )));
        }

        let raw = self.provider.search(index, query, self.config.pretty).await?;

        let hits = raw
            .sources
            .into_iter()
            .map(serde_json::from_value::<D>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SearchIndexError::deserialization(format!("Search hit in {}: {}", index, e)))?;

        debug!(index = %index, total = raw.total, returned = hits.len(), "Search decoded");

        Ok(SearchResult {
            total: raw.total,
            took_ms: raw.took_ms,
            hits,
        })
    }

    /// Check that the backend is reachable and not red.
    pub async fn health_check(&self) -> Result<bool, SearchIndexError> {
        self.provider.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryProvider;
    use crate::types::RefreshPolicy;
    use search_client_shared::SortOrder;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Subject {
        id: i64,
        title: String,
        genres: Vec<String>,
    }

    impl Document for Subject {
        fn id(&self) -> i64 {
            self.id
        }

        fn schema() -> IndexSchema {
            IndexSchema::new().long("id").text("title").keyword("genres")
        }
    }

    fn subject(id: i64, title: &str, genres: &[&str]) -> Subject {
        Subject {
            id,
            title: title.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn client_with(provider: &InMemoryProvider) -> SearchIndexClient {
        SearchIndexClient::new(Box::new(provider.clone()))
    }

    #[tokio::test]
    async fn test_ensure_index_is_idempotent() {
        let provider = InMemoryProvider::new();
        let client = client_with(&provider);

        let first = client.ensure_index("subject", &Subject::schema()).await.unwrap();
        let second = client.ensure_index("subject", &Subject::schema()).await.unwrap();

        assert!(first);
        assert!(!second);
        assert_eq!(provider.index_count().await, 1);
        assert_eq!(provider.schema_of("subject").await, Some(Subject::schema()));
    }

    #[tokio::test]
    async fn test_ensure_index_validation() {
        let provider = InMemoryProvider::new();
        let client = client_with(&provider);

        let result = client.ensure_index("", &Subject::schema()).await;
        assert!(matches!(result, Err(SearchIndexError::ValidationError(_))));

        let result = client.ensure_index("subject", &IndexSchema::new()).await;
        assert!(matches!(result, Err(SearchIndexError::ValidationError(_))));

        assert_eq!(provider.index_count().await, 0);
    }

    #[tokio::test]
    async fn test_ensure_index_backend_unavailable() {
        let client = SearchIndexClient::new(Box::new(InMemoryProvider::unavailable()));

        let result = client.ensure_index("subject", &Subject::schema()).await;
        assert!(matches!(result, Err(SearchIndexError::BackendUnavailable(_))));
    }

    #[tokio::test]
    async fn test_upsert_then_get_round_trip() {
        let provider = InMemoryProvider::new();
        let client = client_with(&provider);
        client.ensure_index("subject", &Subject::schema()).await.unwrap();

        let written = subject(1, "Heat", &["犯罪", "剧情"]);
        let receipt = client.upsert_document("subject", &written).await.unwrap();
        assert_eq!(receipt.id, "1");
        assert!(receipt.was_created());

        let stored = client
            .get_document::<Subject>("subject", 1)
            .await
            .unwrap()
            .expect("document should exist");

        assert_eq!(stored.document, written);
        assert_eq!(stored.index, "subject");
        assert_eq!(stored.id, "1");
        assert_eq!(stored.version, Some(1));
    }

    #[tokio::test]
    async fn test_upsert_overwrites_same_id() {
        let provider = InMemoryProvider::new();
        let client = client_with(&provider);

        client
            .upsert_document("subject", &subject(7, "Old", &["a"]))
            .await
            .unwrap();
        let receipt = client
            .upsert_document("subject", &subject(7, "New", &["b"]))
            .await
            .unwrap();

        assert_eq!(receipt.version, Some(2));
        assert_eq!(provider.document_count("subject").await, 1);

        let stored = client
            .get_document::<Subject>("subject", 7)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.document.title, "New");
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Untracked {
        id: i64,
        note: String,
    }

    impl Document for Untracked {
        fn id(&self) -> i64 {
            self.id
        }

        fn schema() -> IndexSchema {
            IndexSchema::new().long("id")
        }
    }

    #[tokio::test]
    async fn test_upsert_rejects_field_missing_from_schema() {
        let provider = InMemoryProvider::new();
        let client = client_with(&provider);
        client.ensure_index("untracked", &Untracked::schema()).await.unwrap();

        let document = Untracked {
            id: 1,
            note: "not mapped".to_string(),
        };
        let result = client.upsert_document("untracked", &document).await;

        match result {
            Err(SearchIndexError::ValidationError(msg)) => assert!(msg.contains("note")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(provider.document_count("untracked").await, 0);
    }

    #[test]
    fn test_check_against_schema_requires_object() {
        let schema = IndexSchema::new().long("id");

        assert!(SearchIndexClient::check_against_schema(&schema, "1", &json!({ "id": 1 })).is_ok());
        assert!(matches!(
            SearchIndexClient::check_against_schema(&schema, "1", &json!([1])),
            Err(SearchIndexError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_get_missing_document_is_none() {
        let provider = InMemoryProvider::new();
        let client = client_with(&provider);
        client.ensure_index("subject", &Subject::schema()).await.unwrap();

        let result = client.get_document::<Subject>("subject", 404).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_wrong_shape_is_deserialization_error() {
        let provider = InMemoryProvider::new();
        provider
            .index_document("subject", "1", json!({ "id": "one" }), RefreshPolicy::WaitFor)
            .await
            .unwrap();
        let client = client_with(&provider);

        let result = client.get_document::<Subject>("subject", 1).await;
        assert!(matches!(result, Err(SearchIndexError::DeserializationError(_))));
    }

    #[tokio::test]
    async fn test_search_by_genre() {
        let provider = InMemoryProvider::new();
        let client = client_with(&provider);
        client.ensure_index("subject", &Subject::schema()).await.unwrap();

        // Written out of order to check the sort
        client
            .upsert_document("subject", &subject(2, "Comedy", &["剧情", "喜剧"]))
            .await
            .unwrap();
        client
            .upsert_document("subject", &subject(1, "Crime", &["犯罪", "剧情"]))
            .await
            .unwrap();

        let result = client
            .search::<Subject>("subject", &SearchQuery::term("genres", "剧情"))
            .await
            .unwrap();

        assert_eq!(result.total, 2);
        let ids: Vec<i64> = result.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_search_total_matches_count() {
        let provider = InMemoryProvider::new();
        let client = client_with(&provider);

        for id in (1..=5).rev() {
            let genres: &[&str] = if id % 2 == 0 { &["even"] } else { &["odd"] };
            client
                .upsert_document("subject", &subject(id, "t", genres))
                .await
                .unwrap();
        }

        let result = client
            .search::<Subject>("subject", &SearchQuery::term("genres", "odd"))
            .await
            .unwrap();

        assert_eq!(result.total, 3);
        assert_eq!(result.len(), 3);
        let ids: Vec<i64> = result.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn test_search_window_and_descending_sort() {
        let provider = InMemoryProvider::new();
        let client = client_with(&provider);

        for id in 1..=6 {
            client
                .upsert_document("subject", &subject(id, "t", &["all"]))
                .await
                .unwrap();
        }

        let query = SearchQuery::term("genres", "all")
            .with_window(1, 2)
            .sorted_by("id", SortOrder::Desc);
        let result = client.search::<Subject>("subject", &query).await.unwrap();

        assert_eq!(result.total, 6);
        let ids: Vec<i64> = result.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![5, 4]);
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty() {
        let provider = InMemoryProvider::new();
        let client = client_with(&provider);
        client
            .upsert_document("subject", &subject(1, "t", &["剧情"]))
            .await
            .unwrap();

        let result = client
            .search::<Subject>("subject", &SearchQuery::term("genres", "纪录片"))
            .await
            .unwrap();

        assert_eq!(result.total, 0);
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_search_validation() {
        let provider = InMemoryProvider::new();
        let client = SearchIndexClient::with_config(
            Box::new(provider),
            SearchIndexConfig::with_max_result_window(100),
        );

        let zero_size = SearchQuery::term("genres", "x").with_window(0, 0);
        let result = client.search::<Subject>("subject", &zero_size).await;
        assert!(matches!(result, Err(SearchIndexError::ValidationError(_))));

        let too_deep = SearchQuery::term("genres", "x").with_window(95, 10);
        let result = client.search::<Subject>("subject", &too_deep).await;
        assert!(matches!(result, Err(SearchIndexError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_search_missing_index_is_query_failure() {
        let client = client_with(&InMemoryProvider::new());

        let result = client
            .search::<Subject>("nowhere", &SearchQuery::term("genres", "x"))
            .await;
        assert!(matches!(result, Err(SearchIndexError::QueryFailed(_))));
    }

    #[tokio::test]
    async fn test_search_undecodable_hit() {
        let provider = InMemoryProvider::new();
        provider
            .index_document(
                "subject",
                "1",
                json!({ "id": 1, "genres": ["x"] }),
                RefreshPolicy::WaitFor,
            )
            .await
            .unwrap();
        let client = client_with(&provider);

        let result = client
            .search::<Subject>("subject", &SearchQuery::term("genres", "x"))
            .await;
        assert!(matches!(result, Err(SearchIndexError::DeserializationError(_))));
    }

    #[tokio::test]
    async fn test_health_check() {
        let client = client_with(&InMemoryProvider::new());
        assert!(client.health_check().await.unwrap());

        let client = SearchIndexClient::new(Box::new(InMemoryProvider::unavailable()));
        assert!(client.health_check().await.is_err());
    }

    #[test]
    fn test_default_config() {
        let client = client_with(&InMemoryProvider::new());
        assert_eq!(client.config().refresh, RefreshPolicy::WaitFor);
        assert!(client.config().pretty);
        assert_eq!(client.config().max_result_window, 10_000);
    }
}
