//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::{
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
        StatusCode,
    },
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    GetParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::build_index_body;
use crate::opensearch::queries::{
    build_term_query, error_type, parse_get_response, parse_search_response,
};
use crate::types::{IndexReceipt, RawSearchHits, RefreshPolicy, StoredDocument};
use search_client_shared::{IndexSchema, SearchQuery};

/// OpenSearch client implementation.
///
/// Talks to a single node over HTTP with proxies disabled.
///
/// # Example
///
/// ```ignore
/// use search_client_repository::{OpenSearchClient, SearchIndexClient};
///
/// let provider = OpenSearchClient::new("http://localhost:9200").await?;
/// let client = SearchIndexClient::new(Box::new(provider));
/// client.ensure_index("product", &Product::schema()).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or transport setup fails
    pub async fn new(url: &str) -> Result<Self, SearchIndexError> {
        let parsed_url = Url::parse(url)
            .map_err(|e| SearchIndexError::unavailable(format!("Invalid URL {}: {}", url, e)))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::unavailable(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self { client })
    }

    fn refresh_param(policy: RefreshPolicy) -> Refresh {
        match policy {
            RefreshPolicy::WaitFor => Refresh::WaitFor,
            RefreshPolicy::Immediate => Refresh::True,
            RefreshPolicy::None => Refresh::False,
        }
    }

    /// Convert the result window into the backend's signed parameters.
    fn window_params(query: &SearchQuery) -> Result<(i64, i64), SearchIndexError> {
        let from = i64::try_from(query.from)
            .map_err(|_| SearchIndexError::validation(format!("from={} is out of range", query.from)))?;
        let size = i64::try_from(query.size)
            .map_err(|_| SearchIndexError::validation(format!("size={} is out of range", query.size)))?;
        Ok((from, size))
    }

    /// Read a failed response's status and body for an error message.
    async fn failure_details(response: Response) -> (StatusCode, Value) {
        let status = response.status_code();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    #[instrument(skip(self))]
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::unavailable(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => {
                error!(status, index = %index, "Index exists check failed");
                Err(SearchIndexError::unavailable(format!(
                    "Index exists check for {} returned status {}",
                    index, status
                )))
            }
        }
    }

    #[instrument(skip(self, schema), fields(fields = schema.len()))]
    async fn create_index(
        &self,
        index: &str,
        schema: &IndexSchema,
    ) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(build_index_body(schema))
            .send()
            .await
            .map_err(|e| SearchIndexError::unavailable(e.to_string()))?;

        if response.status_code().is_success() {
            info!(index = %index, "Index created");
            return Ok(true);
        }

        let (status, body) = Self::failure_details(response).await;

        // Someone else created it between our exists check and this request
        if error_type(&body) == Some("resource_already_exists_exception") {
            debug!(index = %index, "Index already exists");
            return Ok(false);
        }

        error!(status = %status, body = %body, "Create index request failed");
        Err(SearchIndexError::schema_rejected(format!(
            "Create index {} failed with status {}: {}",
            index, status, body
        )))
    }

    #[instrument(skip(self, body))]
    async fn index_document(
        &self,
        index: &str,
        id: &str,
        body: Value,
        refresh: RefreshPolicy,
    ) -> Result<IndexReceipt, SearchIndexError> {
        let response = self
            .client
            .index(IndexParts::IndexId(index, id))
            .refresh(Self::refresh_param(refresh))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::unavailable(e.to_string()))?;

        if !response.status_code().is_success() {
            let (status, body) = Self::failure_details(response).await;
            error!(status = %status, body = %body, "Index request failed");
            return Err(SearchIndexError::write(format!(
                "Index of document {} failed with status {}: {}",
                id, status, body
            )));
        }

        let receipt = response
            .json::<IndexReceipt>()
            .await
            .map_err(|e| SearchIndexError::write(format!("Unreadable index response: {}", e)))?;

        debug!(doc_id = %receipt.id, result = %receipt.result, "Document indexed");
        Ok(receipt)
    }

    #[instrument(skip(self))]
    async fn get_document(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<StoredDocument<Value>>, SearchIndexError> {
        let response = self
            .client
            .get(GetParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| SearchIndexError::unavailable(e.to_string()))?;

        let status = response.status_code();

        // 404 with found=false for a missing document, or index_not_found for a missing index
        if status.as_u16() == 404 {
            debug!(doc_id = %id, "Document not found");
            return Ok(None);
        }

        if !status.is_success() {
            let (status, body) = Self::failure_details(response).await;
            error!(status = %status, body = %body, "Get request failed");
            return Err(SearchIndexError::query(format!(
                "Get of document {} failed with status {}: {}",
                id, status, body
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::deserialization(e.to_string()))?;

        parse_get_response(body)
    }

    #[instrument(skip(self, query), fields(field = %query.field, from = query.from, size = query.size))]
    async fn search(
        &self,
        index: &str,
        query: &SearchQuery,
        pretty: bool,
    ) -> Result<RawSearchHits, SearchIndexError> {
        let (from, size) = Self::window_params(query)?;

        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .from(from)
            .size(size)
            .pretty(pretty)
            .body(build_term_query(query))
            .send()
            .await
            .map_err(|e| SearchIndexError::unavailable(e.to_string()))?;

        if !response.status_code().is_success() {
            let (status, body) = Self::failure_details(response).await;
            error!(status = %status, body = %body, "Search request failed");
            return Err(SearchIndexError::query(format!(
                "Search on {} failed with status {}: {}",
                index, status, body
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::deserialization(e.to_string()))?;

        let hits = parse_search_response(&body)?;
        debug!(total = hits.total, returned = hits.sources.len(), took_ms = hits.took_ms, "Search completed");
        Ok(hits)
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchIndexError::unavailable(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::unavailable(e.to_string()))?;

        let status = body.get("status").and_then(Value::as_str).unwrap_or("red");
        debug!(status = %status, "Cluster health");
        Ok(status != "red")
    }
}
