//! Dependency initialization and wiring for the demos.

use tracing::info;

use crate::config::Settings;
use crate::DemoError;
use search_client_repository::{OpenSearchClient, SearchIndexClient, SearchIndexError};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The search client, ready to use.
    pub client: SearchIndexClient,
}

impl Dependencies {
    /// Build the OpenSearch-backed client, checking cluster health first when
    /// `settings.healthcheck` is set.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(DemoError)` - If the client cannot be built, or the health check
    ///   is enabled and the cluster is down
    pub async fn new(settings: &Settings) -> Result<Self, DemoError> {
        info!(
            opensearch_url = %settings.opensearch_url,
            refresh = ?settings.refresh,
            healthcheck = settings.healthcheck,
            "Initializing dependencies"
        );

        let provider = OpenSearchClient::new(settings.opensearch_url.as_str()).await?;
        let client = SearchIndexClient::with_config(Box::new(provider), settings.index_config());

        Self::from_client(client, settings.healthcheck).await
    }

    /// Wrap a constructed client, verifying it only when `healthcheck` is set.
    pub async fn from_client(client: SearchIndexClient, healthcheck: bool) -> Result<Self, DemoError> {
        if healthcheck {
            Self::verify(client).await
        } else {
            Ok(Self { client })
        }
    }

    /// Wrap an already constructed client after checking its backend health.
    pub async fn verify(client: SearchIndexClient) -> Result<Self, DemoError> {
        let healthy = client.health_check().await?;
        if !healthy {
            return Err(SearchIndexError::unavailable("cluster status is red").into());
        }

        info!("OpenSearch connection verified");

        Ok(Self { client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_client_repository::memory::InMemoryProvider;

    #[tokio::test]
    async fn test_verify_healthy() {
        let client = SearchIndexClient::new(Box::new(InMemoryProvider::new()));
        assert!(Dependencies::verify(client).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_unreachable() {
        let client = SearchIndexClient::new(Box::new(InMemoryProvider::unavailable()));

        let result = Dependencies::verify(client).await;
        assert!(matches!(
            result,
            Err(DemoError::SearchError(SearchIndexError::BackendUnavailable(_)))
        ));
    }

    #[tokio::test]
    async fn test_health_check_skipped_by_default() {
        let client = SearchIndexClient::new(Box::new(InMemoryProvider::unavailable()));

        // No cluster call is made, so an unreachable backend still wires up.
        assert!(Dependencies::from_client(client, false).await.is_ok());
    }

    #[tokio::test]
    async fn test_health_check_when_enabled() {
        let client = SearchIndexClient::new(Box::new(InMemoryProvider::unavailable()));
        let result = Dependencies::from_client(client, true).await;
        assert!(matches!(
            result,
            Err(DemoError::SearchError(SearchIndexError::BackendUnavailable(_)))
        ));

        let client = SearchIndexClient::new(Box::new(InMemoryProvider::new()));
        assert!(Dependencies::from_client(client, true).await.is_ok());
    }
}
