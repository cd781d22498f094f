//! Configuration types for the SearchIndexClient.

use crate::types::RefreshPolicy;

/// Largest `from + size` the backend serves by default (`index.max_result_window`).
pub const DEFAULT_MAX_RESULT_WINDOW: usize = 10_000;

/// Configuration for the SearchIndexClient.
#[derive(Debug, Clone)]
pub struct SearchIndexConfig {
    /// Visibility guarantee requested on every write.
    pub refresh: RefreshPolicy,
    /// Ask the backend to pretty-print search responses.
    pub pretty: bool,
    /// Queries reaching past this many hits are rejected before being sent.
    pub max_result_window: usize,
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            refresh: RefreshPolicy::WaitFor,
            pretty: true,
            max_result_window: DEFAULT_MAX_RESULT_WINDOW,
        }
    }
}

impl SearchIndexConfig {
    /// Create a config with a custom refresh policy.
    pub fn with_refresh(refresh: RefreshPolicy) -> Self {
        Self {
            refresh,
            ..Self::default()
        }
    }

    /// Create a config with a custom result window limit.
    pub fn with_max_result_window(max_result_window: usize) -> Self {
        Self {
            max_result_window,
            ..Self::default()
        }
    }
}
