//! Term query parameters and typed search results.

use serde::{Deserialize, Serialize};

/// Default number of hits returned by a query.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default field used to order hits.
pub const DEFAULT_SORT_FIELD: &str = "id";

/// Sort direction for search hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// An exact-match query on a keyword field with a result window and ordering.
///
/// `from` is unsigned so the offset can never be negative; `size` must be
/// greater than zero, which [`SearchQuery::validate`] checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Keyword field to match against.
    pub field: String,
    /// Exact value the field must contain.
    pub value: String,
    /// Offset of the first hit to return.
    pub from: usize,
    /// Maximum number of hits to return.
    pub size: usize,
    /// Field to order hits by.
    pub sort_field: String,
    /// Direction of the ordering.
    pub sort_order: SortOrder,
}

impl SearchQuery {
    /// Create a term query returning the first ten hits ordered by ascending id.
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            from: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            sort_order: SortOrder::Asc,
        }
    }

    /// Set the result window.
    pub fn with_window(mut self, from: usize, size: usize) -> Self {
        self.from = from;
        self.size = size;
        self
    }

    /// Set the sort field and direction.
    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = field.into();
        self.sort_order = order;
        self
    }

    /// Check the query is well formed.
    pub fn validate(&self) -> Result<(), String> {
        if self.field.trim().is_empty() {
            return Err("query field must not be empty".to_string());
        }
        if self.sort_field.trim().is_empty() {
            return Err("sort field must not be empty".to_string());
        }
        if self.size == 0 {
            return Err("size must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Index one past the last hit this query can reach.
    pub fn window_end(&self) -> usize {
        self.from.saturating_add(self.size)
    }
}

/// Outcome of a search: the total number of matches and the requested page
/// of decoded documents, in backend order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<D> {
    /// Number of documents matching the query, regardless of the window.
    pub total: u64,
    /// Time the backend spent executing the query.
    pub took_ms: u64,
    /// Documents in the requested window.
    pub hits: Vec<D>,
}

impl<D> SearchResult<D> {
    pub fn empty() -> Self {
        Self {
            total: 0,
            took_ms: 0,
            hits: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, D> {
        self.hits.iter()
    }
}

impl<D> IntoIterator for SearchResult<D> {
    type Item = D;
    type IntoIter = std::vec::IntoIter<D>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}
