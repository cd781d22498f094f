//! Request and response types exchanged with search index providers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// When a write becomes visible to subsequent reads and searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Return once the write is visible (`refresh=wait_for`).
    #[default]
    WaitFor,
    /// Force an immediate refresh of the affected shards (`refresh=true`).
    Immediate,
    /// Return as soon as the write is durable (`refresh=false`).
    None,
}

impl RefreshPolicy {
    /// Parse the backend's spelling of the refresh parameter.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wait_for" => Some(Self::WaitFor),
            "true" | "immediate" => Some(Self::Immediate),
            "false" | "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Whether a write under this policy is visible as soon as it returns.
    pub fn is_synchronous(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Metadata the backend returns after writing a document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexReceipt {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    /// `created` or `updated`.
    #[serde(default)]
    pub result: String,
}

impl IndexReceipt {
    pub fn was_created(&self) -> bool {
        self.result == "created"
    }
}

/// A document read back from the index together with its backend metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument<D> {
    pub index: String,
    pub id: String,
    pub version: Option<i64>,
    pub document: D,
}

impl<D> StoredDocument<D> {
    /// Replace the payload, keeping the metadata.
    pub fn map<T>(self, f: impl FnOnce(D) -> T) -> StoredDocument<T> {
        StoredDocument {
            index: self.index,
            id: self.id,
            version: self.version,
            document: f(self.document),
        }
    }
}

/// Raw search hits as returned by a provider, before typed decoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSearchHits {
    pub total: u64,
    pub took_ms: u64,
    /// The `_source` of each hit, in backend order.
    pub sources: Vec<Value>,
}
