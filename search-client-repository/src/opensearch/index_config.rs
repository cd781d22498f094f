//! OpenSearch index settings and mappings.
//!
//! This module turns an [`IndexSchema`] into the body of a create-index request.

use serde_json::{json, Map, Value};

use search_client_shared::IndexSchema;

/// Build the create-index body for a schema.
///
/// Mappings are typeless: each declared field becomes an entry under
/// `mappings.properties` carrying only its `type`.
///
/// ```text
/// { "mappings": { "properties": { "id": { "type": "long" }, ... } } }
/// ```
pub fn build_index_body(schema: &IndexSchema) -> Value {
    let properties: Map<String, Value> = schema
        .fields()
        .map(|(name, kind)| (name.to_string(), json!({ "type": kind.as_str() })))
        .collect();

    json!({
        "mappings": {
            "properties": properties
        }
    })
}
