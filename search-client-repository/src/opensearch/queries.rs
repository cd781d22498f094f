//! OpenSearch query builders and response parsers.
//!
//! Request bodies are built as `serde_json::Value`; responses are read back
//! from the same representation so both the old (`hits.total: n`) and the
//! current (`hits.total: { "value": n }`) layouts are accepted.

use serde_json::{json, Value};

use crate::errors::SearchIndexError;
use crate::types::{RawSearchHits, StoredDocument};
use search_client_shared::SearchQuery;

/// Build the search body for a term query.
///
/// The window (`from` / `size`) travels as URL parameters, not in the body.
pub fn build_term_query(query: &SearchQuery) -> Value {
    json!({
        "query": {
            "term": {
                query.field.as_str(): query.value
            }
        },
        "sort": [
            { query.sort_field.as_str(): { "order": query.sort_order.as_str() } }
        ]
    })
}

/// Read the total hit count from a search response.
pub fn parse_total(body: &Value) -> Option<u64> {
    let total = body.get("hits")?.get("total")?;
    total
        .as_u64()
        .or_else(|| total.get("value").and_then(Value::as_u64))
}

/// Extract the total, timing and hit sources from a search response.
pub fn parse_search_response(body: &Value) -> Result<RawSearchHits, SearchIndexError> {
    let total = parse_total(body)
        .ok_or_else(|| SearchIndexError::deserialization("search response has no hits.total"))?;

    let hits = body
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(Value::as_array)
        .ok_or_else(|| SearchIndexError::deserialization("search response has no hits.hits"))?;

    let sources = hits
        .iter()
        .map(|hit| {
            hit.get("_source").cloned().ok_or_else(|| {
                let id = hit.get("_id").and_then(Value::as_str).unwrap_or("?");
                SearchIndexError::deserialization(format!("hit {} has no _source", id))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawSearchHits {
        total,
        took_ms: body.get("took").and_then(Value::as_u64).unwrap_or(0),
        sources,
    })
}

/// Interpret a get-document response body.
///
/// Returns `Ok(None)` when the backend reports `found: false`.
pub fn parse_get_response(body: Value) -> Result<Option<StoredDocument<Value>>, SearchIndexError> {
    if !body.get("found").and_then(Value::as_bool).unwrap_or(false) {
        return Ok(None);
    }

    let index = body
        .get("_index")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let id = body
        .get("_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let version = body.get("_version").and_then(Value::as_i64);

    let document = body
        .get("_source")
        .cloned()
        .ok_or_else(|| SearchIndexError::deserialization(format!("document {} has no _source", id)))?;

    Ok(Some(StoredDocument {
        index,
        id,
        version,
        document,
    }))
}

/// Read the `error.type` from an error response body, if present.
pub fn error_type(body: &Value) -> Option<&str> {
    body.get("error")?.get("type")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_client_shared::SortOrder;

    #[test]
    fn test_build_term_query() {
        let query = SearchQuery::term("tags", "金奈整體浴室");
        let body = build_term_query(&query);

        assert_eq!(body["query"]["term"]["tags"], "金奈整體浴室");
        assert_eq!(body["sort"][0]["id"]["order"], "asc");
        assert!(body.get("from").is_none());
        assert!(body.get("size").is_none());
    }

    #[test]
    fn test_build_term_query_descending() {
        let query = SearchQuery::term("genres", "剧情").sorted_by("title", SortOrder::Desc);
        let body = build_term_query(&query);

        assert_eq!(body["sort"][0]["title"]["order"], "desc");
    }

    #[test]
    fn test_parse_total_both_layouts() {
        let current = json!({ "hits": { "total": { "value": 7, "relation": "eq" }, "hits": [] } });
        let legacy = json!({ "hits": { "total": 4, "hits": [] } });

        assert_eq!(parse_total(&current), Some(7));
        assert_eq!(parse_total(&legacy), Some(4));
        assert_eq!(parse_total(&json!({})), None);
    }

    #[test]
    fn test_parse_search_response() {
        let body = json!({
            "took": 3,
            "timed_out": false,
            "hits": {
                "total": { "value": 2, "relation": "eq" },
                "max_score": null,
                "hits": [
                    { "_index": "subject", "_id": "1", "_score": null, "_source": { "id": 1 }, "sort": [1] },
                    { "_index": "subject", "_id": "2", "_score": null, "_source": { "id": 2 }, "sort": [2] }
                ]
            }
        });

        let hits = parse_search_response(&body).unwrap();

        assert_eq!(hits.total, 2);
        assert_eq!(hits.took_ms, 3);
        assert_eq!(hits.sources, vec![json!({ "id": 1 }), json!({ "id": 2 })]);
    }

    #[test]
    fn test_parse_search_response_empty() {
        let body = json!({ "took": 1, "hits": { "total": { "value": 0 }, "hits": [] } });

        let hits = parse_search_response(&body).unwrap();

        assert_eq!(hits.total, 0);
        assert!(hits.sources.is_empty());
    }

    #[test]
    fn test_parse_search_response_missing_source() {
        let body = json!({ "hits": { "total": 1, "hits": [ { "_id": "9" } ] } });

        let err = parse_search_response(&body).unwrap_err();
        assert!(matches!(err, SearchIndexError::DeserializationError(_)));
        assert!(err.to_string().contains("9"));
    }

    #[test]
    fn test_parse_get_response_found() {
        let body = json!({
            "_index": "product",
            "_id": "1",
            "_version": 2,
            "_seq_no": 1,
            "found": true,
            "_source": { "id": 1, "title": "bath" }
        });

        let stored = parse_get_response(body).unwrap().unwrap();

        assert_eq!(stored.index, "product");
        assert_eq!(stored.id, "1");
        assert_eq!(stored.version, Some(2));
        assert_eq!(stored.document["title"], "bath");
    }

    #[test]
    fn test_parse_get_response_not_found() {
        let body = json!({ "_index": "product", "_id": "42", "found": false });
        assert!(parse_get_response(body).unwrap().is_none());
    }

    #[test]
    fn test_error_type() {
        let body = json!({
            "error": { "type": "resource_already_exists_exception", "reason": "index [product] already exists" },
            "status": 400
        });

        assert_eq!(error_type(&body), Some("resource_already_exists_exception"));
        assert_eq!(error_type(&json!({})), None);
    }
}
