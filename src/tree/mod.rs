// src/tree/mod.rs
//! Key-based search over aggregation trees.
//!
//! Backend aggregation responses have no fixed shape: bucket arrays nest to
//! arbitrary depth and any bucket may carry both counts and sub-aggregations.
//! Nodes are therefore located by key name wherever they occur, never by
//! position.

pub mod extract;

pub use extract::{extract_value, Extraction, ValueSource};

use serde_json::Value;

/// Envelope key under which backends return the aggregation tree.
pub const AGGREGATIONS: &str = "aggregations";

/// Separator for segmented path keys (`"byStatus.buckets"`).
pub const PATH_SEPARATOR: char = '.';

/// Returns the node path resolution starts from.
///
/// A raw backend response wraps the tree in an `aggregations` object; a bare
/// tree is searched as-is.
#[must_use]
pub fn aggregation_root(document: &Value) -> &Value {
    match document.get(AGGREGATIONS) {
        Some(inner) if inner.is_object() => inner,
        _ => document,
    }
}

/// Finds every value stored under `key` anywhere below `node`.
///
/// Matches come back in document order. A matched subtree is returned whole
/// and is not searched again for the same key.
#[must_use]
pub fn find_values<'a>(node: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect_values(node, key, &mut found);
    found
}

fn collect_values<'a>(node: &'a Value, key: &str, found: &mut Vec<&'a Value>) {
    match node {
        Value::Object(map) => {
            for (name, child) in map {
                if name == key {
                    found.push(child);
                } else {
                    collect_values(child, key, found);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_values(item, key, found);
            }
        }
        _ => {}
    }
}

/// Resolves a declared aggregation path against a document.
///
/// The whole path is first looked up as one literal key, so aggregation
/// names containing `.` stay addressable. Failing that, each `.`-separated
/// segment is searched for below the matches of the previous one. Absent
/// paths yield an empty list.
#[must_use]
pub fn resolve<'a>(document: &'a Value, path: &str) -> Vec<&'a Value> {
    let root = aggregation_root(document);
    let literal = path.trim();
    if literal.is_empty() {
        return Vec::new();
    }

    let found = find_values(root, literal);
    if !found.is_empty() || !literal.contains(PATH_SEPARATOR) {
        return found;
    }

    let segments: Vec<&str> = literal
        .split(PATH_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.is_empty() {
        return Vec::new();
    }

    segments.iter().fold(vec![root], |nodes, segment| {
        nodes
            .into_iter()
            .flat_map(|node| find_values(node, segment))
            .collect()
    })
}

/// Reads a JSON scalar as a finite number.
///
/// Numeric strings are parsed after trimming. Everything else, including
/// `NaN` and infinities, is rejected.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_prefers_literal_dotted_key() {
        let doc = json!({"aggregations": {
            "pb.amritsar": {"doc_count": 4},
            "pb": {"amritsar": {"doc_count": 99}}
        }});
        assert_eq!(resolve(&doc, "pb.amritsar"), vec![&json!({"doc_count": 4})]);

        let segmented = json!({"pb": {"amritsar": {"doc_count": 99}}});
        assert_eq!(resolve(&segmented, "pb.amritsar"), vec![&json!({"doc_count": 99})]);
    }

    #[test]
    fn test_find_values_document_order() {
        let doc = json!({
            "a": {"status": 1},
            "b": [{"status": 2}, {"nested": {"status": 3}}],
            "status": 4
        });
        let found: Vec<_> = find_values(&doc, "status").into_iter().cloned().collect();
        assert_eq!(found, vec![json!(1), json!(2), json!(3), json!(4)]);
    }

    #[test]
    fn test_match_is_not_searched_again() {
        let doc = json!({"status": {"status": {"doc_count": 1}}});
        assert_eq!(find_values(&doc, "status").len(), 1);
    }

    #[test]
    fn test_resolve_scopes_to_aggregations_envelope() {
        let doc = json!({
            "hits": {"total": {"value": 999}},
            "aggregations": {"total": {"value": 5}}
        });
        let found = resolve(&doc, "total");
        assert_eq!(found, vec![&json!({"value": 5})]);
    }

    #[test]
    fn test_resolve_segmented_path() {
        let doc = json!({
            "open": {"count": {"value": 1}},
            "closed": {"count": {"value": 2}}
        });
        let found = resolve(&doc, "closed.count");
        assert_eq!(found, vec![&json!({"value": 2})]);
    }

    #[test]
    fn test_resolve_blank_path_is_empty() {
        let doc = json!({"a": 1});
        assert!(resolve(&doc, "").is_empty());
        assert!(resolve(&doc, " . ").is_empty());
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(3)), Some(3.0));
        assert_eq!(coerce_number(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!(true)), None);
        assert_eq!(coerce_number(&Value::Null), None);
    }
}
