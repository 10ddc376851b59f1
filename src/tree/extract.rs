// src/tree/extract.rs
//! Numeric value extraction from matched aggregation nodes.

use serde_json::Value;

use super::{coerce_number, find_values};

/// Field holding an explicit metric result.
pub const VALUE: &str = "value";
/// Field holding a bucket's document count.
pub const DOC_COUNT: &str = "doc_count";

/// Where an extracted number came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueSource {
    /// The node itself was a scalar.
    Scalar,
    /// One or more `value` fields.
    Metric,
    /// One or more `doc_count` fields.
    DocCount,
    /// Neither field was present.
    #[default]
    Missing,
}

/// Result of reading one node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extraction {
    pub value: f64,
    pub source: ValueSource,
    /// Fields that were present but not coercible to a number.
    pub malformed: usize,
}

/// Returns the numeric value a node represents.
///
/// `value` fields anywhere in the node are preferred and summed; without any,
/// `doc_count` fields are summed instead. A node with neither reads as `0`.
/// Unreadable fields count as `0` and are tallied in `malformed`; `null` is
/// the backend's "no data" marker and contributes `0` silently.
#[must_use]
pub fn extract_value(node: &Value) -> Extraction {
    match node {
        Value::Object(_) | Value::Array(_) => {}
        Value::Null => return Extraction::default(),
        scalar => return sum_fields(&[scalar], ValueSource::Scalar),
    }

    let metrics = find_values(node, VALUE);
    if !metrics.is_empty() {
        return sum_fields(&metrics, ValueSource::Metric);
    }

    let counts = find_values(node, DOC_COUNT);
    if !counts.is_empty() {
        return sum_fields(&counts, ValueSource::DocCount);
    }

    Extraction::default()
}

fn sum_fields(fields: &[&Value], source: ValueSource) -> Extraction {
    let mut out = Extraction {
        value: 0.0,
        source,
        malformed: 0,
    };
    for field in fields {
        if field.is_null() {
            continue;
        }
        match coerce_number(field) {
            Some(n) => out.value += n,
            None => out.malformed += 1,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_preferred_over_doc_count() {
        let node = json!({"doc_count": 40, "sum_amount": {"value": 12.5}});
        let e = extract_value(&node);
        assert_eq!(e.value, 12.5);
        assert_eq!(e.source, ValueSource::Metric);
    }

    #[test]
    fn test_doc_count_fallback() {
        let e = extract_value(&json!({"doc_count": 7}));
        assert_eq!(e.value, 7.0);
        assert_eq!(e.source, ValueSource::DocCount);
    }

    #[test]
    fn test_nested_doc_counts_are_summed() {
        let node = json!({"buckets": [{"doc_count": 3}, {"doc_count": 4}]});
        assert_eq!(extract_value(&node).value, 7.0);
    }

    #[test]
    fn test_missing_reads_zero() {
        let e = extract_value(&json!({"buckets": []}));
        assert_eq!(e.value, 0.0);
        assert_eq!(e.source, ValueSource::Missing);
        assert_eq!(e.malformed, 0);
    }

    #[test]
    fn test_string_coerced_and_garbage_counted() {
        let node = json!({"a": {"value": "10"}, "b": {"value": "n/a"}, "c": {"value": null}});
        let e = extract_value(&node);
        assert_eq!(e.value, 10.0);
        assert_eq!(e.malformed, 1);
    }

    #[test]
    fn test_scalar_node_read_directly() {
        assert_eq!(extract_value(&json!(42)).value, 42.0);
        assert_eq!(extract_value(&json!("4.5")).source, ValueSource::Scalar);
        assert_eq!(extract_value(&json!(false)).malformed, 1);
    }
}
