// tests/unit_tree.rs
//! Path resolution and value extraction over backend-shaped documents.

use chartsmith_core::tree::{extract_value, resolve, ValueSource};
use serde_json::json;

#[test]
fn test_resolve_inside_nested_bucket_arrays() {
    let doc = json!({
        "aggregations": {
            "byDistrict": {"buckets": [
                {"key": "d1", "byUlb": {"buckets": [
                    {"key": "u1", "collected": {"value": 100.0}},
                    {"key": "u2", "collected": {"value": 50.0}}
                ]}},
                {"key": "d2", "byUlb": {"buckets": [
                    {"key": "u3", "collected": {"value": 25.0}}
                ]}}
            ]}
        }
    });
    let values: Vec<f64> = resolve(&doc, "collected")
        .into_iter()
        .map(|n| extract_value(n).value)
        .collect();
    assert_eq!(values, vec![100.0, 50.0, 25.0]);
}

#[test]
fn test_resolve_missing_path_is_empty() {
    let doc = json!({"aggregations": {"a": {"doc_count": 1}}});
    assert!(resolve(&doc, "b").is_empty());
}

#[test]
fn test_resolve_does_not_mutate_document() {
    let doc = json!({"a": [{"b": {"value": 1}}]});
    let before = doc.clone();
    let _ = resolve(&doc, "b");
    assert_eq!(doc, before);
}

#[test]
fn test_mixed_content_bucket() {
    // Leaf and branch at once: every doc_count in the subtree is summed.
    let node = json!({
        "doc_count": 90,
        "byStatus": {"buckets": [{"key": "PAID", "doc_count": 60}, {"key": "DUE", "doc_count": 30}]}
    });
    let e = extract_value(&node);
    assert_eq!(e.source, ValueSource::DocCount);
    assert_eq!(e.value, 180.0);
}

#[test]
fn test_metric_sum_inside_buckets_wins_over_counts() {
    let node = json!({
        "doc_count": 3,
        "buckets": [
            {"doc_count": 1, "amount": {"value": 10.0}},
            {"doc_count": 2, "amount": {"value": 15.5}}
        ]
    });
    let e = extract_value(&node);
    assert_eq!(e.source, ValueSource::Metric);
    assert_eq!(e.value, 25.5);
}

#[test]
fn test_empty_metric_null_reads_zero_without_warning() {
    let e = extract_value(&json!({"avg_days": {"value": null}}));
    assert_eq!(e.value, 0.0);
    assert_eq!(e.malformed, 0);
    assert_eq!(e.source, ValueSource::Metric);
}
