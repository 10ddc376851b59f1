// tests/cli_exit.rs - Exit code tests
use chartsmith_core::cli::args::BuildArgs;
use chartsmith_core::cli::handlers::{handle_build, handle_check, handle_strategies};
use chartsmith_core::config::Config;
use chartsmith_core::exit::ChartsmithExit;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const CHARTS: &str = r#"{
    "total": {"chartName": "Total", "action": "SUM", "aggregationPaths": ["status"]},
    "broken": {"chartName": "Broken", "action": "MEAN", "aggregationPaths": ["status"]}
}"#;

fn temp() -> TempDir {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("charts.json"), CHARTS).unwrap();
    fs::write(
        d.path().join("doc.json"),
        r#"{"aggregations": {"status": {"doc_count": 4}}}"#,
    )
    .unwrap();
    d
}

fn build_args(d: &TempDir, codes: &[&str]) -> BuildArgs {
    BuildArgs {
        codes: codes.iter().map(|c| (*c).to_string()).collect(),
        doc: d.path().join("doc.json"),
        catalog: Some(d.path().join("charts.json")),
        params: None,
        window: None,
        json: true,
    }
}

#[test]
fn test_exit_0_all_charts_built() {
    let d = temp();
    let exit = handle_build(&Config::new(), build_args(&d, &["total"])).unwrap();
    assert_eq!(exit, ChartsmithExit::Success);
}

#[test]
fn test_exit_3_degraded_chart() {
    let d = temp();
    let exit = handle_build(&Config::new(), build_args(&d, &["total", "broken"])).unwrap();
    assert_eq!(exit, ChartsmithExit::Degraded);
}

#[test]
fn test_exit_2_document_not_json() {
    let d = temp();
    fs::write(d.path().join("doc.json"), "{not json").unwrap();
    let exit = handle_build(&Config::new(), build_args(&d, &["total"])).unwrap();
    assert_eq!(exit, ChartsmithExit::InvalidInput);
}

#[test]
fn test_missing_catalog_is_error() {
    let d = temp();
    let mut args = build_args(&d, &["total"]);
    args.catalog = Some(PathBuf::from("/definitely/not/here.json"));
    assert!(handle_build(&Config::new(), args).is_err());
}

#[test]
fn test_check_flags_invalid_definitions() {
    let d = temp();
    let exit = handle_check(&Config::new(), Some(&d.path().join("charts.json"))).unwrap();
    assert_eq!(exit, ChartsmithExit::Degraded);

    fs::write(
        d.path().join("good.json"),
        r#"{"total": {"chartName": "Total", "action": "SUM", "aggregationPaths": ["status"], "postAggregationTheory": "topNRank"}}"#,
    )
    .unwrap();
    let exit = handle_check(&Config::new(), Some(&d.path().join("good.json"))).unwrap();
    assert_eq!(exit, ChartsmithExit::Success);
}

#[test]
fn test_exit_codes_distinct() {
    let codes = [
        ChartsmithExit::Success.code(),
        ChartsmithExit::Error.code(),
        ChartsmithExit::InvalidInput.code(),
        ChartsmithExit::Degraded.code(),
    ];
    assert_eq!(codes, [0, 1, 2, 3]);
    assert_eq!(handle_strategies(), ChartsmithExit::Success);
}
