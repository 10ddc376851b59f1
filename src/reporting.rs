//! Console and JSON output for chart results.

use crate::config::ChartDefinition;
use crate::error::Result as ChartResult;
use crate::types::{BatchReport, ChartOutcome, ChartStatus, DataPoint};
use anyhow::Result;
use colored::Colorize;
use std::fmt::Write;
use std::time::Duration;

/// Prints a batch report to stdout, one block per chart.
pub fn print_report(report: &BatchReport) {
    for outcome in &report.charts {
        print_outcome(outcome);
    }
    print_summary(report);
}

fn print_outcome(outcome: &ChartOutcome) {
    let result = &outcome.result;
    let title = if result.chart_name.is_empty() {
        result.visualization_code.clone()
    } else {
        format!("{} ({})", result.chart_name, result.visualization_code)
    };

    match &outcome.status {
        ChartStatus::Complete => println!("{} {}", "OK".green().bold(), title.bold()),
        ChartStatus::Degraded { stage, reason } => {
            println!("{} {}", "~".yellow().bold(), title.bold());
            println!("   {} degraded at {stage}: {}", "=".blue(), reason.yellow());
        }
    }

    for point in &result.data_points {
        println!("   {} {}", "|".blue(), format_point(point));
    }

    if outcome.malformed_values > 0 {
        println!(
            "   {} {} non-numeric {} read as 0",
            "=".blue(),
            outcome.malformed_values,
            pluralize("value", outcome.malformed_values)
        );
    }
    println!();
}

/// Formats one data point as `name: value symbol`.
#[must_use]
pub fn format_point(point: &DataPoint) -> String {
    if point.symbol.is_empty() {
        format!("{}: {}", point.name, point.value)
    } else {
        format!("{}: {} {}", point.name, point.value, point.symbol.dimmed())
    }
}

fn print_summary(report: &BatchReport) {
    #[allow(clippy::cast_possible_truncation)]
    let duration = Duration::from_millis(report.duration_ms as u64);
    let total = report.charts.len();
    let complete = report.complete_count();

    if complete == total {
        println!(
            "{} Built {total} {} in {duration:?}.",
            "OK".green().bold(),
            pluralize("chart", total)
        );
    } else {
        println!(
            "{} Built {complete} of {total} {} fully, {} degraded ({duration:?}).",
            "~".yellow().bold(),
            pluralize("chart", total),
            total - complete
        );
    }
}

/// Formats catalog validation results, one line per chart.
#[must_use]
pub fn format_validation(results: &[(&str, ChartResult<ChartDefinition>)]) -> String {
    let mut out = String::new();
    for (code, result) in results {
        let _ = match result {
            Ok(def) => writeln!(
                out,
                "{} {code}: {} [{}; {} {}]",
                "OK".green(),
                def.chart_name,
                def.action,
                def.aggregation_paths.len(),
                pluralize("path", def.aggregation_paths.len())
            ),
            Err(e) => writeln!(out, "{} {code}: {e}", "X".red().bold()),
        };
    }
    out
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Prints a serializable object as JSON to stdout.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_json<T: serde::Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{json}");
    Ok(())
}
