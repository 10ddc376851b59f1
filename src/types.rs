// src/types.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Chart type reported when a definition does not name one.
pub const DEFAULT_CHART_TYPE: &str = "metric";

/// A single named, valued, unit-labeled output of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    pub value: f64,
    pub symbol: String,
}

impl DataPoint {
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            symbol: symbol.into(),
        }
    }
}

/// The artifact returned to the caller for one visualization code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub visualization_code: String,
    pub chart_name: String,
    pub chart_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drill_chart: Option<String>,
    pub data_points: Vec<DataPoint>,
}

impl AggregateResult {
    /// An empty result carrying only the identifying metadata.
    #[must_use]
    pub fn empty(visualization_code: &str, chart_name: &str) -> Self {
        Self {
            visualization_code: visualization_code.to_string(),
            chart_name: chart_name.to_string(),
            chart_type: DEFAULT_CHART_TYPE.to_string(),
            drill_chart: None,
            data_points: Vec::new(),
        }
    }
}

/// Inclusive request window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: i64,
    pub end_date: i64,
}

impl DateRange {
    const MILLIS_PER_DAY: i64 = 86_400_000;

    /// Number of whole or partial days covered, never below one.
    ///
    /// `None` when the span does not fit in an `i64`.
    #[must_use]
    pub fn days(&self) -> Option<i64> {
        let span = self.end_date.checked_sub(self.start_date)?.max(0);
        let days = span / Self::MILLIS_PER_DAY + i64::from(span % Self::MILLIS_PER_DAY != 0);
        Some(days.max(1))
    }
}

/// Per-request input handed to chart assembly and post-aggregation strategies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    pub visualization_code: String,
    #[serde(default)]
    pub request_date: Option<DateRange>,
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
}

impl ChartRequest {
    #[must_use]
    pub fn new(visualization_code: impl Into<String>) -> Self {
        Self {
            visualization_code: visualization_code.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_date_range(mut self, start_date: i64, end_date: i64) -> Self {
        self.request_date = Some(DateRange {
            start_date,
            end_date,
        });
        self
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Reads a parameter as a number, coercing numeric strings.
    #[must_use]
    pub fn number_param(&self, key: &str) -> Option<f64> {
        self.parameters.get(key).and_then(crate::tree::coerce_number)
    }
}

/// Stages a chart build moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Resolving,
    Extracting,
    Reducing,
    StrategyApplying,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Resolving => "resolving",
            Self::Extracting => "extracting",
            Self::Reducing => "reducing",
            Self::StrategyApplying => "strategy",
            Self::Done => "done",
        };
        f.write_str(label)
    }
}

/// Whether a chart was fully computed or degraded at some stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ChartStatus {
    Complete,
    Degraded { stage: Stage, reason: String },
}

/// A chart result together with how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOutcome {
    pub result: AggregateResult,
    pub status: ChartStatus,
    /// Matched values that were present but could not be read as numbers.
    pub malformed_values: usize,
}

impl ChartOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == ChartStatus::Complete
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.is_complete()
    }
}

/// Aggregated outcomes for a batch of charts, in request order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub charts: Vec<ChartOutcome>,
    pub duration_ms: u128,
}

impl BatchReport {
    /// Returns true if any chart was degraded.
    #[must_use]
    pub fn has_degraded(&self) -> bool {
        self.charts.iter().any(ChartOutcome::is_degraded)
    }

    /// Returns the number of fully computed charts.
    #[must_use]
    pub fn complete_count(&self) -> usize {
        self.charts.iter().filter(|c| c.is_complete()).count()
    }

    /// The bare results, ready to hand to a renderer.
    #[must_use]
    pub fn results(&self) -> Vec<&AggregateResult> {
        self.charts.iter().map(|c| &c.result).collect()
    }
}
