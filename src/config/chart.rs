// src/config/chart.rs
//! Declarative chart definitions.
//!
//! Definitions are kept as raw JSON by the catalog and validated here, one
//! chart at a time, when a chart is built. A malformed definition therefore
//! fails only its own chart.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{ChartError, Result};
use crate::reduce::Action;
use crate::types::DEFAULT_CHART_TYPE;

/// Explicit numerator/denominator roles for a percentage chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentageRoles {
    pub numerator: String,
    pub denominators: Vec<String>,
}

/// A validated chart definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDefinition {
    pub chart_name: String,
    pub action: Action,
    pub aggregation_paths: Vec<String>,
    pub value_symbol: String,
    pub post_aggregation_strategy_key: Option<String>,
    pub percentage_roles: Option<PercentageRoles>,
    pub chart_type: String,
    pub drill_chart: Option<String>,
    pub strategy_params: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDefinition {
    chart_name: Option<String>,
    action: Option<String>,
    aggregation_paths: Option<Vec<String>>,
    #[serde(alias = "valueType")]
    value_symbol: Option<String>,
    #[serde(alias = "postAggregationTheory")]
    post_aggregation_strategy_key: Option<String>,
    numerator_path: Option<String>,
    denominator_paths: Option<Vec<String>>,
    chart_type: Option<String>,
    drill_chart: Option<String>,
    #[serde(default)]
    strategy_params: BTreeMap<String, Value>,
}

impl ChartDefinition {
    /// Validates a raw definition.
    ///
    /// # Errors
    /// Returns a configuration error for a missing required field, a field of
    /// the wrong type, or an unknown action.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ChartError::InvalidField {
                field: "definition",
                reason: "expected an object".to_string(),
            });
        }

        let raw = RawDefinition::deserialize(value).map_err(|e| ChartError::InvalidField {
            field: "definition",
            reason: e.to_string(),
        })?;

        let chart_name = raw.chart_name.ok_or(ChartError::MissingField("chartName"))?;
        let action: Action = raw
            .action
            .ok_or(ChartError::MissingField("action"))?
            .parse()?;

        let percentage_roles = match (raw.numerator_path, raw.denominator_paths) {
            (None, None) => None,
            (Some(numerator), Some(denominators)) if !denominators.is_empty() => {
                Some(PercentageRoles {
                    numerator,
                    denominators,
                })
            }
            (Some(_), _) => return Err(ChartError::MissingField("denominatorPaths")),
            (None, Some(_)) => return Err(ChartError::MissingField("numeratorPath")),
        };

        let aggregation_paths = match (raw.aggregation_paths, &percentage_roles) {
            (Some(paths), _) => paths,
            (None, Some(roles)) => roles.ordered_paths(),
            (None, None) => return Err(ChartError::MissingField("aggregationPaths")),
        };
        if aggregation_paths.is_empty() {
            return Err(ChartError::InvalidField {
                field: "aggregationPaths",
                reason: "must name at least one path".to_string(),
            });
        }

        Ok(Self {
            chart_name,
            action,
            aggregation_paths,
            value_symbol: raw.value_symbol.unwrap_or_default(),
            post_aggregation_strategy_key: raw
                .post_aggregation_strategy_key
                .filter(|k| !k.trim().is_empty()),
            percentage_roles,
            chart_type: raw
                .chart_type
                .unwrap_or_else(|| DEFAULT_CHART_TYPE.to_string()),
            drill_chart: raw.drill_chart,
            strategy_params: raw.strategy_params,
        })
    }

    /// Paths to resolve, in reduction slot order.
    ///
    /// Percentage charts with explicit roles put the numerator first, then
    /// the denominators; everything else uses the declared order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        match (&self.action, &self.percentage_roles) {
            (Action::Percentage, Some(roles)) => roles.ordered_paths(),
            _ => self.aggregation_paths.clone(),
        }
    }
}

impl PercentageRoles {
    fn ordered_paths(&self) -> Vec<String> {
        std::iter::once(self.numerator.clone())
            .chain(self.denominators.iter().cloned())
            .collect()
    }
}
