//! Chart assembly.
//!
//! Builds one [`AggregateResult`] per requested chart: resolve the declared
//! paths, extract and reduce their values, emit the base data point, then run
//! the optional post-aggregation strategy. Every failure is absorbed at the
//! chart boundary and reported on the [`ChartOutcome`], so one bad chart never
//! fails the charts built alongside it.

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use serde_json::Value;

use crate::config::{ChartDefinition, ChartSource, EngineSettings};
use crate::error::{ChartError, Result};
use crate::reduce::Reducer;
use crate::strategy::StrategyRegistry;
use crate::tree::{self, Extraction};
use crate::types::{
    AggregateResult, BatchReport, ChartOutcome, ChartRequest, ChartStatus, DataPoint, Stage,
};

/// Values gathered for one declared path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathValues {
    pub path: String,
    /// One value per matched node, in document order.
    pub values: Vec<f64>,
    pub malformed: usize,
}

/// The chart assembly engine.
pub struct ChartEngine<S> {
    source: S,
    registry: StrategyRegistry,
    reducer: Reducer,
    parallel: bool,
}

impl<S: ChartSource> ChartEngine<S> {
    #[must_use]
    pub fn new(source: S, settings: &EngineSettings) -> Self {
        Self {
            source,
            registry: StrategyRegistry::with_builtins(),
            reducer: Reducer::new(settings.percentage_precision, settings.clamp_percentage),
            parallel: settings.parallel_extraction,
        }
    }

    /// Replaces the strategy registry.
    #[must_use]
    pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut StrategyRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Builds the chart registered under the request's visualization code.
    #[must_use]
    pub fn build_chart(&self, document: &Value, request: &ChartRequest) -> ChartOutcome {
        let code = &request.visualization_code;
        match self.source.definition(code) {
            Some(raw) => self.build_with_definition(document, request, raw),
            None => config_failure(request, "", &ChartError::UnknownChart(code.clone())),
        }
    }

    /// Builds a chart from a raw definition that has not been validated yet.
    #[must_use]
    pub fn build_with_definition(
        &self,
        document: &Value,
        request: &ChartRequest,
        raw: &Value,
    ) -> ChartOutcome {
        match ChartDefinition::from_value(raw) {
            Ok(definition) => self.assemble(document, request, &definition),
            Err(e) => {
                let name = raw.get("chartName").and_then(Value::as_str).unwrap_or("");
                config_failure(request, name, &e)
            }
        }
    }

    /// Builds every requested chart. Charts are independent and built in
    /// parallel; outcomes come back in request order.
    #[must_use]
    pub fn build_charts(&self, document: &Value, requests: &[ChartRequest]) -> BatchReport {
        let start = std::time::Instant::now();

        let charts: Vec<ChartOutcome> = requests
            .par_iter()
            .map(|request| self.build_chart(document, request))
            .collect();

        BatchReport {
            charts,
            duration_ms: start.elapsed().as_millis(),
        }
    }

    /// Runs the build stages for a validated definition.
    #[must_use]
    pub fn assemble(
        &self,
        document: &Value,
        request: &ChartRequest,
        definition: &ChartDefinition,
    ) -> ChartOutcome {
        let code = request.visualization_code.as_str();
        let _span = tracing::debug_span!("chart", code).entered();

        let mut result = AggregateResult {
            visualization_code: code.to_string(),
            chart_name: definition.chart_name.clone(),
            chart_type: definition.chart_type.clone(),
            drill_chart: definition.drill_chart.clone(),
            data_points: Vec::new(),
        };

        let gathered = self.gather(document, &definition.paths());

        let malformed: usize = gathered.iter().map(|p| p.malformed).sum();
        if malformed > 0 {
            tracing::warn!(
                malformed,
                "chart '{}' read non-numeric values as 0",
                definition.chart_name
            );
        }

        tracing::debug!(stage = %Stage::Reducing, action = %definition.action);
        let slots: Vec<Vec<f64>> = gathered.into_iter().map(|p| p.values).collect();
        let value = self.reducer.reduce(&slots, definition.action);
        if !value.is_finite() {
            let reason = format!("{} result is not a finite number", definition.action);
            tracing::warn!("chart '{}' not built: {reason}", definition.chart_name);
            return ChartOutcome {
                result,
                status: ChartStatus::Degraded {
                    stage: Stage::Reducing,
                    reason,
                },
                malformed_values: malformed,
            };
        }
        result.data_points.push(DataPoint::new(
            &definition.chart_name,
            value,
            &definition.value_symbol,
        ));

        let status = match &definition.post_aggregation_strategy_key {
            None => ChartStatus::Complete,
            Some(key) => {
                tracing::debug!(stage = %Stage::StrategyApplying, strategy = %key);
                match self.apply_strategy(key, request, definition, &result.data_points) {
                    Ok(points) => {
                        result.data_points = points;
                        ChartStatus::Complete
                    }
                    Err(e) => {
                        tracing::warn!("chart '{}' kept base result: {e}", definition.chart_name);
                        ChartStatus::Degraded {
                            stage: Stage::StrategyApplying,
                            reason: e.to_string(),
                        }
                    }
                }
            }
        };

        tracing::debug!(stage = %Stage::Done, points = result.data_points.len());
        ChartOutcome {
            result,
            status,
            malformed_values: malformed,
        }
    }

    /// Resolves and extracts every path into its own slot, in path order.
    #[must_use]
    pub fn gather(&self, document: &Value, paths: &[String]) -> Vec<PathValues> {
        if self.parallel {
            paths
                .par_iter()
                .map(|path| self.gather_path(document, path))
                .collect()
        } else {
            paths
                .iter()
                .map(|path| self.gather_path(document, path))
                .collect()
        }
    }

    fn gather_path(&self, document: &Value, path: &str) -> PathValues {
        tracing::debug!(stage = %Stage::Resolving, path);
        let nodes = tree::resolve(document, path);
        if nodes.is_empty() {
            tracing::debug!("path '{path}' matched nothing");
        }

        tracing::debug!(stage = %Stage::Extracting, path, nodes = nodes.len());
        let extractions: Vec<Extraction> = if self.parallel {
            nodes.par_iter().map(|node| tree::extract_value(node)).collect()
        } else {
            nodes.iter().map(|node| tree::extract_value(node)).collect()
        };

        PathValues {
            path: path.to_string(),
            values: extractions.iter().map(|e| e.value).collect(),
            malformed: extractions.iter().map(|e| e.malformed).sum(),
        }
    }

    fn apply_strategy(
        &self,
        key: &str,
        request: &ChartRequest,
        definition: &ChartDefinition,
        base: &[DataPoint],
    ) -> Result<Vec<DataPoint>> {
        let strategy = self.registry.get(key)?;

        let mut effective = request.clone();
        for (param, value) in &definition.strategy_params {
            effective
                .parameters
                .entry(param.clone())
                .or_insert_with(|| value.clone());
        }

        let points = panic::catch_unwind(AssertUnwindSafe(|| {
            strategy.compute(&effective, base.to_vec())
        }))
        .map_err(|_| ChartError::strategy(key, "strategy panicked"))??;

        match points.iter().find(|p| !p.value.is_finite()) {
            Some(p) => Err(ChartError::strategy(
                key,
                format!("'{}' is not a finite number", p.name),
            )),
            None => Ok(points),
        }
    }
}

fn config_failure(request: &ChartRequest, chart_name: &str, error: &ChartError) -> ChartOutcome {
    tracing::warn!("chart '{}' not built: {error}", request.visualization_code);
    ChartOutcome {
        result: AggregateResult::empty(&request.visualization_code, chart_name),
        status: ChartStatus::Degraded {
            stage: Stage::Resolving,
            reason: error.to_string(),
        },
        malformed_values: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartCatalog;
    use serde_json::json;

    fn engine(parallel: bool) -> ChartEngine<ChartCatalog> {
        let settings = EngineSettings {
            parallel_extraction: parallel,
            ..EngineSettings::default()
        };
        ChartEngine::new(ChartCatalog::new(), &settings)
    }

    #[test]
    fn test_gather_slots_follow_path_order() {
        let doc = json!({"b": {"value": 2}, "a": [{"doc_count": 1}, {"doc_count": 3}]});
        let paths = vec!["a".to_string(), "missing".to_string(), "b".to_string()];
        for parallel in [true, false] {
            let gathered = engine(parallel).gather(&doc, &paths);
            let values: Vec<_> = gathered.iter().map(|p| p.values.clone()).collect();
            assert_eq!(values, vec![vec![1.0, 3.0], vec![], vec![2.0]]);
        }
    }

    #[test]
    fn test_overflowing_sum_degrades_at_reducing() {
        let raw = json!({"chartName": "T", "action": "SUM", "aggregationPaths": ["a"]});
        let doc = json!({"a": [{"value": 1.5e308}, {"value": 1.5e308}]});
        let outcome = engine(true).build_with_definition(&doc, &ChartRequest::new("t"), &raw);
        assert!(matches!(
            outcome.status,
            ChartStatus::Degraded { stage: Stage::Reducing, .. }
        ));
        assert!(outcome.result.data_points.is_empty());
        assert_eq!(outcome.result.chart_name, "T");
    }

    #[test]
    fn test_non_finite_strategy_output_keeps_base() {
        let raw = json!({
            "chartName": "Revenue",
            "action": "SUM",
            "aggregationPaths": ["amount"],
            "postAggregationStrategyKey": "deltaFromTarget",
            "strategyParams": {"target": -1.5e308}
        });
        let doc = json!({"amount": {"value": 1.5e308}});
        let outcome = engine(false).build_with_definition(&doc, &ChartRequest::new("rev"), &raw);
        assert!(matches!(
            outcome.status,
            ChartStatus::Degraded { stage: Stage::StrategyApplying, .. }
        ));
        assert_eq!(outcome.result.data_points, vec![DataPoint::new("Revenue", 1.5e308, "")]);
    }

    #[test]
    fn test_unknown_chart_is_degraded() {
        let outcome = engine(true).build_chart(&json!({}), &ChartRequest::new("nope"));
        assert!(outcome.is_degraded());
        assert!(outcome.result.data_points.is_empty());
        assert_eq!(outcome.result.visualization_code, "nope");
    }

    #[test]
    fn test_strategy_params_fill_missing_request_params() {
        let raw = json!({
            "chartName": "Revenue",
            "action": "SUM",
            "aggregationPaths": ["amount"],
            "postAggregationStrategyKey": "deltaFromTarget",
            "strategyParams": {"target": 100}
        });
        let doc = json!({"amount": {"value": 80}});
        let e = engine(false);

        let outcome = e.build_with_definition(&doc, &ChartRequest::new("rev"), &raw);
        assert!(outcome.is_complete());
        assert_eq!(outcome.result.data_points[1].value, -20.0);

        let overridden = ChartRequest::new("rev").with_param("target", 40);
        let outcome = e.build_with_definition(&doc, &overridden, &raw);
        assert_eq!(outcome.result.data_points[1].value, 40.0);
    }
}
