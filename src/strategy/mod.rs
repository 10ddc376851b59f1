// src/strategy/mod.rs
//! Post-aggregation strategies.
//!
//! A chart definition may name a strategy key. After the base data point is
//! computed, the strategy registered under that key receives the request and
//! the data points and returns the final list. Strategies are stateless and
//! independent; new ones are added with [`StrategyRegistry::register`].

pub mod per_day;
pub mod rank;
pub mod target;
pub mod trend;

use std::collections::HashMap;

use crate::error::{ChartError, Result};
use crate::types::{ChartRequest, DataPoint};

pub use per_day::PerDay;
pub use rank::TopNRank;
pub use target::DeltaFromTarget;
pub use trend::RatioToPreviousPeriod;

/// A post-aggregation computation selected by key.
pub trait Strategy: Send + Sync {
    /// Registry key this strategy answers to.
    fn key(&self) -> &'static str;

    /// One-line description for listings.
    fn description(&self) -> &'static str;

    /// Transforms the computed data points.
    ///
    /// # Errors
    /// Returns [`ChartError::Strategy`] when the request lacks what the
    /// strategy needs. The caller keeps its own copy of the input points.
    fn compute(&self, request: &ChartRequest, points: Vec<DataPoint>) -> Result<Vec<DataPoint>>;
}

/// Keyed lookup table of strategies.
pub struct StrategyRegistry {
    strategies: HashMap<String, Box<dyn Strategy>>,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl StrategyRegistry {
    /// A registry with nothing registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// A registry holding every built-in strategy.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(PerDay));
        registry.register(Box::new(DeltaFromTarget));
        registry.register(Box::new(RatioToPreviousPeriod));
        registry.register(Box::new(TopNRank));
        registry
    }

    /// Registers a strategy under its key, returning any strategy it replaced.
    pub fn register(&mut self, strategy: Box<dyn Strategy>) -> Option<Box<dyn Strategy>> {
        self.strategies.insert(strategy.key().to_string(), strategy)
    }

    /// Looks up a strategy.
    ///
    /// # Errors
    /// Returns [`ChartError::UnknownStrategy`] if nothing is registered under `key`.
    pub fn get(&self, key: &str) -> Result<&dyn Strategy> {
        self.strategies
            .get(key)
            .map(Box::as_ref)
            .ok_or_else(|| ChartError::UnknownStrategy(key.to_string()))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.strategies.contains_key(key)
    }

    /// Registered strategies sorted by key.
    #[must_use]
    pub fn list(&self) -> Vec<&dyn Strategy> {
        let mut all: Vec<&dyn Strategy> = self.strategies.values().map(Box::as_ref).collect();
        all.sort_by_key(|s| s.key());
        all
    }
}

/// Reads a required numeric request parameter for a strategy.
pub(crate) fn required_number(request: &ChartRequest, strategy: &str, param: &str) -> Result<f64> {
    match request.parameters.get(param) {
        None => Err(ChartError::strategy(
            strategy,
            format!("missing request parameter '{param}'"),
        )),
        Some(raw) => request.number_param(param).ok_or_else(|| {
            ChartError::strategy(strategy, format!("parameter '{param}' is not a number: {raw}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = StrategyRegistry::with_builtins();
        let keys: Vec<_> = registry.list().iter().map(|s| s.key()).collect();
        assert_eq!(
            keys,
            vec!["deltaFromTarget", "perDay", "ratioToPreviousPeriod", "topNRank"]
        );
    }

    #[test]
    fn test_unknown_key_is_error() {
        let registry = StrategyRegistry::with_builtins();
        assert!(matches!(
            registry.get("noSuchTheory"),
            Err(ChartError::UnknownStrategy(k)) if k == "noSuchTheory"
        ));
    }

    #[test]
    fn test_required_number() {
        let request = ChartRequest::new("x")
            .with_param("target", "120")
            .with_param("bad", "lots");
        assert_eq!(required_number(&request, "s", "target").unwrap(), 120.0);
        assert!(required_number(&request, "s", "bad").is_err());
        assert!(required_number(&request, "s", "missing").is_err());
    }
}
