// src/strategy/rank.rs
use super::Strategy;
use crate::error::{ChartError, Result};
use crate::types::{ChartRequest, DataPoint};

pub const TOP_N_PARAM: &str = "topN";
pub const DEFAULT_TOP_N: usize = 3;

/// Orders points by value, highest first, and keeps the top `topN`.
pub struct TopNRank;

impl TopNRank {
    pub const KEY: &'static str = "topNRank";

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn limit(request: &ChartRequest) -> Result<usize> {
        if !request.parameters.contains_key(TOP_N_PARAM) {
            return Ok(DEFAULT_TOP_N);
        }
        match request.number_param(TOP_N_PARAM) {
            Some(n) if n >= 1.0 && n.fract() == 0.0 => Ok(n as usize),
            _ => Err(ChartError::strategy(
                Self::KEY,
                format!("'{TOP_N_PARAM}' must be a positive whole number"),
            )),
        }
    }
}

impl Strategy for TopNRank {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn description(&self) -> &'static str {
        "Sorts points by value descending and keeps the first `topN` (default 3)"
    }

    fn compute(&self, request: &ChartRequest, mut points: Vec<DataPoint>) -> Result<Vec<DataPoint>> {
        let limit = Self::limit(request)?;
        points.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
        points.truncate(limit);
        Ok(points)
    }
}
