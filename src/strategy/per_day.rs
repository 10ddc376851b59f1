// src/strategy/per_day.rs
use super::Strategy;
use crate::error::{ChartError, Result};
use crate::reduce::round_to;
use crate::types::{ChartRequest, DataPoint};

/// Spreads each value over the days of the request window.
pub struct PerDay;

impl PerDay {
    pub const KEY: &'static str = "perDay";
}

impl Strategy for PerDay {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn description(&self) -> &'static str {
        "Divides every value by the number of days in the request date range"
    }

    #[allow(clippy::cast_precision_loss)]
    fn compute(&self, request: &ChartRequest, points: Vec<DataPoint>) -> Result<Vec<DataPoint>> {
        let range = request
            .request_date
            .ok_or_else(|| ChartError::strategy(Self::KEY, "request has no date range"))?;
        let days = range
            .days()
            .ok_or_else(|| ChartError::strategy(Self::KEY, "request date range is out of bounds"))?
            as f64;

        Ok(points
            .into_iter()
            .map(|mut p| {
                p.value = round_to(p.value / days, 2);
                p
            })
            .collect())
    }
}
