// src/strategy/trend.rs
use super::{required_number, Strategy};
use crate::error::Result;
use crate::reduce::round_to;
use crate::types::{ChartRequest, DataPoint};

pub const PREVIOUS_VALUE_PARAM: &str = "previousValue";

/// Percent change of each value against the previous period's value.
pub struct RatioToPreviousPeriod;

impl RatioToPreviousPeriod {
    pub const KEY: &'static str = "ratioToPreviousPeriod";
}

impl Strategy for RatioToPreviousPeriod {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn description(&self) -> &'static str {
        "Appends the percent change against the `previousValue` parameter"
    }

    fn compute(&self, request: &ChartRequest, points: Vec<DataPoint>) -> Result<Vec<DataPoint>> {
        let previous = required_number(request, Self::KEY, PREVIOUS_VALUE_PARAM)?;

        let changes: Vec<DataPoint> = points
            .iter()
            .map(|p| {
                let change = if previous == 0.0 {
                    0.0
                } else {
                    round_to((p.value - previous) / previous * 100.0, 2)
                };
                DataPoint::new(format!("{} Change", p.name), change, "%")
            })
            .collect();

        let mut out = points;
        out.extend(changes);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_change() {
        let request = ChartRequest::new("x").with_param(PREVIOUS_VALUE_PARAM, 80);
        let out = RatioToPreviousPeriod
            .compute(&request, vec![DataPoint::new("Applications", 100.0, "count")])
            .unwrap();
        assert_eq!(out[1], DataPoint::new("Applications Change", 25.0, "%"));
    }

    #[test]
    fn test_zero_previous_is_zero_change() {
        let request = ChartRequest::new("x").with_param(PREVIOUS_VALUE_PARAM, "0");
        let out = RatioToPreviousPeriod
            .compute(&request, vec![DataPoint::new("Applications", 10.0, "count")])
            .unwrap();
        assert_eq!(out[1].value, 0.0);
    }
}
