// src/strategy/target.rs
use super::{required_number, Strategy};
use crate::error::Result;
use crate::reduce::round_to;
use crate::types::{ChartRequest, DataPoint};

pub const TARGET_PARAM: &str = "target";

/// Compares each value against a target supplied with the request.
///
/// Appends, per input point, the absolute difference from the target and the
/// achieved share of the target in percent. A zero target yields `0`.
pub struct DeltaFromTarget;

impl DeltaFromTarget {
    pub const KEY: &'static str = "deltaFromTarget";
}

impl Strategy for DeltaFromTarget {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn description(&self) -> &'static str {
        "Appends the difference from and achievement of the `target` parameter"
    }

    fn compute(&self, request: &ChartRequest, points: Vec<DataPoint>) -> Result<Vec<DataPoint>> {
        let target = required_number(request, Self::KEY, TARGET_PARAM)?;

        let derived: Vec<DataPoint> = points
            .iter()
            .flat_map(|p| {
                let achievement = if target == 0.0 {
                    0.0
                } else {
                    round_to(p.value / target * 100.0, 2)
                };
                [
                    DataPoint::new(format!("{} vs Target", p.name), p.value - target, &p.symbol),
                    DataPoint::new(format!("{} Achievement", p.name), achievement, "%"),
                ]
            })
            .collect();

        let mut out = points;
        out.extend(derived);
        Ok(out)
    }
}
