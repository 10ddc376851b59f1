// src/reduce.rs
//! Combination of extracted values into a single chart value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// Upper bound on configured rounding precision.
pub const MAX_PRECISION: u32 = 10;

/// How a chart combines the values found at its paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Plain addition of every extracted value.
    Sum,
    /// Numerator share of a denominator total, times 100.
    Percentage,
}

impl FromStr for Action {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUM" => Ok(Self::Sum),
            "PERCENTAGE" => Ok(Self::Percentage),
            _ => Err(ChartError::UnknownAction(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sum => "SUM",
            Self::Percentage => "PERCENTAGE",
        })
    }
}

/// Reduces per-path value slots according to an [`Action`].
///
/// Slots are indexed by declared path. For [`Action::Percentage`] slot 0
/// holds the numerator values and every later slot feeds the denominator.
#[derive(Debug, Clone, Copy)]
pub struct Reducer {
    precision: u32,
    clamp_percentage: bool,
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new(2, true)
    }
}

impl Reducer {
    #[must_use]
    pub fn new(precision: u32, clamp_percentage: bool) -> Self {
        Self {
            precision: precision.min(MAX_PRECISION),
            clamp_percentage,
        }
    }

    #[must_use]
    pub fn reduce(&self, slots: &[Vec<f64>], action: Action) -> f64 {
        match action {
            Action::Sum => stable_sum(slots.iter().flatten().copied()),
            Action::Percentage => self.percentage(slots),
        }
    }

    fn percentage(&self, slots: &[Vec<f64>]) -> f64 {
        let Some((numerator, denominator)) = slots.split_first() else {
            return 0.0;
        };

        let part = stable_sum(numerator.iter().copied());
        let total = stable_sum(denominator.iter().flatten().copied());
        if total == 0.0 {
            return 0.0;
        }

        let mut ratio = part / total * 100.0;
        let non_negative = slots.iter().flatten().all(|v| *v >= 0.0);
        if self.clamp_percentage && non_negative {
            ratio = ratio.clamp(0.0, 100.0);
        }
        round_to(ratio, self.precision)
    }
}

/// Sums values in a fixed (sorted) order so the result does not depend on
/// the order values were gathered in.
#[must_use]
pub fn stable_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut values: Vec<f64> = values.into_iter().collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

/// Rounds half away from zero to `precision` decimal places.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * factor).round() / factor
}
