//! Configuration-driven metric aggregation over search backend result trees.
//!
//! A chart definition names the aggregation paths to read, how to combine
//! their values (`SUM` or `PERCENTAGE`) and an optional post-aggregation
//! strategy. [`engine::ChartEngine`] turns a raw aggregation document plus a
//! definition into an [`types::AggregateResult`] ready for rendering.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod exit;
pub mod logging;
pub mod reduce;
pub mod reporting;
pub mod strategy;
pub mod tree;
pub mod types;

pub use engine::ChartEngine;
pub use error::{ChartError, Result};
