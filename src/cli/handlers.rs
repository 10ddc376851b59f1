// src/cli/handlers.rs
use crate::cli::args::BuildArgs;
use crate::config::{ChartCatalog, ChartSource, Config};
use crate::engine::ChartEngine;
use crate::error::ChartError;
use crate::exit::ChartsmithExit;
use crate::reporting;
use crate::strategy::StrategyRegistry;
use crate::types::ChartRequest;
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

fn load_catalog(config: &Config, override_path: Option<&Path>) -> Result<ChartCatalog> {
    let path = override_path.unwrap_or(config.catalog.path.as_path());
    ChartCatalog::load(path).with_context(|| format!("Failed to load catalog {}", path.display()))
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read document from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn invalid_input(message: &str) -> ChartsmithExit {
    eprintln!("{} {message}", "Invalid input:".red());
    ChartsmithExit::InvalidInput
}

/// Handles the build command.
///
/// # Errors
/// Returns error if the catalog or an input file cannot be read.
pub fn handle_build(config: &Config, args: BuildArgs) -> Result<ChartsmithExit> {
    let catalog = load_catalog(config, args.catalog.as_deref())?;

    let document: Value = match serde_json::from_str(&read_input(&args.doc)?) {
        Ok(doc) => doc,
        Err(e) => return Ok(invalid_input(&format!("document is not JSON: {e}"))),
    };

    let parameters: BTreeMap<String, Value> = match &args.params {
        None => BTreeMap::new(),
        Some(path) => match serde_json::from_str(&read_input(path)?) {
            Ok(params) => params,
            Err(e) => return Ok(invalid_input(&format!("parameters must be a JSON object: {e}"))),
        },
    };

    let requests: Vec<ChartRequest> = args
        .codes
        .iter()
        .map(|code| {
            let mut request = ChartRequest::new(code.as_str());
            request.parameters.clone_from(&parameters);
            if let Some((start, end)) = args.window {
                request = request.with_date_range(start, end);
            }
            request
        })
        .collect();

    let engine = ChartEngine::new(catalog, &config.engine);
    let report = engine.build_charts(&document, &requests);

    if args.json {
        reporting::print_json(&report.results())?;
    } else {
        reporting::print_report(&report);
    }

    if report.has_degraded() {
        Ok(ChartsmithExit::Degraded)
    } else {
        Ok(ChartsmithExit::Success)
    }
}

/// Handles the check command.
///
/// # Errors
/// Returns error if the catalog cannot be loaded.
pub fn handle_check(config: &Config, catalog_path: Option<&Path>) -> Result<ChartsmithExit> {
    let catalog = load_catalog(config, catalog_path)?;
    let registry = StrategyRegistry::with_builtins();

    let results: Vec<_> = catalog
        .validate()
        .into_iter()
        .map(|(code, result)| {
            let checked = result.and_then(|def| {
                if let Some(key) = def
                    .post_aggregation_strategy_key
                    .as_ref()
                    .filter(|k| !registry.contains(k))
                {
                    return Err(ChartError::UnknownStrategy(key.clone()));
                }
                Ok(def)
            });
            (code, checked)
        })
        .collect();

    print!("{}", reporting::format_validation(&results));

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    if failed == 0 {
        println!(
            "{} {} chart definitions valid.",
            "OK".green().bold(),
            catalog.codes().len()
        );
        Ok(ChartsmithExit::Success)
    } else {
        println!("{} {failed} of {} chart definitions invalid.", "X".red().bold(), results.len());
        Ok(ChartsmithExit::Degraded)
    }
}

/// Handles the strategies command.
#[must_use]
pub fn handle_strategies() -> ChartsmithExit {
    let registry = StrategyRegistry::with_builtins();
    for strategy in registry.list() {
        println!("{:<24} {}", strategy.key().bold(), strategy.description());
    }
    ChartsmithExit::Success
}
