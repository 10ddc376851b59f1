//! Command dispatch logic extracted from binary to reduce main function size.

use super::args::{BuildArgs, Commands};
use super::handlers::{handle_build, handle_check, handle_strategies};
use crate::config::Config;
use crate::exit::ChartsmithExit;
use anyhow::{Context, Result};
use std::path::Path;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if settings cannot be loaded or the command handler fails.
pub fn execute(command: Commands, config_path: Option<&Path>) -> Result<ChartsmithExit> {
    let config = match config_path {
        Some(path) => Config::load_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Config::load(),
    };

    match command {
        Commands::Build {
            codes,
            doc,
            catalog,
            params,
            start,
            end,
            json,
        } => {
            let window = start.zip(end);
            handle_build(
                &config,
                BuildArgs {
                    codes,
                    doc,
                    catalog,
                    params,
                    window,
                    json,
                },
            )
        }
        Commands::Check { catalog } => handle_check(&config, catalog.as_deref()),
        Commands::Strategies => Ok(handle_strategies()),
    }
}
