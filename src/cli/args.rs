use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "chartsmith",
    version,
    about = "Metric chart computation over search aggregation results"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Settings file (defaults to ./chartsmith.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build charts from an aggregation document
    Build {
        /// Visualization codes to build
        #[arg(required = true, value_name = "CODE")]
        codes: Vec<String>,
        /// Aggregation document (JSON), or `-` for stdin
        #[arg(long, value_name = "FILE")]
        doc: PathBuf,
        /// Chart catalog file or directory (overrides settings)
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
        /// JSON object of request parameters handed to strategies
        #[arg(long, value_name = "FILE")]
        params: Option<PathBuf>,
        /// Request window start, epoch milliseconds
        #[arg(long, requires = "end")]
        start: Option<i64>,
        /// Request window end, epoch milliseconds
        #[arg(long, requires = "start")]
        end: Option<i64>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate every chart definition in a catalog
    Check {
        /// Chart catalog file or directory (overrides settings)
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },
    /// List registered post-aggregation strategies
    Strategies,
}

/// Arguments for the build command (used by handlers)
#[derive(Debug, Clone)]
pub struct BuildArgs {
    pub codes: Vec<String>,
    pub doc: PathBuf,
    pub catalog: Option<PathBuf>,
    pub params: Option<PathBuf>,
    pub window: Option<(i64, i64)>,
    pub json: bool,
}
