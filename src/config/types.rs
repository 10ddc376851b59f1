use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Decimal places kept on percentage results.
    #[serde(default = "default_precision")]
    pub percentage_precision: u32,
    /// Fan value extraction out across worker threads.
    #[serde(default = "default_true")]
    pub parallel_extraction: bool,
    /// Keep percentages of non-negative inputs within `[0, 100]`.
    #[serde(default = "default_true")]
    pub clamp_percentage: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            percentage_precision: default_precision(),
            parallel_extraction: true,
            clamp_percentage: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Chart definition file, or directory of `*.json` / `*.toml` files.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self { path: default_catalog_path() }
    }
}

const fn default_true() -> bool { true }
const fn default_precision() -> u32 { 2 }
fn default_catalog_path() -> PathBuf { PathBuf::from("charts") }

/// On-disk shape of `chartsmith.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChartsmithToml {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub engine: EngineSettings,
    pub catalog: CatalogSettings,
}
