// src/config/mod.rs
pub mod catalog;
pub mod chart;
pub mod types;

pub use self::catalog::{ChartCatalog, ChartSource};
pub use self::chart::{ChartDefinition, PercentageRoles};
pub use self::types::{CatalogSettings, ChartsmithToml, Config, EngineSettings};

use crate::error::{ChartError, Result};
use std::fs;
use std::path::Path;

/// Default settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "chartsmith.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config from `chartsmith.toml` in the working directory.
    ///
    /// A missing file means defaults. An unreadable or invalid file is
    /// reported and defaults are used.
    #[must_use]
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::new();
        }
        Self::load_file(path).unwrap_or_else(|e| {
            tracing::warn!("ignoring {}: {e}", path.display());
            Self::new()
        })
    }

    /// Loads settings from an explicit file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not valid settings TOML.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ChartError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        Self::parse_toml(&content).map_err(|e| match e {
            ChartError::Parse { reason, .. } => ChartError::Parse {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Parses settings TOML.
    ///
    /// # Errors
    /// Returns [`ChartError::Parse`] if the content is not valid settings TOML.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let parsed: ChartsmithToml = toml::from_str(content).map_err(|e| ChartError::Parse {
            path: CONFIG_FILE.into(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            engine: parsed.engine,
            catalog: parsed.catalog,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Config::new();
        assert_eq!(c.engine.percentage_precision, 2);
        assert!(c.engine.parallel_extraction);
        assert!(c.engine.clamp_percentage);
        assert_eq!(c.catalog.path, Path::new("charts"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let c = Config::parse_toml("[engine]\npercentage_precision = 4").unwrap();
        assert_eq!(c.engine.percentage_precision, 4);
        assert!(c.engine.parallel_extraction);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::parse_toml("[engine]\nparallel_extraction = \"maybe\"").unwrap_err();
        assert!(matches!(err, ChartError::Parse { .. }));
    }
}
