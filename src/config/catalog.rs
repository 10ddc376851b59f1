// src/config/catalog.rs
//! File-backed chart definition store.
//!
//! A catalog file is a JSON or TOML object keyed by visualization code, each
//! value a chart definition. A catalog may also be a directory of such files;
//! files are read in file-name order and a later definition replaces an
//! earlier one with the same code.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::chart::ChartDefinition;
use crate::error::{ChartError, Result};

/// Read access to chart definitions keyed by visualization code.
pub trait ChartSource: Send + Sync {
    /// The raw definition for `code`, if one exists.
    fn definition(&self, code: &str) -> Option<&Value>;

    /// Every known visualization code, in catalog order.
    fn codes(&self) -> Vec<&str>;
}

/// In-memory catalog of raw chart definitions.
#[derive(Debug, Clone, Default)]
pub struct ChartCatalog {
    charts: Map<String, Value>,
}

impl ChartSource for ChartCatalog {
    fn definition(&self, code: &str) -> Option<&Value> {
        self.charts.get(code)
    }

    fn codes(&self) -> Vec<&str> {
        self.charts.keys().map(String::as_str).collect()
    }
}

impl ChartCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from an object keyed by visualization code.
    ///
    /// # Errors
    /// Returns [`ChartError::Parse`] if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(charts) => Ok(Self { charts }),
            other => Err(ChartError::Parse {
                path: PathBuf::from("<inline>"),
                reason: format!("catalog must be an object keyed by visualization code, got {other}"),
            }),
        }
    }

    /// Adds or replaces one definition, returning the previous one.
    pub fn insert(&mut self, code: impl Into<String>, definition: Value) -> Option<Value> {
        self.charts.insert(code.into(), definition)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Loads a catalog from a file or a directory of files.
    ///
    /// Inside a directory, a file that cannot be read or parsed is logged and
    /// skipped; the charts of every other file still load.
    ///
    /// # Errors
    /// Returns error if the path is missing, if a single catalog file cannot
    /// be read or parsed, or if the directory walk fails.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ChartError::Io {
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "catalog not found"),
                path: path.to_path_buf(),
            });
        }

        let mut catalog = Self::new();
        if path.is_dir() {
            for file in catalog_files(path)? {
                if let Err(e) = catalog.merge_file(&file) {
                    tracing::warn!("skipping catalog file: {e}");
                }
            }
        } else {
            catalog.merge_file(path)?;
        }

        tracing::debug!(charts = catalog.len(), "loaded catalog from {}", path.display());
        Ok(catalog)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        for (code, definition) in read_catalog_file(path)? {
            if self.charts.contains_key(&code) {
                tracing::warn!("chart '{code}' redefined by {}", path.display());
            }
            self.charts.insert(code, definition);
        }
        Ok(())
    }

    /// Validates every definition, in catalog order.
    #[must_use]
    pub fn validate(&self) -> Vec<(&str, Result<ChartDefinition>)> {
        self.charts
            .iter()
            .map(|(code, raw)| (code.as_str(), ChartDefinition::from_value(raw)))
            .collect()
    }
}

fn catalog_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && CatalogFormat::from_path(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

fn read_catalog_file(path: &Path) -> Result<Map<String, Value>> {
    let parse_error = |reason: String| ChartError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let format = CatalogFormat::from_path(path)
        .ok_or_else(|| parse_error("expected a .json or .toml file".to_string()))?;
    let content = fs::read_to_string(path).map_err(|source| ChartError::Io {
        source,
        path: path.to_path_buf(),
    })?;

    let value: Value = match format {
        CatalogFormat::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        CatalogFormat::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
    };

    match value {
        Value::Object(charts) => Ok(charts),
        _ => Err(parse_error(
            "catalog must be an object keyed by visualization code".to_string(),
        )),
    }
}
