// src/error.rs
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No chart definition for visualization code '{0}'")]
    UnknownChart(String),

    #[error("Chart definition is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Chart definition field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Unknown action '{0}' (expected SUM or PERCENTAGE)")]
    UnknownAction(String),

    #[error("Unknown post-aggregation strategy '{0}'")]
    UnknownStrategy(String),

    #[error("Strategy '{key}' failed: {reason}")]
    Strategy { key: String, reason: String },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

impl ChartError {
    /// True for errors caused by a chart's own configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownChart(_)
                | Self::MissingField(_)
                | Self::InvalidField { .. }
                | Self::UnknownAction(_)
                | Self::UnknownStrategy(_)
        )
    }

    pub(crate) fn strategy(key: &str, reason: impl Into<String>) -> Self {
        Self::Strategy {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

// Allow `?` on std::io::Error by converting to ChartError::Io with unknown path.
impl From<std::io::Error> for ChartError {
    fn from(source: std::io::Error) -> Self {
        ChartError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for ChartError {
    fn from(e: walkdir::Error) -> Self {
        let path = e
            .path()
            .map_or_else(|| PathBuf::from("<unknown>"), Path::to_path_buf);
        match e.into_io_error() {
            Some(source) => ChartError::Io { source, path },
            None => ChartError::Parse {
                path,
                reason: "filesystem loop detected".to_string(),
            },
        }
    }
}
