//! Centralized error types for graphbench.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::GraphName;

/// Main error type for configuration and template operations.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Label '{key}' is required for graph '{graph}'")]
    MissingLabel { key: String, graph: GraphName },

    #[error("Parameter '{0}' is required")]
    MissingParameter(String),

    #[error("Invalid identifier '{0}': only letters, digits and underscores are allowed")]
    InvalidIdentifier(String),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("wrong edit mode: {0}")]
    InvalidEditMode(String),

    #[error("wrong edit target: {0}")]
    InvalidEditTarget(String),

    #[error("unknown query: {0}")]
    UnknownQuery(String),

    #[error("Malformed dataset file {path}: {reason}")]
    MalformedDataset { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for graphbench core operations.
pub type BenchResult<T> = Result<T, BenchError>;

impl BenchError {
    /// Create a missing parameter error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create an invalid parameter error.
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
