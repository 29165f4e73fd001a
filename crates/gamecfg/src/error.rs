//! Error types for the gamecfg library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for configuration table operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document has fewer lines than its declared header block needs.
    #[error("Malformed document '{table}': expected at least {expected} lines, found {found}")]
    MalformedDocument {
        table: String,
        expected: usize,
        found: usize,
    },

    /// No binding and no cached data for the table.
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// The file provider has no content for the requested path.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// An export destination could not be written.
    #[error("Cannot write export to '{path}': {source}")]
    ExportTargetUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two columns in one table share a field name.
    #[error("Duplicate field '{field}' in table '{table}'")]
    DuplicateField { table: String, field: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConfigError {
    /// Short machine-friendly label for the error kind, used in notifications.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "io",
            ConfigError::MalformedDocument { .. } => "malformed_document",
            ConfigError::UnknownTable(_) => "unknown_table",
            ConfigError::ResourceNotFound(_) => "resource_not_found",
            ConfigError::ExportTargetUnwritable { .. } => "export_target_unwritable",
            ConfigError::DuplicateField { .. } => "duplicate_field",
            ConfigError::Csv(_) => "csv",
            ConfigError::Json(_) => "json",
            ConfigError::Config(_) => "config",
        }
    }
}

/// Result type alias for gamecfg operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
