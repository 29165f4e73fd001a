//! Registry configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Settings controlling table discovery and loading.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// folder = "Data/Tables"
/// derive_unknown_schemas = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Folder, relative to the provider root, holding table files.
    pub folder: String,
    /// Resource names must end with this suffix to be discovered.
    pub suffix: String,
    /// Resource names containing this marker are never discovered.
    pub sample_marker: String,
    /// Header rows before the data region.
    pub header_rows: usize,
    /// Field used for id lookups when a schema names none.
    pub id_field: String,
    /// Derive schemas for tables with no binding from their header block.
    pub derive_unknown_schemas: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            folder: "Configs".to_string(),
            suffix: "Config".to_string(),
            sample_marker: "Sample".to_string(),
            header_rows: 3,
            id_field: "id".to_string(),
            derive_unknown_schemas: false,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content)
            .map_err(|e: toml::de::Error| ConfigError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e: toml::de::Error| ConfigError::Config(e.to_string()))
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_sample_marker(mut self, marker: impl Into<String>) -> Self {
        self.sample_marker = marker.into();
        self
    }

    pub fn with_header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows;
        self
    }

    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    pub fn with_derive_unknown_schemas(mut self, enabled: bool) -> Self {
        self.derive_unknown_schemas = enabled;
        self
    }

    /// Provider path of a table: `folder/name`.
    pub fn resource_path(&self, table: &str) -> String {
        if self.folder.is_empty() {
            table.to_string()
        } else {
            format!("{}/{}", self.folder.trim_end_matches('/'), table)
        }
    }

    /// Whether a resource name is a discoverable table.
    pub fn is_table_name(&self, name: &str) -> bool {
        name.ends_with(&self.suffix)
            && (self.sample_marker.is_empty() || !name.contains(&self.sample_marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.folder, "Configs");
        assert_eq!(config.header_rows, 3);
        assert!(!config.derive_unknown_schemas);
        assert_eq!(config.resource_path("EnemyConfig"), "Configs/EnemyConfig");
    }

    #[test]
    fn test_discovery_filter() {
        let config = RegistryConfig::default();
        assert!(config.is_table_name("EnemyConfig"));
        assert!(!config.is_table_name("EnemySampleConfig"));
        assert!(!config.is_table_name("EnemyTable"));
    }

    #[test]
    fn test_partial_toml() {
        let config = RegistryConfig::from_toml_str("folder = \"Data\"\nheader_rows = 1\n").unwrap();
        assert_eq!(config.folder, "Data");
        assert_eq!(config.header_rows, 1);
        assert_eq!(config.suffix, "Config");
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "derive_unknown_schemas = true").unwrap();
        let config = RegistryConfig::from_toml_file(file.path()).unwrap();
        assert!(config.derive_unknown_schemas);

        let err = RegistryConfig::from_toml_file("/nonexistent/gamecfg.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = RegistryConfig::from_toml_str("header_rows = \"three\"").unwrap_err();
        assert!(matches!(err, ConfigError::Config(_)));
    }
}
