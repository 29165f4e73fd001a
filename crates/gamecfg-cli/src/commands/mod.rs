//! CLI command implementations.

pub mod export;
pub mod generate;
pub mod load;
pub mod show;
pub mod tables;
pub mod watch;

use std::path::PathBuf;

use gamecfg::{ConfigRegistry, DirectoryProvider, RegistryConfig, Value};

/// Where tables live and how the registry reads them.
pub struct RegistryOptions {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
}

impl RegistryOptions {
    /// Build a registry over the configured directory.
    pub fn open(&self) -> Result<ConfigRegistry, Box<dyn std::error::Error>> {
        let config = match &self.config {
            Some(path) => RegistryConfig::from_toml_file(path)?,
            None => RegistryConfig::default(),
        };

        let folder = self.root.join(&config.folder);
        if !folder.is_dir() {
            return Err(format!(
                "Configuration folder not found: {}\nUse --root to point at the directory containing '{}'.",
                folder.display(),
                config.folder
            )
            .into());
        }

        Ok(ConfigRegistry::new(DirectoryProvider::new(self.root.clone())).with_config(config))
    }
}

/// Interpret a command-line id as a number when it looks like one.
pub fn parse_id(raw: &str) -> Value {
    match raw.parse::<i64>() {
        Ok(v) => Value::Long(v),
        Err(_) => Value::Text(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse_as_numbers() {
        assert_eq!(parse_id("42"), Value::Long(42));
        assert_eq!(parse_id("-3"), Value::Long(-3));
        assert_eq!(parse_id("sword_01"), Value::Text("sword_01".to_string()));
    }

    #[test]
    fn missing_folder_is_reported() {
        let opts = RegistryOptions {
            root: PathBuf::from("/nonexistent/gamecfg/root"),
            config: None,
        };
        let err = opts.open().unwrap_err();
        assert!(err.to_string().contains("Configuration folder not found"));
    }
}
