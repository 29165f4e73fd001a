//! File provider abstraction and source metadata.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ConfigError, Result};

/// A named text resource returned by a [`FileProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Resource name without folder or extension (e.g. `EnemyConfig`).
    pub name: String,
    /// Raw text content.
    pub content: String,
}

/// Storage-agnostic access to raw configuration text.
///
/// Paths are `folder/name` without a file extension.
pub trait FileProvider: Send + Sync {
    /// List every resource directly inside `folder`.
    fn list_resources(&self, folder: &str) -> Result<Vec<Resource>>;

    /// Read a single resource, `None` when it does not exist.
    fn read_resource(&self, path: &str) -> Option<String>;
}

/// Serves `.csv` files from a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    /// Create a provider rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resource_path(&self, path: &str) -> PathBuf {
        let candidate = self.root.join(path);
        if is_csv(&candidate) {
            return candidate;
        }

        let exact = self.root.join(format!("{path}.csv"));
        if exact.is_file() {
            return exact;
        }
        find_csv_by_stem(&candidate).unwrap_or(exact)
    }
}

impl FileProvider for DirectoryProvider {
    fn list_resources(&self, folder: &str) -> Result<Vec<Resource>> {
        let dir = self.root.join(folder);
        let entries = std::fs::read_dir(&dir).map_err(|e| ConfigError::Io {
            path: dir.clone(),
            source: e,
        })?;

        let mut resources = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                path: dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() || !is_csv(&path) {
                continue;
            }

            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable resource");
                    continue;
                }
            };
            resources.push(Resource { name, content });
        }

        resources.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(resources)
    }

    fn read_resource(&self, path: &str) -> Option<String> {
        let file = self.resource_path(path);
        match std::fs::read_to_string(&file) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::debug!(path = %file.display(), error = %e, "resource not readable");
                None
            }
        }
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// A `.csv` file next to `candidate` whose stem equals its file name, with
/// the extension in any case.
fn find_csv_by_stem(candidate: &Path) -> Option<PathBuf> {
    let stem = candidate.file_name()?;
    let dir = candidate.parent()?;
    std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .find(|path| path.is_file() && is_csv(path) && path.file_stem() == Some(stem))
}

/// In-memory provider keyed by `folder/name`.
///
/// Content can be replaced while a registry holds the provider, which makes
/// it suitable for hosts that embed their tables and for hot-reload tests.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    resources: RwLock<BTreeMap<String, String>>,
}

impl MemoryProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource (builder style).
    pub fn with_resource(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Insert or replace a resource.
    pub fn insert(&self, path: impl Into<String>, content: impl Into<String>) {
        let mut resources = self
            .resources
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        resources.insert(path.into(), content.into());
    }

    /// Remove a resource, returning its content.
    pub fn remove(&self, path: &str) -> Option<String> {
        let mut resources = self
            .resources
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        resources.remove(path)
    }
}

impl FileProvider for MemoryProvider {
    fn list_resources(&self, folder: &str) -> Result<Vec<Resource>> {
        let resources = self
            .resources
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let prefix = format!("{}/", folder.trim_end_matches('/'));

        Ok(resources
            .iter()
            .filter_map(|(path, content)| {
                let name = path.strip_prefix(&prefix)?;
                (!name.contains('/')).then(|| Resource {
                    name: name.to_string(),
                    content: content.clone(),
                })
            })
            .collect())
    }

    fn read_resource(&self, path: &str) -> Option<String> {
        let resources = self
            .resources
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        resources.get(path).cloned()
    }
}

/// Metadata about a loaded table's source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Provider path the table was read from.
    pub path: String,
    /// SHA-256 hash of the source text.
    pub hash: String,
    /// Source size in bytes.
    pub size_bytes: u64,
    /// Number of data rows (excluding header rows).
    pub row_count: usize,
    /// Number of schema columns.
    pub column_count: usize,
    /// When the table was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for source text that has just been loaded.
    pub fn new(path: impl Into<String>, content: &str, row_count: usize, column_count: usize) -> Self {
        Self {
            path: path.into(),
            hash: content_hash(content),
            size_bytes: content.len() as u64,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// `sha256:<hex>` digest of some source text.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_provider_lists_folder() {
        let provider = MemoryProvider::new()
            .with_resource("Configs/EnemyConfig", "id\n1")
            .with_resource("Configs/nested/ItemConfig", "id\n1")
            .with_resource("Other/WeaponConfig", "id\n1");

        let names: Vec<String> = provider
            .list_resources("Configs")
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["EnemyConfig"]);
    }

    #[test]
    fn test_memory_provider_replace_and_remove() {
        let provider = MemoryProvider::new();
        assert_eq!(provider.read_resource("Configs/A"), None);

        provider.insert("Configs/A", "v1");
        provider.insert("Configs/A", "v2");
        assert_eq!(provider.read_resource("Configs/A").as_deref(), Some("v2"));

        assert_eq!(provider.remove("Configs/A").as_deref(), Some("v2"));
        assert_eq!(provider.read_resource("Configs/A"), None);
    }

    #[test]
    fn test_directory_provider() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("Configs");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("WeaponConfig.csv"), "id\n1").unwrap();
        std::fs::write(folder.join("EnemyConfig.CSV"), "id\n2").unwrap();
        std::fs::write(folder.join("notes.txt"), "ignored").unwrap();

        let provider = DirectoryProvider::new(dir.path());
        let resources = provider.list_resources("Configs").unwrap();
        let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["EnemyConfig", "WeaponConfig"]);

        assert_eq!(
            provider.read_resource("Configs/WeaponConfig").as_deref(),
            Some("id\n1")
        );
        assert_eq!(provider.read_resource("Configs/Missing"), None);
    }

    #[test]
    fn test_directory_provider_reads_uppercase_extension() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("Configs");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("EnemyConfig.CSV"), "id\n2").unwrap();

        let provider = DirectoryProvider::new(dir.path());
        let listed = provider.list_resources("Configs").unwrap();
        assert_eq!(listed[0].name, "EnemyConfig");
        assert_eq!(
            provider.read_resource("Configs/EnemyConfig").as_deref(),
            Some("id\n2")
        );
    }

    #[test]
    fn test_directory_provider_skips_unreadable_files() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("Configs");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("EnemyConfig.csv"), "id\n1").unwrap();
        std::fs::write(folder.join("notes.csv"), [0xFF, 0xFE, 0x00]).unwrap();

        let provider = DirectoryProvider::new(dir.path());
        let names: Vec<String> = provider
            .list_resources("Configs")
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["EnemyConfig"]);
    }

    #[test]
    fn test_directory_provider_missing_folder() {
        let dir = TempDir::new().unwrap();
        let provider = DirectoryProvider::new(dir.path());
        assert!(matches!(
            provider.list_resources("Nope"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_content_hash_is_stable() {
        assert_eq!(content_hash("abc"), content_hash("abc"));
        assert_ne!(content_hash("abc"), content_hash("abd"));
        assert!(content_hash("").starts_with("sha256:"));
    }
}
