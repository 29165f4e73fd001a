//! Load notifications.

use serde::Serialize;

/// Emitted by [`ConfigRegistry`](super::ConfigRegistry) after every load attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// A table was loaded and is now in the cache.
    Loaded {
        table: String,
        rows: usize,
        /// A previous version of the table was swapped out.
        replaced: bool,
    },
    /// A load failed; any previously cached version is unchanged.
    LoadFailed {
        table: String,
        kind: String,
        error: String,
    },
}

impl RegistryEvent {
    pub fn table(&self) -> &str {
        match self {
            RegistryEvent::Loaded { table, .. } | RegistryEvent::LoadFailed { table, .. } => table,
        }
    }
}

pub(crate) type Listener = Box<dyn Fn(&RegistryEvent) + Send + Sync>;
