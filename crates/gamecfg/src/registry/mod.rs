//! Table registry: discovery, loading, caching, lookup and export.

mod binding;
mod events;
mod export;
mod manager;
mod table;

pub use binding::BindingKind;
pub use events::RegistryEvent;
pub use export::{ExportFormat, ExportedTable};
pub use manager::{ConfigRegistry, TableResults};
pub use table::{LoadReport, LoadedTable, TableInfo};
