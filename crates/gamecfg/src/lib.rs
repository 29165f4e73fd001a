//! gamecfg: schema-driven CSV configuration tables for game static data.
//!
//! Designers edit tables such as enemies, weapons, items and levels as CSV
//! files. gamecfg tokenizes them, coerces each cell into its declared type,
//! maps rows onto typed records and keeps the result in a registry that the
//! game queries by id. It can also derive a schema from a table's header
//! block and render a matching Rust record type.
//!
//! # Table layout
//!
//! A table starts with a three-row header block: display names, field
//! names, then type tokens (`int`, `long`, `float`, `double`, `bool`,
//! `string` or an enum name). Every following non-blank line is one record.
//!
//! ```text
//! ID,Name,Health
//! id,name,health
//! int,string,int
//! 1,Zombie,100
//! ```
//!
//! # Example
//!
//! ```no_run
//! use gamecfg::{ConfigRegistry, DirectoryProvider};
//! use gamecfg::tables::WeaponConfig;
//!
//! let mut registry = ConfigRegistry::new(DirectoryProvider::new("assets"));
//! for (table, result) in registry.load_all().unwrap() {
//!     if let Err(e) = result {
//!         eprintln!("{table}: {e}");
//!     }
//! }
//!
//! let weapons = registry.get_all_typed::<WeaponConfig>("WeaponConfig").unwrap();
//! println!("Weapons: {}", weapons.len());
//! ```

pub mod codegen;
pub mod coerce;
pub mod config;
pub mod error;
pub mod input;
pub mod mapping;
pub mod registry;
pub mod schema;
pub mod tables;

pub use codegen::{EnumCatalog, SchemaGenerator, class_name_for, render_definition};
pub use coerce::{CoercionError, CoercionNotes, FromValue, Value, coerce, coerce_or_zero};
pub use config::RegistryConfig;
pub use error::{ConfigError, Result};
pub use input::{CsvParser, DirectoryProvider, FileProvider, MemoryProvider, ParsedDocument, parse_document, parse_line};
pub use mapping::{ConfigRecord, MapOutcome, Record, RecordCollection, RecordMapper, TypeDescriptor};
pub use registry::{ConfigRegistry, ExportFormat, LoadReport, RegistryEvent};
pub use schema::{DeclaredType, EnumDescriptor, FieldSchema, TableSchema};
