//! Schema derivation and record type generation.
//!
//! [`SchemaGenerator`] turns a three-row header block into a
//! [`TableSchema`](crate::schema::TableSchema); [`render_definition`] turns a
//! schema into Rust source. Rendering is pure; writing files is up to the
//! caller.

mod generator;
mod render;

pub use generator::{
    DEFAULT_SUFFIX, EnumCatalog, HEADER_BLOCK_ROWS, SchemaGenerator, class_name_for,
    normalize_table_name,
};
pub use render::render_definition;
