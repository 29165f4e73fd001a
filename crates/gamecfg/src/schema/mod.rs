//! Schema types describing configuration table structure.

mod column;
mod table;
mod types;

pub use column::FieldSchema;
pub use table::TableSchema;
pub use types::{DeclaredType, EnumDescriptor};
