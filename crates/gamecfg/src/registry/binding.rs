//! Strategies for turning a parsed document into table data.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::coerce::CoercionNotes;
use crate::input::ParsedDocument;
use crate::mapping::{ConfigRecord, Record, RecordCollection, RecordMapper, TypeDescriptor};
use crate::schema::TableSchema;

/// How a table's schema was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// One of the built-in game tables.
    Builtin,
    /// A type registered with [`ConfigRegistry::register`](super::ConfigRegistry::register).
    Registered,
    /// Derived from the table's own header block.
    Derived,
}

impl std::fmt::Display for BindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingKind::Builtin => write!(f, "builtin"),
            BindingKind::Registered => write!(f, "registered"),
            BindingKind::Derived => write!(f, "derived"),
        }
    }
}

/// Records produced by a binding.
pub(crate) struct BoundTable {
    pub records: RecordCollection,
    /// `Vec<T>` of the bound record type, when there is one.
    pub typed: Option<Arc<dyn Any + Send + Sync>>,
    pub notes: CoercionNotes,
    pub unmatched_columns: Vec<String>,
}

pub(crate) trait TableBinding: Send + Sync {
    fn schema(&self) -> &TableSchema;

    fn bind(&self, doc: &ParsedDocument) -> BoundTable;
}

/// Binding through a compile-time record type.
///
/// Rows are coerced once into dynamic records, then copied into `T`.
pub(crate) struct TypedBinding<T> {
    descriptor: TypeDescriptor<T>,
}

impl<T: ConfigRecord> TypedBinding<T> {
    pub fn new() -> Self {
        Self {
            descriptor: T::descriptor(),
        }
    }
}

impl<T: ConfigRecord> TableBinding for TypedBinding<T> {
    fn schema(&self) -> &TableSchema {
        self.descriptor.schema()
    }

    fn bind(&self, doc: &ParsedDocument) -> BoundTable {
        let dynamic = self.schema().record_descriptor();
        let outcome = RecordMapper::map(doc.field_names(), &doc.data_rows, &dynamic);
        let typed: Vec<T> = outcome
            .records
            .iter()
            .map(|record| typed_from_record(record, &self.descriptor))
            .collect();

        BoundTable {
            records: RecordCollection::new(outcome.records),
            typed: Some(Arc::new(typed)),
            notes: outcome.notes,
            unmatched_columns: outcome.unmatched_columns,
        }
    }
}

/// Binding through a schema known only at runtime.
pub(crate) struct DerivedBinding {
    schema: TableSchema,
}

impl DerivedBinding {
    pub fn new(schema: TableSchema) -> Self {
        Self { schema }
    }
}

impl TableBinding for DerivedBinding {
    fn schema(&self) -> &TableSchema {
        &self.schema
    }

    fn bind(&self, doc: &ParsedDocument) -> BoundTable {
        let outcome = RecordMapper::map(doc.field_names(), &doc.data_rows, &self.schema.record_descriptor());
        BoundTable {
            records: RecordCollection::new(outcome.records),
            typed: None,
            notes: outcome.notes,
            unmatched_columns: outcome.unmatched_columns,
        }
    }
}

/// Copy a dynamic record into `T`, matching fields by name.
pub(crate) fn typed_from_record<T>(record: &Record, descriptor: &TypeDescriptor<T>) -> T {
    let mut typed = descriptor.new_record();
    for (index, field) in descriptor.fields().iter().enumerate() {
        if let Some(value) = record.get(&field.field_name) {
            descriptor.set(&mut typed, index, value.clone());
        }
    }
    typed
}
