//! Cached tables and load diagnostics.

use std::any::Any;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::binding::BindingKind;
use crate::coerce::CoercionNotes;
use crate::input::SourceMetadata;
use crate::mapping::RecordCollection;
use crate::schema::TableSchema;

/// Diagnostics for one table load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub table: String,
    /// Records now cached for the table.
    pub rows: usize,
    pub binding: BindingKind,
    /// Cells that failed coercion and were replaced by zero values.
    pub notes: CoercionNotes,
    /// The document was shorter than its header block plus one row.
    pub malformed: bool,
    /// Lines that ended inside an open quote.
    pub unterminated_quotes: usize,
    /// Fields whose type token fell back to text.
    pub fallback_fields: Vec<String>,
    /// Header columns that matched no field.
    pub unmatched_columns: Vec<String>,
    /// A previously cached version was replaced.
    pub replaced: bool,
}

impl LoadReport {
    pub fn coercion_failures(&self) -> usize {
        self.notes.len()
    }

    /// True when the load needed no leniency at all.
    pub fn is_clean(&self) -> bool {
        self.notes.is_empty()
            && !self.malformed
            && self.unterminated_quotes == 0
            && self.fallback_fields.is_empty()
            && self.unmatched_columns.is_empty()
    }
}

/// A table held in the registry cache.
///
/// Never mutated after construction; a reload builds a new one.
pub struct LoadedTable {
    pub name: String,
    pub schema: TableSchema,
    pub records: Arc<RecordCollection>,
    pub source: SourceMetadata,
    pub report: LoadReport,
    typed: Option<Arc<dyn Any + Send + Sync>>,
}

impl LoadedTable {
    pub(crate) fn new(
        name: String,
        schema: TableSchema,
        records: RecordCollection,
        typed: Option<Arc<dyn Any + Send + Sync>>,
        source: SourceMetadata,
        report: LoadReport,
    ) -> Self {
        Self {
            name,
            schema,
            records: Arc::new(records),
            source,
            report,
            typed,
        }
    }

    /// Typed records, when the table was bound to `T`.
    pub fn typed<T: Send + Sync + 'static>(&self) -> Option<Arc<Vec<T>>> {
        let typed = Arc::clone(self.typed.as_ref()?);
        typed.downcast::<Vec<T>>().ok()
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Summary for display.
    pub fn info(&self) -> TableInfo {
        TableInfo {
            name: self.name.clone(),
            path: self.source.path.clone(),
            rows: self.records.len(),
            columns: self.schema.field_count(),
            binding: self.report.binding,
            hash: self.source.hash.clone(),
            loaded_at: self.source.loaded_at,
            fields: self.schema.field_names().iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Debug for LoadedTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedTable")
            .field("name", &self.name)
            .field("rows", &self.records.len())
            .field("hash", &self.source.hash)
            .field("typed", &self.typed.is_some())
            .finish()
    }
}

/// Summary of a cached table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    pub path: String,
    pub rows: usize,
    pub columns: usize,
    pub binding: BindingKind,
    pub hash: String,
    pub loaded_at: DateTime<Utc>,
    pub fields: Vec<String>,
}
