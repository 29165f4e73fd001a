//! Writing cached tables to JSON or CSV.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::table::LoadedTable;
use crate::coerce::{CoercionNotes, coerce_or_zero};
use crate::error::{ConfigError, Result};
use crate::mapping::{Record, RecordCollection};
use crate::schema::{FieldSchema, TableSchema};

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `{table, fields, records}` document including the schema.
    #[default]
    Json,
    /// CSV with a three-row header block, loadable again.
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("Unknown export format: {}. Use 'json' or 'csv'", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// JSON export document as written by the registry.
#[derive(Serialize)]
struct ExportView<'a> {
    table: &'a str,
    fields: &'a [FieldSchema],
    records: &'a RecordCollection,
}

/// JSON export document read back from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedTable {
    pub table: String,
    pub fields: Vec<FieldSchema>,
    pub records: Vec<IndexMap<String, serde_json::Value>>,
}

impl ExportedTable {
    /// Read an export document.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Rebuild the table schema.
    pub fn schema(&self) -> Result<TableSchema> {
        TableSchema::with_fields(self.table.clone(), self.fields.clone())
    }

    /// Rebuild typed records by coercing every exported value through the schema.
    pub fn to_records(&self) -> Result<RecordCollection> {
        let schema = self.schema()?;
        let mut notes = CoercionNotes::new();

        let records = self
            .records
            .iter()
            .enumerate()
            .map(|(row, values)| {
                schema
                    .fields
                    .iter()
                    .map(|field| {
                        let raw = values
                            .get(&field.field_name)
                            .map(json_to_raw)
                            .unwrap_or_default();
                        let value = coerce_or_zero(
                            &raw,
                            &field.declared_type,
                            &field.field_name,
                            Some(row),
                            &mut notes,
                        );
                        (field.field_name.clone(), value)
                    })
                    .collect::<Record>()
            })
            .collect();

        if !notes.is_empty() {
            tracing::warn!(table = %self.table, failures = notes.len(), "export values did not coerce cleanly");
        }
        Ok(RecordCollection::new(records))
    }
}

fn json_to_raw(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Write `table` to `destination`, creating parent directories.
pub(crate) fn write_table(table: &LoadedTable, destination: &Path, format: ExportFormat) -> Result<()> {
    let unwritable = |e: std::io::Error| ConfigError::ExportTargetUnwritable {
        path: destination.to_path_buf(),
        source: e,
    };

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(unwritable)?;
        }
    }

    let file = File::create(destination).map_err(unwritable)?;

    match format {
        ExportFormat::Json => {
            let mut writer = BufWriter::new(file);
            let view = ExportView {
                table: &table.name,
                fields: &table.schema.fields,
                records: &table.records,
            };
            serde_json::to_writer_pretty(&mut writer, &view)?;
            writer.flush().map_err(unwritable)?;
        }
        ExportFormat::Csv => {
            let mut writer = csv::WriterBuilder::new().flexible(false).from_writer(file);
            let fields = &table.schema.fields;
            writer.write_record(fields.iter().map(|f| f.display_name.as_str()))?;
            writer.write_record(fields.iter().map(|f| f.field_name.as_str()))?;
            writer.write_record(fields.iter().map(|f| f.type_token.as_str()))?;

            for record in table.records.iter() {
                writer.write_record(fields.iter().map(|f| {
                    record
                        .get(&f.field_name)
                        .map(|v| v.to_string())
                        .unwrap_or_default()
                }))?;
            }
            writer.flush().map_err(unwritable)?;
        }
    }

    tracing::info!(
        table = %table.name,
        path = %destination.display(),
        format = %format,
        rows = table.records.len(),
        "exported table"
    );
    Ok(())
}
