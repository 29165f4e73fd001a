//! Row-to-record mapping.

use super::descriptor::TypeDescriptor;
use crate::coerce::{CoercionNotes, coerce_or_zero};

/// Result of mapping a table's data rows.
#[derive(Debug, Clone)]
pub struct MapOutcome<T> {
    /// One record per data row, in row order.
    pub records: Vec<T>,
    /// Coercion failures that were replaced by zero values.
    pub notes: CoercionNotes,
    /// Header tokens that matched no declared field.
    pub unmatched_columns: Vec<String>,
}

/// Maps tokenized rows onto records through a [`TypeDescriptor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordMapper;

impl RecordMapper {
    /// Map every data row to a record.
    ///
    /// With a header, columns bind to fields by exact name (first column
    /// wins). Without one, column `i` binds to field `i`. Missing cells and
    /// unbound fields take the field's zero value; extra cells are ignored.
    pub fn map<T>(
        header: Option<&[String]>,
        rows: &[Vec<String>],
        descriptor: &TypeDescriptor<T>,
    ) -> MapOutcome<T> {
        let fields = descriptor.fields();
        let mut unmatched_columns = Vec::new();

        let bindings: Vec<Option<usize>> = match header {
            Some(header) => {
                let bindings: Vec<Option<usize>> = fields
                    .iter()
                    .map(|f| header.iter().position(|h| *h == f.field_name))
                    .collect();

                for (column, token) in header.iter().enumerate() {
                    if !token.is_empty() && !bindings.contains(&Some(column)) {
                        unmatched_columns.push(token.clone());
                    }
                }
                bindings
            }
            None => (0..fields.len()).map(Some).collect(),
        };

        if !unmatched_columns.is_empty() {
            tracing::warn!(
                table = %descriptor.schema().name,
                columns = ?unmatched_columns,
                "header columns match no declared field"
            );
        }

        let mut notes = CoercionNotes::new();
        let records = rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                let mut record = descriptor.new_record();
                for (index, (field, column)) in fields.iter().zip(&bindings).enumerate() {
                    let raw = column
                        .and_then(|c| row.get(c))
                        .map(String::as_str)
                        .unwrap_or("");
                    let value = coerce_or_zero(
                        raw,
                        &field.declared_type,
                        &field.field_name,
                        Some(row_index),
                        &mut notes,
                    );
                    descriptor.set(&mut record, index, value);
                }
                record
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            table = %descriptor.schema().name,
            rows = records.len(),
            notes = notes.len(),
            "mapped rows"
        );

        MapOutcome {
            records,
            notes,
            unmatched_columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::Value;
    use crate::schema::{DeclaredType, FieldSchema, TableSchema};

    fn schema() -> TableSchema {
        TableSchema::with_fields(
            "EnemyConfig",
            vec![
                FieldSchema::new(0, "id", DeclaredType::Int),
                FieldSchema::new(1, "name", DeclaredType::Text),
                FieldSchema::new(2, "health", DeclaredType::Int),
            ],
        )
        .unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_binding_by_name() {
        let header = strings(&["name", "id", "bonus", "health"]);
        let rows = vec![strings(&["Zombie", "1", "x", "100"])];
        let outcome = RecordMapper::map(Some(header.as_slice()), &rows, &schema().record_descriptor());

        let r = &outcome.records[0];
        assert_eq!(r.get("id"), Some(&Value::Int(1)));
        assert_eq!(r.get("name"), Some(&Value::from("Zombie")));
        assert_eq!(r.get("health"), Some(&Value::Int(100)));
        assert_eq!(outcome.unmatched_columns, vec!["bonus".to_string()]);
        assert!(outcome.notes.is_empty());
    }

    #[test]
    fn test_short_and_long_rows() {
        let header = strings(&["id", "name", "health"]);
        let rows = vec![strings(&["1"]), strings(&["2", "Bat", "5", "extra"])];
        let outcome = RecordMapper::map(Some(header.as_slice()), &rows, &schema().record_descriptor());

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].get("health"), Some(&Value::Int(0)));
        assert_eq!(outcome.records[0].get("name"), Some(&Value::from("")));
        assert_eq!(outcome.records[1].len(), 3);
        assert!(outcome.notes.is_empty());
    }

    #[test]
    fn test_positional_binding_without_header() {
        let rows = vec![strings(&["7", "Ghost", "40"])];
        let outcome = RecordMapper::map(None, &rows, &schema().record_descriptor());
        assert_eq!(outcome.records[0].get("id"), Some(&Value::Int(7)));
        assert_eq!(outcome.records[0].get("health"), Some(&Value::Int(40)));
    }

    #[test]
    fn test_bad_cell_does_not_abort_row() {
        let header = strings(&["id", "name", "health"]);
        let rows = vec![strings(&["1", "Zombie", "lots"]), strings(&["2", "Bat", "5"])];
        let outcome = RecordMapper::map(Some(header.as_slice()), &rows, &schema().record_descriptor());

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].get("health"), Some(&Value::Int(0)));
        assert_eq!(outcome.records[0].get("name"), Some(&Value::from("Zombie")));
        assert_eq!(outcome.notes.len(), 1);
        assert_eq!(outcome.notes[0].row, Some(0));
        assert_eq!(outcome.notes[0].field, "health");
    }

    #[test]
    fn test_missing_field_column_gets_zero() {
        let header = strings(&["id", "name"]);
        let rows = vec![strings(&["3", "Slime"])];
        let outcome = RecordMapper::map(Some(header.as_slice()), &rows, &schema().record_descriptor());
        assert_eq!(outcome.records[0].get("health"), Some(&Value::Int(0)));
        assert!(outcome.unmatched_columns.is_empty());
    }
}
