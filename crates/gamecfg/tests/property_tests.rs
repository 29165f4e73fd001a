//! Property-based tests for the CSV pipeline.
//!
//! Property-based tests verify:
//! 1. **No panics**: tokenizing and coercion never crash on any input
//! 2. **Row preservation**: every non-blank data line becomes one record
//! 3. **Quoting**: quoted fields survive a format-then-parse cycle
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p gamecfg --test property_tests
//! ```

use proptest::prelude::*;

use gamecfg::{DeclaredType, FieldSchema, RecordMapper, TableSchema, Value, coerce, parse_document, parse_line};

// =============================================================================
// Test Strategies
// =============================================================================

/// Cell text without line breaks, quotes or delimiters.
fn plain_cell() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ .-]{0,12}".prop_map(|s| s.trim().to_string())
}

/// Cell text that needs quoting.
fn quoted_cell() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9,\" ]{0,12}".prop_map(|s| s.trim().to_string())
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn schema() -> TableSchema {
    TableSchema::with_fields(
        "PropConfig",
        vec![
            FieldSchema::new(0, "id", DeclaredType::Int),
            FieldSchema::new(1, "name", DeclaredType::Text),
            FieldSchema::new(2, "weight", DeclaredType::Float),
        ],
    )
    .unwrap()
}

// =============================================================================
// Parser Properties
// =============================================================================

proptest! {
    #[test]
    fn parse_line_never_panics(line in "[^\n]{0,200}") {
        let fields = parse_line(&line);
        prop_assert!(!fields.is_empty());
    }

    #[test]
    fn parse_document_never_panics(text in "(?s).{0,400}", header_rows in 0usize..4) {
        let doc = parse_document(&text, header_rows);
        if doc.malformed {
            prop_assert!(doc.data_rows.is_empty());
        } else {
            prop_assert_eq!(doc.header_rows.len(), header_rows);
        }
    }

    #[test]
    fn quoted_fields_round_trip(cells in prop::collection::vec(quoted_cell(), 1..8)) {
        let line = cells.iter().map(|c| quote(c)).collect::<Vec<_>>().join(",");
        prop_assert_eq!(parse_line(&line), cells);
    }

    #[test]
    fn plain_fields_round_trip(cells in prop::collection::vec(plain_cell(), 1..8)) {
        let line = cells.join(",");
        prop_assert_eq!(parse_line(&line), cells);
    }
}

// =============================================================================
// Mapping Properties
// =============================================================================

proptest! {
    #[test]
    fn row_count_is_preserved(
        rows in prop::collection::vec(
            (any::<i32>(), plain_cell(), prop::option::of(-1000.0f32..1000.0)),
            1..40,
        )
    ) {
        let mut text = String::from("ID,Name,Weight\nid,name,weight\nint,string,float\n");
        for (id, name, weight) in &rows {
            let weight = weight.map(|w| w.to_string()).unwrap_or_default();
            text.push_str(&format!("{id},{},{weight}\n", quote(name)));
        }

        let doc = parse_document(&text, 3);
        let outcome = RecordMapper::map(doc.field_names(), &doc.data_rows, &schema().record_descriptor());

        prop_assert_eq!(outcome.records.len(), rows.len());
        prop_assert!(outcome.notes.is_empty());
        for (record, (id, name, _)) in outcome.records.iter().zip(&rows) {
            prop_assert_eq!(record.get("id"), Some(&Value::Int(*id)));
            prop_assert_eq!(record.get("name").and_then(Value::as_str), Some(name.as_str()));
        }
    }

    #[test]
    fn malformed_cells_never_abort_rows(cells in prop::collection::vec("[^\n,\"]{0,10}", 1..20)) {
        let mut text = String::from("ID\nid\nint\n");
        for cell in &cells {
            text.push_str(&format!("x{cell}\n"));
        }

        let doc = parse_document(&text, 3);
        let outcome = RecordMapper::map(doc.field_names(), &doc.data_rows, &schema().record_descriptor());

        prop_assert_eq!(outcome.records.len(), doc.data_rows.len());
        prop_assert_eq!(outcome.notes.len(), doc.data_rows.len());
        for record in &outcome.records {
            prop_assert_eq!(record.get("id"), Some(&Value::Int(0)));
        }
    }

    #[test]
    fn int_coercion_matches_std(raw in "-?[0-9]{1,12}") {
        let coerced = coerce(&raw, &DeclaredType::Int);
        match raw.parse::<i32>() {
            Ok(v) => prop_assert_eq!(coerced.unwrap(), Value::Int(v)),
            Err(_) => prop_assert!(coerced.is_err()),
        }
    }
}
