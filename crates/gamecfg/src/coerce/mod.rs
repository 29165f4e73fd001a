//! Conversion of raw CSV text into typed values.
//!
//! Empty input always coerces to the target's zero value. Malformed input
//! produces a [`CoercionError`]; callers that map whole rows use
//! [`coerce_or_zero`], which substitutes the zero value and records the
//! error so that one bad cell never aborts a row.

mod value;

pub use value::{EnumValue, FromValue, Value};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::DeclaredType;

/// A single field that failed type conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("cannot coerce '{raw}' to {target} for field '{field}'{}", row_suffix(.row))]
pub struct CoercionError {
    /// Field name, empty when the failure was produced outside a row.
    pub field: String,
    /// Raw text that failed to convert.
    pub raw: String,
    /// Type token of the target type.
    pub target: String,
    /// Zero-based data row index, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

fn row_suffix(row: &Option<usize>) -> String {
    row.map(|r| format!(" (row {})", r + 1)).unwrap_or_default()
}

impl CoercionError {
    fn new(raw: &str, target: &DeclaredType) -> Self {
        Self {
            field: String::new(),
            raw: raw.to_string(),
            target: target.token().to_string(),
            row: None,
        }
    }

    /// Attach the field name and row the failure belongs to.
    pub fn in_field(mut self, field: impl Into<String>, row: Option<usize>) -> Self {
        self.field = field.into();
        self.row = row;
        self
    }
}

/// Accumulated coercion failures for a mapping pass.
pub type CoercionNotes = Vec<CoercionError>;

/// Convert a raw field into a value of the declared type.
pub fn coerce(raw: &str, target: &DeclaredType) -> Result<Value, CoercionError> {
    if raw.is_empty() {
        return Ok(Value::zero(target));
    }

    let fail = || CoercionError::new(raw, target);

    match target {
        DeclaredType::Int => raw.parse::<i32>().map(Value::Int).map_err(|_| fail()),
        DeclaredType::Long => raw.parse::<i64>().map(Value::Long).map_err(|_| fail()),
        DeclaredType::Float => raw.parse::<f32>().map(Value::Float).map_err(|_| fail()),
        DeclaredType::Double => raw.parse::<f64>().map(Value::Double).map_err(|_| fail()),
        DeclaredType::Bool => {
            if raw.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(fail())
            }
        }
        DeclaredType::Text => Ok(Value::Text(raw.to_string())),
        DeclaredType::Enum(e) => e
            .ordinal_of(raw)
            .map(|ordinal| {
                Value::Enum(EnumValue {
                    type_name: e.name.clone(),
                    symbol: raw.to_string(),
                    ordinal,
                })
            })
            .ok_or_else(fail),
    }
}

/// Coerce a field, substituting the zero value on failure.
///
/// The failure is pushed onto `notes` with the field name and row attached.
pub fn coerce_or_zero(
    raw: &str,
    target: &DeclaredType,
    field: &str,
    row: Option<usize>,
    notes: &mut CoercionNotes,
) -> Value {
    match coerce(raw, target) {
        Ok(value) => value,
        Err(err) => {
            let err = err.in_field(field, row);
            tracing::warn!(
                field = %err.field,
                raw = %err.raw,
                target = %err.target,
                row = ?err.row,
                "coercion failed, using zero value"
            );
            notes.push(err);
            Value::zero(target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EnumDescriptor;

    fn enemy_type() -> DeclaredType {
        DeclaredType::Enum(EnumDescriptor::new("EnemyType", ["Normal", "Fast", "Tank"]))
    }

    #[test]
    fn test_coerce_primitives() {
        assert_eq!(coerce("42", &DeclaredType::Int).unwrap(), Value::Int(42));
        assert_eq!(coerce("-7", &DeclaredType::Long).unwrap(), Value::Long(-7));
        assert_eq!(coerce("1.5", &DeclaredType::Float).unwrap(), Value::Float(1.5));
        assert_eq!(coerce("0.25", &DeclaredType::Double).unwrap(), Value::Double(0.25));
        assert_eq!(coerce("Zombie", &DeclaredType::Text).unwrap(), Value::from("Zombie"));
    }

    #[test]
    fn test_coerce_empty_is_zero() {
        assert_eq!(coerce("", &DeclaredType::Int).unwrap(), Value::Int(0));
        assert_eq!(coerce("", &DeclaredType::Float).unwrap(), Value::Float(0.0));
        assert_eq!(coerce("", &DeclaredType::Bool).unwrap(), Value::Bool(false));
        assert_eq!(coerce("", &DeclaredType::Text).unwrap(), Value::from(""));
        assert_eq!(coerce("", &enemy_type()).unwrap().as_str(), Some("Normal"));
    }

    #[test]
    fn test_coerce_numeric_is_locale_invariant() {
        assert!(coerce("1,5", &DeclaredType::Float).is_err());
        assert!(coerce("12abc", &DeclaredType::Int).is_err());
        assert!(coerce("3000000000", &DeclaredType::Int).is_err());
        assert_eq!(
            coerce("3000000000", &DeclaredType::Long).unwrap(),
            Value::Long(3_000_000_000)
        );
    }

    #[test]
    fn test_coerce_bool_tokens() {
        assert_eq!(coerce("TRUE", &DeclaredType::Bool).unwrap(), Value::Bool(true));
        assert_eq!(coerce("False", &DeclaredType::Bool).unwrap(), Value::Bool(false));
        assert!(coerce("1", &DeclaredType::Bool).is_err());
        assert!(coerce("yes", &DeclaredType::Bool).is_err());
    }

    #[test]
    fn test_coerce_enum_case_sensitive() {
        let v = coerce("Tank", &enemy_type()).unwrap();
        match v {
            Value::Enum(e) => {
                assert_eq!(e.ordinal, 2);
                assert_eq!(e.type_name, "EnemyType");
            }
            other => panic!("expected enum, got {other:?}"),
        }
        assert!(coerce("tank", &enemy_type()).is_err());
    }

    #[test]
    fn test_unknown_enum_yields_zero_ordinal() {
        let mut notes = Vec::new();
        let v = coerce_or_zero("Unknown", &enemy_type(), "enemyType", Some(0), &mut notes);
        match v {
            Value::Enum(e) => {
                assert_eq!(e.ordinal, 0);
                assert_eq!(e.symbol, "Normal");
            }
            other => panic!("expected enum, got {other:?}"),
        }
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].raw, "Unknown");
    }

    #[test]
    fn test_coerce_or_zero_records_failure() {
        let mut notes = Vec::new();
        let v = coerce_or_zero("abc", &DeclaredType::Int, "health", Some(3), &mut notes);
        assert_eq!(v, Value::Int(0));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].field, "health");
        assert_eq!(notes[0].target, "int");
        assert_eq!(
            notes[0].to_string(),
            "cannot coerce 'abc' to int for field 'health' (row 4)"
        );
    }
}
