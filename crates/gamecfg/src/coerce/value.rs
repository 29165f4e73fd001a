//! Typed cell values.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::schema::DeclaredType;

/// A value of an enum column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    /// Enum type name.
    pub type_name: String,
    /// Matched symbol.
    pub symbol: String,
    /// Zero-based ordinal of the symbol.
    pub ordinal: usize,
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Text(String),
    Enum(EnumValue),
    /// No value for a reference-like type.
    Absent,
}

impl Value {
    /// The zero value of a declared type.
    ///
    /// Enums yield their first symbol; an enum without symbols has no zero
    /// value and yields [`Value::Absent`].
    pub fn zero(target: &DeclaredType) -> Self {
        match target {
            DeclaredType::Int => Value::Int(0),
            DeclaredType::Long => Value::Long(0),
            DeclaredType::Float => Value::Float(0.0),
            DeclaredType::Double => Value::Double(0.0),
            DeclaredType::Bool => Value::Bool(false),
            DeclaredType::Text => Value::Text(String::new()),
            DeclaredType::Enum(e) => match e.symbol(0) {
                Some(symbol) => Value::Enum(EnumValue {
                    type_name: e.name.clone(),
                    symbol: symbol.to_string(),
                    ordinal: 0,
                }),
                None => Value::Absent,
            },
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Integer view of `Int` and `Long` values.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(i64::from(*v)),
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Floating-point view of any numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(f64::from(*v)),
            Value::Long(v) => Some(*v as f64),
            Value::Float(v) => Some(f64::from(*v)),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Text of a `Text` value, or the symbol of an `Enum` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Enum(e) => Some(&e.symbol),
            _ => None,
        }
    }

    /// Loose equality used for id lookups.
    ///
    /// Integers compare across widths, floats compare numerically and
    /// enum symbols compare against text.
    pub fn matches_id(&self, id: &Value) -> bool {
        if let (Some(a), Some(b)) = (self.as_i64(), id.as_i64()) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (self.as_f64(), id.as_f64()) {
            return a == b;
        }
        match (self.as_str(), id.as_str()) {
            (Some(a), Some(b)) => a == b,
            _ => self == id,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
            Value::Enum(e) => f.write_str(&e.symbol),
            Value::Absent => Ok(()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Enum(e) => serializer.serialize_str(&e.symbol),
            Value::Absent => serializer.serialize_none(),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Conversion from a coerced [`Value`] into a concrete field type.
///
/// Implemented by every type a [`TypeDescriptor`](crate::mapping::TypeDescriptor)
/// field can hold. A value of the wrong shape converts to the type's default.
pub trait FromValue: Sized {
    /// The declared column type for this field type.
    fn declared_type() -> DeclaredType;

    fn from_value(value: Value) -> Self;
}

impl FromValue for i32 {
    fn declared_type() -> DeclaredType {
        DeclaredType::Int
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Int(v) => v,
            _ => 0,
        }
    }
}

impl FromValue for i64 {
    fn declared_type() -> DeclaredType {
        DeclaredType::Long
    }

    fn from_value(value: Value) -> Self {
        value.as_i64().unwrap_or_default()
    }
}

impl FromValue for f32 {
    fn declared_type() -> DeclaredType {
        DeclaredType::Float
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Float(v) => v,
            _ => 0.0,
        }
    }
}

impl FromValue for f64 {
    fn declared_type() -> DeclaredType {
        DeclaredType::Double
    }

    fn from_value(value: Value) -> Self {
        value.as_f64().unwrap_or_default()
    }
}

impl FromValue for bool {
    fn declared_type() -> DeclaredType {
        DeclaredType::Bool
    }

    fn from_value(value: Value) -> Self {
        value.as_bool().unwrap_or_default()
    }
}

impl FromValue for String {
    fn declared_type() -> DeclaredType {
        DeclaredType::Text
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Text(s) => s,
            Value::Absent => String::new(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EnumDescriptor;

    #[test]
    fn test_zero_values() {
        assert_eq!(Value::zero(&DeclaredType::Int), Value::Int(0));
        assert_eq!(Value::zero(&DeclaredType::Bool), Value::Bool(false));
        assert_eq!(Value::zero(&DeclaredType::Text), Value::Text(String::new()));

        let empty = DeclaredType::Enum(EnumDescriptor::new("Nothing", Vec::<String>::new()));
        assert!(Value::zero(&empty).is_absent());
    }

    #[test]
    fn test_matches_id_across_widths() {
        assert!(Value::Int(7).matches_id(&Value::Long(7)));
        assert!(Value::Long(7).matches_id(&Value::Int(7)));
        assert!(!Value::Int(7).matches_id(&Value::Int(8)));
        assert!(Value::Text("boss".into()).matches_id(&Value::from("boss")));
        assert!(!Value::Text("7".into()).matches_id(&Value::Int(7)));
    }

    #[test]
    fn test_serialize_enum_as_symbol() {
        let v = Value::Enum(EnumValue {
            type_name: "EnemyType".into(),
            symbol: "Tank".into(),
            ordinal: 2,
        });
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"Tank\"");
        assert_eq!(serde_json::to_string(&Value::Absent).unwrap(), "null");
    }

    #[test]
    fn test_from_value_mismatch_defaults() {
        assert_eq!(i32::from_value(Value::Text("x".into())), 0);
        assert_eq!(String::from_value(Value::Int(3)), "3");
        assert!(!bool::from_value(Value::Absent));
    }
}
