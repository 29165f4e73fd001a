//! Core type definitions for schema representation.

use serde::{Deserialize, Serialize};

/// Symbolic names of an enum type, in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumDescriptor {
    /// Type name as written in CSV type rows and generated code.
    pub name: String,
    /// Declared symbols; index is the ordinal.
    pub symbols: Vec<String>,
}

impl EnumDescriptor {
    /// Create a descriptor from a name and its ordered symbols.
    pub fn new<S: Into<String>>(name: impl Into<String>, symbols: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Ordinal of a symbol, matched case-sensitively.
    pub fn ordinal_of(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Symbol at an ordinal.
    pub fn symbol(&self, ordinal: usize) -> Option<&str> {
        self.symbols.get(ordinal).map(String::as_str)
    }
}

/// Declared type of a configuration column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclaredType {
    /// 32-bit signed integer (`int`).
    Int,
    /// 64-bit signed integer (`long`).
    Long,
    /// Single-precision float (`float`).
    Float,
    /// Double-precision float (`double`).
    Double,
    /// Boolean (`bool`).
    Bool,
    /// Text (`string`), also the fallback for unknown tokens.
    #[default]
    Text,
    /// A named enum type.
    Enum(EnumDescriptor),
}

impl DeclaredType {
    /// Resolve one of the fixed primitive tokens, ignoring case.
    pub fn from_primitive_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "int" => Some(DeclaredType::Int),
            "long" => Some(DeclaredType::Long),
            "float" => Some(DeclaredType::Float),
            "double" => Some(DeclaredType::Double),
            "bool" => Some(DeclaredType::Bool),
            "string" => Some(DeclaredType::Text),
            _ => None,
        }
    }

    /// The CSV type-row token for this type.
    pub fn token(&self) -> &str {
        match self {
            DeclaredType::Int => "int",
            DeclaredType::Long => "long",
            DeclaredType::Float => "float",
            DeclaredType::Double => "double",
            DeclaredType::Bool => "bool",
            DeclaredType::Text => "string",
            DeclaredType::Enum(e) => &e.name,
        }
    }

    /// The Rust type used for this column in generated code.
    pub fn rust_type(&self) -> &str {
        match self {
            DeclaredType::Int => "i32",
            DeclaredType::Long => "i64",
            DeclaredType::Float => "f32",
            DeclaredType::Double => "f64",
            DeclaredType::Bool => "bool",
            DeclaredType::Text => "String",
            DeclaredType::Enum(e) => &e.name,
        }
    }

    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DeclaredType::Int | DeclaredType::Long | DeclaredType::Float | DeclaredType::Double
        )
    }

    /// The enum descriptor, if this is an enum type.
    pub fn as_enum(&self) -> Option<&EnumDescriptor> {
        match self {
            DeclaredType::Enum(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_tokens() {
        assert_eq!(DeclaredType::from_primitive_token("int"), Some(DeclaredType::Int));
        assert_eq!(DeclaredType::from_primitive_token(" Float "), Some(DeclaredType::Float));
        assert_eq!(DeclaredType::from_primitive_token("STRING"), Some(DeclaredType::Text));
        assert_eq!(DeclaredType::from_primitive_token("vector3"), None);
    }

    #[test]
    fn test_default_is_text() {
        assert_eq!(DeclaredType::default(), DeclaredType::Text);
    }

    #[test]
    fn test_enum_descriptor_lookup() {
        let e = EnumDescriptor::new("EnemyType", ["Normal", "Fast", "Tank"]);
        assert_eq!(e.ordinal_of("Fast"), Some(1));
        assert_eq!(e.ordinal_of("fast"), None);
        assert_eq!(e.symbol(2), Some("Tank"));
        assert_eq!(DeclaredType::Enum(e).token(), "EnemyType");
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&DeclaredType::Int).unwrap();
        assert_eq!(json, r#"{"kind":"int"}"#);

        let e = DeclaredType::Enum(EnumDescriptor::new("Rarity", ["Common"]));
        let back: DeclaredType = serde_json::from_str(&serde_json::to_string(&e).unwrap()).unwrap();
        assert_eq!(back, e);
    }
}
