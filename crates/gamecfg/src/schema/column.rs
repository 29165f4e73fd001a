//! Column schema definition.

use serde::{Deserialize, Serialize};

use super::types::DeclaredType;

/// Schema for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Zero-based column position in the source header.
    pub position: usize,
    /// Human-readable comment from the first header row.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    /// Field identifier as written in the CSV.
    pub field_name: String,
    /// Resolved type.
    pub declared_type: DeclaredType,
    /// Raw type token the type was resolved from.
    pub type_token: String,
}

impl FieldSchema {
    /// Create a field whose type token is the canonical token of its type.
    pub fn new(position: usize, field_name: impl Into<String>, declared_type: DeclaredType) -> Self {
        let type_token = declared_type.token().to_string();
        Self {
            position,
            display_name: String::new(),
            field_name: field_name.into(),
            declared_type,
            type_token,
        }
    }

    /// Set the display comment.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Record the raw token this type was resolved from.
    pub fn with_type_token(mut self, token: impl Into<String>) -> Self {
        self.type_token = token.into();
        self
    }

    /// True when the raw token did not resolve and the column fell back to text.
    pub fn is_fallback(&self) -> bool {
        !self
            .type_token
            .trim()
            .eq_ignore_ascii_case(self.declared_type.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_detection() {
        let exact = FieldSchema::new(0, "id", DeclaredType::Int);
        assert!(!exact.is_fallback());

        let cased = FieldSchema::new(0, "id", DeclaredType::Int).with_type_token("INT");
        assert!(!cased.is_fallback());

        let unknown = FieldSchema::new(1, "pos", DeclaredType::Text).with_type_token("Vector3");
        assert!(unknown.is_fallback());
    }
}
