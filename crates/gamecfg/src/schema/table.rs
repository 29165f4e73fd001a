//! Table-level schema definition.

use serde::{Deserialize, Serialize};

use super::column::FieldSchema;
use crate::error::{ConfigError, Result};

/// Schema for an entire configuration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name (e.g. `EnemyConfig`).
    pub name: String,
    /// Field schemas in column order.
    pub fields: Vec<FieldSchema>,
    /// Field used for lookups by id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_field: Option<String>,
}

impl TableSchema {
    /// Create a new empty table schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            id_field: None,
        }
    }

    /// Create a table schema with the given fields, rejecting duplicate names.
    pub fn with_fields(name: impl Into<String>, fields: Vec<FieldSchema>) -> Result<Self> {
        let mut schema = Self::new(name);
        for field in fields {
            schema.push_field(field)?;
        }
        Ok(schema)
    }

    /// Set the identifying field.
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = Some(field.into());
        self
    }

    /// Append a field, rejecting a name already in the table.
    pub fn push_field(&mut self, field: FieldSchema) -> Result<()> {
        if self.get_field(&field.field_name).is_some() {
            return Err(ConfigError::DuplicateField {
                table: self.name.clone(),
                field: field.field_name,
            });
        }
        self.fields.push(field);
        Ok(())
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    /// Get a field by source column position.
    pub fn get_field_by_position(&self, position: usize) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.position == position)
    }

    /// Get all field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.field_name.as_str()).collect()
    }

    /// Get the number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// The identifying field's name, falling back to `default` when it exists.
    pub fn resolve_id_field<'a>(&'a self, default: &'a str) -> Option<&'a str> {
        match &self.id_field {
            Some(id) => Some(id.as_str()),
            None => self.get_field(default).map(|f| f.field_name.as_str()),
        }
    }

    /// Fields whose type token fell back to text.
    pub fn fallback_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|f| f.is_fallback())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DeclaredType;

    #[test]
    fn test_duplicate_field_rejected() {
        let result = TableSchema::with_fields(
            "EnemyConfig",
            vec![
                FieldSchema::new(0, "id", DeclaredType::Int),
                FieldSchema::new(1, "id", DeclaredType::Text),
            ],
        );
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateField { ref field, .. }) if field == "id"
        ));
    }

    #[test]
    fn test_lookup_and_id_resolution() {
        let schema = TableSchema::with_fields(
            "ItemConfig",
            vec![
                FieldSchema::new(0, "id", DeclaredType::Int),
                FieldSchema::new(2, "name", DeclaredType::Text),
            ],
        )
        .unwrap();

        assert_eq!(schema.field_names(), vec!["id", "name"]);
        assert_eq!(schema.get_field_by_position(2).unwrap().field_name, "name");
        assert_eq!(schema.resolve_id_field("id"), Some("id"));
        assert_eq!(schema.resolve_id_field("key"), None);

        let keyed = schema.with_id_field("name");
        assert_eq!(keyed.resolve_id_field("id"), Some("name"));
    }
}
