//! Schema derivation from CSV header blocks.

use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};
use crate::schema::{DeclaredType, EnumDescriptor, FieldSchema, TableSchema};
use crate::tables;

/// Rows in a derivable header block: display names, field names, type tokens.
pub const HEADER_BLOCK_ROWS: usize = 3;

/// Default table-name suffix.
pub const DEFAULT_SUFFIX: &str = "Config";

/// Enum types known to the type resolver, keyed case-insensitively.
#[derive(Debug, Clone)]
pub struct EnumCatalog {
    enums: BTreeMap<String, EnumDescriptor>,
}

impl EnumCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self {
            enums: BTreeMap::new(),
        }
    }

    /// Catalog of the built-in game enums.
    pub fn builtin() -> Self {
        tables::builtin_enums()
            .into_iter()
            .fold(Self::new(), Self::with_enum)
    }

    /// Add an enum, replacing one with the same name.
    pub fn with_enum(mut self, descriptor: EnumDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    pub fn insert(&mut self, descriptor: EnumDescriptor) {
        self.enums
            .insert(descriptor.name.to_ascii_lowercase(), descriptor);
    }

    /// Look up an enum by type token, ignoring case.
    pub fn get(&self, token: &str) -> Option<&EnumDescriptor> {
        self.enums.get(&token.trim().to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnumDescriptor> {
        self.enums.values()
    }
}

impl Default for EnumCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Derives table schemas from three-row header blocks.
#[derive(Debug, Clone, Default)]
pub struct SchemaGenerator {
    catalog: EnumCatalog,
}

impl SchemaGenerator {
    /// Create a generator with the built-in enum catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: EnumCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &EnumCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut EnumCatalog {
        &mut self.catalog
    }

    /// Resolve a type token: primitives first, then catalog enums.
    pub fn resolve_type(&self, token: &str) -> Option<DeclaredType> {
        DeclaredType::from_primitive_token(token)
            .or_else(|| self.catalog.get(token).cloned().map(DeclaredType::Enum))
    }

    /// Derive a table schema from a header block.
    ///
    /// Row 0 holds display names, row 1 field names and row 2 type tokens,
    /// bound by column position. Columns without a field name are skipped.
    /// Unknown type tokens fall back to text and keep the raw token.
    pub fn derive_schema(&self, name: &str, header_block: &[Vec<String>]) -> Result<TableSchema> {
        if header_block.len() < HEADER_BLOCK_ROWS {
            return Err(ConfigError::MalformedDocument {
                table: name.to_string(),
                expected: HEADER_BLOCK_ROWS,
                found: header_block.len(),
            });
        }

        let displays = &header_block[0];
        let names = &header_block[1];
        let types = &header_block[2];
        let mut schema = TableSchema::new(name);

        for (position, field_name) in names.iter().enumerate() {
            if field_name.is_empty() {
                tracing::warn!(table = name, position, "skipping column with empty field name");
                continue;
            }

            let token = types.get(position).map(String::as_str).unwrap_or("");
            let declared_type = self.resolve_type(token).unwrap_or_else(|| {
                tracing::warn!(
                    table = name,
                    field = %field_name,
                    token,
                    "unknown type token, treating column as string"
                );
                DeclaredType::Text
            });

            let display = displays.get(position).map(String::as_str).unwrap_or("");
            let field = FieldSchema::new(position, field_name.as_str(), declared_type)
                .with_display_name(display)
                .with_type_token(token);
            schema.push_field(field)?;
        }

        tracing::debug!(table = name, fields = schema.field_count(), "derived schema");
        Ok(schema)
    }

    /// Render the Rust definition of a schema.
    pub fn render_definition(&self, schema: &TableSchema) -> String {
        super::render::render_definition(schema)
    }
}

/// Canonical table name for a resource name.
///
/// Strips `suffix`, upper-cases the first character and re-attaches the
/// suffix, so `enemyConfig` and `enemy` both become `EnemyConfig`.
pub fn normalize_table_name(name: &str, suffix: &str) -> String {
    let base = name.strip_suffix(suffix).unwrap_or(name);
    let mut chars = base.chars();
    let mut normalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    normalized.push_str(suffix);
    normalized
}

/// Type name generated for a table, using the default `Config` suffix.
pub fn class_name_for(table: &str) -> String {
    normalize_table_name(table, DEFAULT_SUFFIX)
}
