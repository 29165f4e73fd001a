//! Rust source rendering for table schemas.

use std::collections::{BTreeSet, HashSet};
use std::fmt::Write;

use convert_case::{Case, Casing};
use once_cell::sync::Lazy;
use regex::Regex;

use super::generator::class_name_for;
use crate::schema::{DeclaredType, TableSchema};
use crate::tables;

static IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
static NON_IDENT_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

// Cannot be written as raw identifiers.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Render a record type for `schema` as Rust source.
///
/// The output declares a struct with one public field per schema field in
/// schema order, a [`ConfigRecord`](crate::ConfigRecord) impl that builds
/// its [`TypeDescriptor`](crate::TypeDescriptor), and a `Display` impl of the
/// form `Name(field=value, ...)`. Built-in enums are imported from
/// `gamecfg::tables`; other enums are expected in the parent module.
pub fn render_definition(schema: &TableSchema) -> String {
    let type_name = sanitize_ident(&class_name_for(&schema.name), "Table");
    let idents = field_idents(schema);
    let mut out = String::new();

    let _ = writeln!(out, "//! `{}` record type generated by gamecfg.", schema.name);
    out.push('\n');
    out.push_str("use std::fmt;\n\n");

    let (builtin, external): (BTreeSet<&str>, BTreeSet<&str>) = schema
        .fields
        .iter()
        .filter_map(|f| f.declared_type.as_enum())
        .map(|e| e.name.as_str())
        .partition(|name| tables::builtin_enums().iter().any(|b| b.name == *name));

    if !builtin.is_empty() {
        let _ = writeln!(out, "use gamecfg::tables::{{{}}};", join(&builtin));
    }
    let _ = writeln!(out, "use gamecfg::{{ConfigRecord, TypeDescriptor}};");
    out.push_str("use serde::{Deserialize, Serialize};\n");
    if !external.is_empty() {
        let _ = writeln!(out, "\nuse super::{{{}}};", join(&external));
    }
    out.push('\n');

    // Struct
    out.push_str("#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]\n");
    let _ = writeln!(out, "pub struct {type_name} {{");
    for (field, ident) in schema.fields.iter().zip(&idents) {
        if !field.display_name.is_empty() {
            let _ = writeln!(out, "    /// {}", field.display_name);
        }
        if unraw(ident) != field.field_name {
            let _ = writeln!(out, "    #[serde(rename = {:?})]", field.field_name);
        }
        let _ = writeln!(out, "    pub {ident}: {},", rust_type(&field.declared_type));
    }
    out.push_str("}\n\n");

    // ConfigRecord
    let _ = writeln!(out, "impl ConfigRecord for {type_name} {{");
    let _ = writeln!(out, "    const TABLE: &'static str = {:?};", schema.name);
    out.push('\n');
    out.push_str("    fn descriptor() -> TypeDescriptor<Self> {\n");
    out.push_str("        TypeDescriptor::builder(Self::TABLE)\n");
    for (field, ident) in schema.fields.iter().zip(&idents) {
        let _ = writeln!(
            out,
            "            .field({:?}, {:?}, |r: &mut Self, v| r.{ident} = v)",
            field.field_name, field.display_name
        );
    }
    if let Some(id) = schema.resolve_id_field("id") {
        let _ = writeln!(out, "            .id_field({id:?})");
    }
    out.push_str("            .build()\n");
    out.push_str("    }\n}\n\n");

    // Display
    let template = schema
        .fields
        .iter()
        .map(|f| format!("{}={{}}", escape_braces(&f.field_name)))
        .collect::<Vec<_>>()
        .join(", ");
    let template = format!("{}({template})", escape_braces(&schema.name));

    let _ = writeln!(out, "impl fmt::Display for {type_name} {{");
    out.push_str("    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {\n");
    if idents.is_empty() {
        let _ = writeln!(out, "        f.write_str({:?})", format!("{}()", schema.name));
    } else {
        out.push_str("        write!(\n");
        out.push_str("            f,\n");
        let _ = writeln!(out, "            {template:?},");
        for ident in &idents {
            let _ = writeln!(out, "            self.{ident},");
        }
        out.push_str("        )\n");
    }
    out.push_str("    }\n}\n");

    out
}

fn rust_type(declared: &DeclaredType) -> String {
    match declared {
        DeclaredType::Enum(e) => sanitize_ident(&e.name, "Enum"),
        other => other.rust_type().to_string(),
    }
}

/// Unique snake_case identifiers for every field, in schema order.
fn field_idents(schema: &TableSchema) -> Vec<String> {
    let mut seen = HashSet::new();
    schema
        .fields
        .iter()
        .map(|f| {
            let base = sanitize_ident(&f.field_name.to_case(Case::Snake), "field");
            let ident = if seen.contains(&base) {
                format!("{}_{}", unraw(&base), f.position)
            } else {
                base
            };
            seen.insert(ident.clone());
            ident
        })
        .collect()
}

/// Turn arbitrary text into a usable identifier.
fn sanitize_ident(raw: &str, fallback: &str) -> String {
    let mut ident = if IDENT.is_match(raw) {
        raw.to_string()
    } else {
        NON_IDENT_CHARS.replace_all(raw, "_").trim_matches('_').to_string()
    };

    if ident.is_empty() {
        ident = fallback.to_string();
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    if RESERVED.contains(&ident.as_str()) {
        ident.push('_');
    } else if KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    ident
}

fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

fn join(names: &BTreeSet<&str>) -> String {
    names.iter().copied().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnumDescriptor, FieldSchema};

    fn enemy_schema() -> TableSchema {
        TableSchema::with_fields(
            "EnemyConfig",
            vec![
                FieldSchema::new(0, "id", DeclaredType::Int).with_display_name("Enemy ID"),
                FieldSchema::new(1, "attackDamage", DeclaredType::Float),
                FieldSchema::new(
                    2,
                    "enemyType",
                    DeclaredType::Enum(EnumDescriptor::new("EnemyType", ["Normal"])),
                ),
                FieldSchema::new(3, "type", DeclaredType::Text),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_render_struct_and_impls() {
        let code = render_definition(&enemy_schema());

        assert!(code.contains("use gamecfg::tables::{EnemyType};"));
        assert!(code.contains("pub struct EnemyConfig {"));
        assert!(code.contains("    /// Enemy ID\n    pub id: i32,"));
        assert!(code.contains("#[serde(rename = \"attackDamage\")]\n    pub attack_damage: f32,"));
        assert!(code.contains("pub enemy_type: EnemyType,"));
        assert!(code.contains("pub r#type: String,"));
        assert!(code.contains(".field(\"attackDamage\", \"\", |r: &mut Self, v| r.attack_damage = v)"));
        assert!(code.contains(".id_field(\"id\")"));
        assert!(code.contains("\"EnemyConfig(id={}, attackDamage={}, enemyType={}, type={})\""));
        assert!(code.contains("self.r#type,"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let schema = enemy_schema();
        assert_eq!(render_definition(&schema), render_definition(&schema));
    }

    #[test]
    fn test_identifier_sanitizing() {
        assert_eq!(sanitize_ident("max hp", "field"), "max_hp");
        assert_eq!(sanitize_ident("2nd", "field"), "_2nd");
        assert_eq!(sanitize_ident("self", "field"), "self_");
        assert_eq!(sanitize_ident("---", "field"), "field");
        assert_eq!(sanitize_ident("match", "field"), "r#match");
    }

    #[test]
    fn test_colliding_idents_get_position_suffix() {
        let schema = TableSchema::with_fields(
            "DropConfig",
            vec![
                FieldSchema::new(0, "dropRate", DeclaredType::Float),
                FieldSchema::new(1, "drop_rate", DeclaredType::Float),
            ],
        )
        .unwrap();
        assert_eq!(field_idents(&schema), vec!["drop_rate", "drop_rate_1"]);
    }

    #[test]
    fn test_external_enum_imported_from_parent() {
        let schema = TableSchema::with_fields(
            "SpellConfig",
            vec![FieldSchema::new(
                0,
                "element",
                DeclaredType::Enum(EnumDescriptor::new("Element", ["Fire"])),
            )],
        )
        .unwrap();
        let code = render_definition(&schema);
        assert!(code.contains("use super::{Element};"));
        assert!(!code.contains("gamecfg::tables"));
    }
}
