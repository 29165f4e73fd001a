//! Show command - print a table's schema and records.

use colored::Colorize;
use gamecfg::Record;

use super::{RegistryOptions, parse_id};

pub fn run(
    opts: &RegistryOptions,
    table: String,
    id: Option<String>,
    limit: usize,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = opts.open()?;
    registry.load_table(&table)?;

    let loaded = registry
        .table(&table)
        .ok_or_else(|| format!("Table '{}' was not cached after loading", table))?;

    if let Some(raw) = id {
        let record = registry
            .get(&table, parse_id(&raw))
            .ok_or_else(|| format!("No record with id '{}' in {}", raw, table))?;
        if json_output {
            println!("{}", serde_json::to_string_pretty(&record)?);
        } else {
            print_record(&record);
        }
        return Ok(());
    }

    if json_output {
        let output = serde_json::json!({
            "info": loaded.info(),
            "fields": loaded.schema.fields,
            "records": loaded.records.iter().take(limit).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let info = loaded.info();
    println!("{} {}", "Table".cyan().bold(), info.name.white().bold());
    println!("  Source:  {}", info.path);
    println!("  Binding: {}", info.binding);
    println!("  Rows:    {}", info.rows);
    println!("  Hash:    {}", info.hash.dimmed());
    println!();

    println!("{}", "Fields:".yellow().bold());
    for field in &loaded.schema.fields {
        println!(
            "  {:<20} {:<12} {}",
            field.field_name.white(),
            field.type_token.cyan(),
            field.display_name.dimmed()
        );
    }
    println!();

    println!("{}", "Records:".yellow().bold());
    for record in loaded.records.iter().take(limit) {
        let cells: Vec<String> = record.iter().map(|(_, v)| v.to_string()).collect();
        println!("  {}", cells.join(" | "));
    }
    if info.rows > limit {
        println!("  {}", format!("... {} more", info.rows - limit).dimmed());
    }

    Ok(())
}

fn print_record(record: &Record) {
    for (name, value) in record.iter() {
        println!("  {:<20} {}", name.white(), value);
    }
}
