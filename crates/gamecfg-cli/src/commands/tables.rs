//! Tables command - list discoverable tables.

use colored::Colorize;
use gamecfg::tables::BUILTIN_TABLES;

use super::RegistryOptions;

pub fn run(opts: &RegistryOptions, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = opts.open()?;
    let tables = registry.discover_tables()?;

    if json_output {
        let listing: Vec<_> = tables
            .iter()
            .map(|name| {
                serde_json::json!({
                    "table": name,
                    "path": registry.config().resource_path(name),
                    "builtin": BUILTIN_TABLES.contains(&name.as_str()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if tables.is_empty() {
        println!(
            "{} in {}",
            "No tables found".yellow(),
            opts.root.join(&registry.config().folder).display()
        );
        return Ok(());
    }

    println!("{} ({})", "Tables".cyan().bold(), tables.len());
    for name in &tables {
        let tag = if BUILTIN_TABLES.contains(&name.as_str()) {
            "builtin".green()
        } else {
            "custom".blue()
        };
        println!("  {:<24} {}", name.white(), tag);
    }

    Ok(())
}
