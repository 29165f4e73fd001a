//! Export command - write a loaded table to JSON or CSV.

use std::path::PathBuf;

use colored::Colorize;
use gamecfg::ExportFormat;

use super::RegistryOptions;

pub fn run(
    opts: &RegistryOptions,
    table: String,
    output: Option<PathBuf>,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = opts.open()?;
    let report = registry.load_table(&table)?;

    let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.{}", table, format.extension())));
    registry.export_table(&table, &output, format)?;

    println!(
        "{} Exported {} rows of {} to {}",
        "✓".green().bold(),
        report.rows,
        table.white().bold(),
        output.display()
    );
    Ok(())
}
