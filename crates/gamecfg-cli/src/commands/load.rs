//! Load command - load tables and report diagnostics.

use colored::Colorize;
use gamecfg::LoadReport;

use super::RegistryOptions;

pub fn run(
    opts: &RegistryOptions,
    table: Option<String>,
    json_output: bool,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = opts.open()?;

    let results = match table {
        Some(name) => {
            let result = registry.load_table(&name);
            std::iter::once((name, result)).collect()
        }
        None => registry.load_all()?,
    };

    let failed = results.values().filter(|r| r.is_err()).count();

    if json_output {
        let output: serde_json::Map<String, serde_json::Value> = results
            .iter()
            .map(|(name, result)| {
                let value = match result {
                    Ok(report) => serde_json::to_value(report)?,
                    Err(e) => serde_json::json!({ "error": e.to_string(), "kind": e.kind() }),
                };
                Ok((name.clone(), value))
            })
            .collect::<Result<_, serde_json::Error>>()?;
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for (name, result) in &results {
            match result {
                Ok(report) => print_report(report, verbose > 0),
                Err(e) => println!("{} {}: {}", "✗".red().bold(), name.white().bold(), e.to_string().red()),
            }
        }
        println!();
        println!(
            "Loaded {} of {} tables",
            (results.len() - failed).to_string().green().bold(),
            results.len()
        );
    }

    if failed > 0 {
        return Err(format!("{} table(s) failed to load", failed).into());
    }
    Ok(())
}

fn print_report(report: &LoadReport, details: bool) {
    let mark = if report.is_clean() {
        "✓".green().bold()
    } else {
        "!".yellow().bold()
    };
    println!(
        "{} {} {} rows ({})",
        mark,
        report.table.white().bold(),
        report.rows,
        report.binding
    );

    if report.malformed {
        println!("    {}", "header block incomplete, table cached empty".red());
    }
    if report.coercion_failures() > 0 {
        println!(
            "    {} cell(s) defaulted after failed coercion",
            report.coercion_failures().to_string().yellow()
        );
        if details {
            for note in &report.notes {
                println!("      {}", note);
            }
        }
    }
    if report.unterminated_quotes > 0 {
        println!(
            "    {} line(s) with unterminated quotes",
            report.unterminated_quotes.to_string().yellow()
        );
    }
    if !report.fallback_fields.is_empty() {
        println!(
            "    unknown type tokens read as text: {}",
            report.fallback_fields.join(", ").yellow()
        );
    }
    if !report.unmatched_columns.is_empty() {
        println!(
            "    columns without a matching field: {}",
            report.unmatched_columns.join(", ").yellow()
        );
    }
}
