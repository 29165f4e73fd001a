//! Generate command - render record types from header blocks.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use convert_case::{Case, Casing};

use super::RegistryOptions;

pub fn run(
    opts: &RegistryOptions,
    table: Option<String>,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = opts.open()?;

    let generated = match table {
        Some(name) => {
            let code = registry.preview(&name);
            std::iter::once((name, code)).collect()
        }
        None => registry.generate_all()?,
    };

    let mut failed = 0;
    for (name, result) in generated {
        let code = match result {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{} {}: {}", "✗".red().bold(), name, e);
                failed += 1;
                continue;
            }
        };

        match &out {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                let path = dir.join(format!("{}.rs", name.to_case(Case::Snake)));
                fs::write(&path, code)?;
                println!("{} {} -> {}", "✓".green().bold(), name.white(), path.display());
            }
            None => println!("{}", code),
        }
    }

    if failed > 0 {
        return Err(format!("{} table(s) could not be generated", failed).into());
    }
    Ok(())
}
