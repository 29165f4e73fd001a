//! Watch command - keep tables loaded, reload them on change and pick up new ones.

use std::thread;
use std::time::Duration;

use colored::Colorize;
use gamecfg::RegistryEvent;

use super::RegistryOptions;

pub fn run(
    opts: &RegistryOptions,
    interval: u64,
    iterations: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = opts.open()?;
    registry.subscribe(print_event);

    let results = registry.load_all()?;
    println!(
        "{} {} tables, checking every {}s",
        "Watching".cyan().bold(),
        results.len(),
        interval
    );

    let mut checks = 0;
    while iterations.is_none_or(|max| checks < max) {
        thread::sleep(Duration::from_secs(interval));
        registry.poll_changes();
        if let Err(e) = registry.load_new_tables() {
            eprintln!("{} {}", "Discovery failed:".red().bold(), e);
        }
        checks += 1;
    }

    Ok(())
}

fn print_event(event: &RegistryEvent) {
    match event {
        RegistryEvent::Loaded { table, rows, replaced } => {
            let verb = if *replaced { "reloaded" } else { "loaded" };
            println!("{} {} {} ({} rows)", "✓".green().bold(), table.white().bold(), verb, rows);
        }
        RegistryEvent::LoadFailed { table, error, .. } => {
            println!("{} {} {}", "✗".red().bold(), table.white().bold(), error.red());
        }
    }
}
