//! gamecfg CLI - inspect, load, export and generate configuration tables.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(&logging::LogConfig::from_verbosity(cli.verbose));

    let opts = commands::RegistryOptions {
        root: cli.root,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::Tables { json } => commands::tables::run(&opts, json),

        Commands::Load { table, json } => commands::load::run(&opts, table, json, cli.verbose),

        Commands::Show {
            table,
            id,
            limit,
            json,
        } => commands::show::run(&opts, table, id, limit, json),

        Commands::Generate { table, out } => commands::generate::run(&opts, table, out),

        Commands::Export {
            table,
            output,
            format,
        } => commands::export::run(&opts, table, output, format),

        Commands::Watch {
            interval,
            iterations,
        } => commands::watch::run(&opts, interval, iterations),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
