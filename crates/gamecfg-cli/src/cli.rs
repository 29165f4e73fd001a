//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use gamecfg::ExportFormat;
use std::path::PathBuf;

/// gamecfg: schema-driven CSV configuration tables
#[derive(Parser)]
#[command(name = "gamecfg")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory containing the configuration folder
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Registry settings file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the tables found in the configuration folder
    Tables {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load tables and report coercion diagnostics
    Load {
        /// Load only this table (default: all discovered tables)
        #[arg(value_name = "TABLE")]
        table: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a table's schema and records
    Show {
        /// Table name, e.g. EnemyConfig
        #[arg(value_name = "TABLE")]
        table: String,

        /// Show only the record with this id
        #[arg(long)]
        id: Option<String>,

        /// Maximum number of records to print
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate Rust record types from table header blocks
    Generate {
        /// Generate only this table (default: all discovered tables)
        #[arg(value_name = "TABLE")]
        table: Option<String>,

        /// Write one file per table into this directory instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Export a loaded table to JSON or CSV
    Export {
        /// Table name
        #[arg(value_name = "TABLE")]
        table: String,

        /// Output path (default: <TABLE>.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
    },

    /// Load all tables and reload them when their files change
    Watch {
        /// Seconds between change checks
        #[arg(short, long, default_value = "2")]
        interval: u64,

        /// Stop after this many checks
        #[arg(long)]
        iterations: Option<usize>,
    },
}
