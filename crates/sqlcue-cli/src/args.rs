//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sqlcue")]
#[command(author, version, about = "SQL completion resolver")]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Catalog snapshot sources shared by the commands that load one
#[derive(clap::Args, Default)]
pub struct CatalogArgs {
    /// Catalog snapshot files (JSON)
    #[arg(short, long = "catalog", value_name = "FILE")]
    pub catalog: Vec<PathBuf>,

    /// Directory searched recursively for catalog snapshots
    #[arg(long = "catalog-dir", value_name = "DIR")]
    pub catalog_dir: Option<PathBuf>,

    /// Path to a sqlcue.toml configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a parse result into ranked completion candidates
    Complete {
        /// Parse result file (JSON) produced by the SQL parser
        parse_result: PathBuf,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// SQL dialect (hive, impala, generic)
        #[arg(short, long)]
        dialect: Option<String>,

        /// Database used when the parse result names none
        #[arg(long)]
        database: Option<String>,

        /// Per-fetch timeout in milliseconds
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Show at most this many candidates
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Quote identifiers the way completions insert them
    Quote {
        /// Identifiers to quote
        #[arg(required = true)]
        words: Vec<String>,

        /// SQL dialect (hive, impala, generic)
        #[arg(short, long, default_value = "hive")]
        dialect: String,
    },

    /// Display a loaded catalog snapshot
    Catalog {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Aligned table for terminals
    #[default]
    Human,
    /// JSON output
    Json,
}
