//! sqlcue CLI - SQL completion resolver

mod args;
mod config;
mod output;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use sqlcue_core::metadata::TimeoutClient;
use sqlcue_core::{
    quote_identifier, Completer, CompleterOptions, InMemoryCatalog, ParseResult, SqlDialect,
    SqlFunctions,
};
use tracing::{debug, Level};

use crate::args::{Args, Command};
use crate::config::Config;
use crate::output::{print_catalog, OutputFormatter};

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Complete {
            parse_result,
            catalog,
            dialect,
            database,
            timeout_ms,
            format,
            limit,
        } => {
            let config = Config::resolve(catalog.config.as_deref())?
                .merge_catalog_args(&catalog)
                .merge_with_args(&dialect, &database, timeout_ms, &format);

            let options = completer_options(&config)?;
            let snapshot = load_catalog(&config.catalog_files()?)?;

            let content = fs::read_to_string(&parse_result).into_diagnostic()?;
            let parse_result: ParseResult = serde_json::from_str(&content).into_diagnostic()?;

            let client = TimeoutClient::new(snapshot, options.timeout);
            let functions = SqlFunctions::new();
            let completer = Completer::new(&client, &functions).with_options(options);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .into_diagnostic()?;
            let completions = runtime.block_on(completer.complete(&parse_result));

            OutputFormatter::new(config.output_format(), limit).print_completions(&completions)
        }

        Command::Quote { words, dialect } => {
            let dialect: SqlDialect = dialect.parse().map_err(|e: String| miette::miette!(e))?;
            for word in &words {
                println!("{}", quote_identifier(word, dialect));
            }
            Ok(())
        }

        Command::Catalog { catalog } => {
            let config = Config::resolve(catalog.config.as_deref())?.merge_catalog_args(&catalog);
            let files = config.catalog_files()?;
            if files.is_empty() {
                miette::bail!(
                    "No catalog files specified. Use --catalog, --catalog-dir, or configure in sqlcue.toml"
                );
            }
            print_catalog(&load_catalog(&files)?);
            Ok(())
        }
    }
}

fn completer_options(config: &Config) -> Result<CompleterOptions> {
    let mut options = CompleterOptions::default();
    if let Some(dialect) = &config.dialect {
        options = options.with_dialect(dialect.parse().map_err(|e: String| miette::miette!(e))?);
    }
    if let Some(database) = &config.database {
        options = options.with_default_database(database);
    }
    if let Some(timeout_ms) = config.timeout_ms {
        options = options.with_timeout(Duration::from_millis(timeout_ms));
    }
    Ok(options)
}

/// Load and merge catalog snapshots; without any, an empty catalog with the
/// default database
fn load_catalog(files: &[PathBuf]) -> Result<InMemoryCatalog> {
    let mut catalog = InMemoryCatalog::new();
    for file in files {
        debug!(file = %file.display(), "loading catalog snapshot");
        let content = fs::read_to_string(file).into_diagnostic()?;
        catalog.merge(InMemoryCatalog::from_json(&content)?);
    }
    Ok(catalog)
}
