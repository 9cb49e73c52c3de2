//! Bank-ETL main entry point
//!
//! This is the command-line interface for the largest-banks ETL job.

use anyhow::Context;
use bank_etl::config::{load_config_with_hash, Config};
use bank_etl::output::print_query_result;
use bank_etl::Pipeline;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Bank-ETL: largest banks by market capitalization
///
/// Scrapes the bank ranking table, converts each market cap into GBP, EUR
/// and INR, writes the result to CSV and SQLite, and prints the report
/// queries.
#[derive(Parser, Debug)]
#[command(name = "bank-etl")]
#[command(version)]
#[command(about = "Largest banks ETL job", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would run without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_run(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bank_etl=info,warn"),
            1 => EnvFilter::new("bank_etl=debug,info"),
            2 => EnvFilter::new("bank_etl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Bank-ETL Dry Run ===\n");

    println!("Source:");
    println!("  URL: {}", config.source.url);
    println!("  Timeout: {}s", config.source.timeout_secs);
    println!("  User agent: {}", config.source.user_agent);

    println!("\nOutput:");
    println!("  CSV: {} (index column: {})", config.output.csv_path, config.output.csv_index);
    println!("  Database: {}", config.output.database_path);
    println!("  Table: {}", config.output.table_name);
    println!("  Progress log: {}", config.output.log_path);

    println!("\nExchange rates (per USD):");
    println!("  GBP: {}", config.rates.gbp);
    println!("  EUR: {}", config.rates.eur);
    println!("  INR: {}", config.rates.inr);

    println!("\n✓ Configuration is valid");
}

/// Handles the main ETL run
async fn handle_run(config: Config) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_config(config).context("failed to build HTTP client")?;

    match pipeline.run().await {
        Ok(report) => {
            for (sql, result) in &report.queries {
                print_query_result(sql, result);
            }
            tracing::info!(
                "ETL completed: {} records loaded into {}",
                report.rows_loaded,
                pipeline.config().output.table_name
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("ETL failed ({:?}): {}", e.kind(), e);
            Err(e.into())
        }
    }
}
