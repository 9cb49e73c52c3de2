//! ETL orchestration
//!
//! This module runs the job's stages strictly in sequence:
//! - Fetch the source page and extract the bank rows
//! - Convert market caps into every configured currency
//! - Write the CSV file, then replace the database table
//! - Run the report queries against the loaded table
//!
//! Every stage boundary is recorded in the progress log. A fatal error is
//! logged there as well before it is returned.

use crate::config::Config;
use crate::extract::{extract_records, HttpSource, PageSource};
use crate::output::write_csv;
use crate::progress::ProgressLog;
use crate::query::{report_queries, run_query};
use crate::storage::{open_store, BankStore, QueryResult};
use crate::transform::{transform, BankRecord, ExchangeRates};
use crate::Result;
use std::path::Path;

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Transformed records, in page order
    pub records: Vec<BankRecord>,

    /// Hex SHA-256 of the CSV bytes written
    pub csv_sha256: String,

    /// Rows written to the table
    pub rows_loaded: usize,

    /// Each report statement with its result, in execution order
    pub queries: Vec<(String, QueryResult)>,
}

impl RunReport {
    /// Number of records whose market cap could not be parsed
    pub fn missing_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_missing()).count()
    }
}

/// Main ETL orchestrator
pub struct Pipeline<S> {
    config: Config,
    source: S,
    rates: ExchangeRates,
    progress: ProgressLog,
}

impl Pipeline<HttpSource> {
    /// Creates a pipeline that fetches over HTTP
    pub fn from_config(config: Config) -> Result<Self> {
        let source = HttpSource::new(&config.source)?;
        Ok(Self::new(config, source))
    }
}

impl<S: PageSource> Pipeline<S> {
    /// Creates a pipeline reading pages from `source`
    pub fn new(config: Config, source: S) -> Self {
        let rates = ExchangeRates::from(config.rates);
        let progress = ProgressLog::new(&config.output.log_path);
        Self {
            config,
            source,
            rates,
            progress,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the job against the configured SQLite database file
    ///
    /// The connection is opened after the CSV is written and closed when
    /// the run returns.
    pub async fn run(&self) -> Result<RunReport> {
        let database_path = Path::new(&self.config.output.database_path);
        self.run_with(|| open_store(database_path)).await
    }

    /// Runs the job, opening the store with `connect` when the load stage
    /// is reached
    pub async fn run_with<B, F>(&self, connect: F) -> Result<RunReport>
    where
        B: BankStore,
        F: FnOnce() -> Result<B>,
    {
        match self.execute(connect).await {
            Ok(report) => Ok(report),
            Err(e) => {
                tracing::error!("ETL run aborted: {}", e);
                if let Err(log_err) = self.progress.log(&format!("ETL process failed: {}", e)) {
                    tracing::warn!("Could not record failure in progress log: {}", log_err);
                }
                Err(e)
            }
        }
    }

    async fn execute<B, F>(&self, connect: F) -> Result<RunReport>
    where
        B: BankStore,
        F: FnOnce() -> Result<B>,
    {
        let output = &self.config.output;

        self.progress
            .log("Preliminaries complete. Initiating ETL process")?;

        let page = self.source.fetch(&self.config.source.url).await?;
        let rows = extract_records(&page)?;
        tracing::info!("Extracted {} bank rows from {}", rows.len(), self.config.source.url);

        self.progress
            .log("Data extraction complete. Initiating Transformation process")?;

        let records = transform(&rows, &self.rates);
        let missing = records.iter().filter(|r| r.is_missing()).count();
        if missing > 0 {
            tracing::info!("{} of {} market caps were not numeric", missing, records.len());
        }

        self.progress
            .log("Data transformation complete. Initiating loading process")?;

        let csv_sha256 = write_csv(&records, Path::new(&output.csv_path), output.csv_index)?;
        tracing::info!("CSV written to {} (sha256 {})", output.csv_path, csv_sha256);

        self.progress.log("Data saved to CSV file")?;

        let mut store = connect()?;

        self.progress.log("SQL Connection initiated.")?;

        let rows_loaded = store.replace_table(&output.table_name, &records)?;

        self.progress
            .log("Data loaded to Database as table. Running the query")?;

        let mut queries = Vec::with_capacity(3);
        for sql in report_queries(&output.table_name) {
            let result = run_query(&store, &sql)?;
            queries.push((sql, result));
        }

        self.progress.log("Process Complete.")?;

        drop(store);

        Ok(RunReport {
            records,
            csv_sha256,
            rows_loaded,
            queries,
        })
    }
}
