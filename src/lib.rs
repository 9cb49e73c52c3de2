//! Bank-ETL: a one-shot extract/transform/load job for bank market caps
//!
//! This crate scrapes the table of the world's largest banks, converts each
//! market capitalization into several currencies, writes the result to CSV
//! and SQLite, and runs a fixed set of read queries over the loaded table.

pub mod config;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod query;
pub mod storage;
pub mod transform;

use thiserror::Error;

/// Main error type for Bank-ETL operations
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} returned by {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Table structure not found: {0}")]
    StructureNotFound(String),

    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`EtlError`] values
///
/// Numeric parse failures never surface here: they are carried as missing
/// values on the affected record and the run continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    FetchFailure,
    StructureNotFound,
    MalformedRow,
    PersistenceFailure,
}

impl EtlError {
    /// Returns the error class this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Http { .. } | Self::HttpStatus { .. } => ErrorKind::FetchFailure,
            Self::StructureNotFound(_) => ErrorKind::StructureNotFound,
            Self::MalformedRow { .. } => ErrorKind::MalformedRow,
            Self::Csv(_) | Self::Database(_) | Self::InvalidTableName(_) | Self::Io(_) => {
                ErrorKind::PersistenceFailure
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Bank-ETL operations
pub type Result<T> = std::result::Result<T, EtlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{extract_records, ExtractedRow, HttpSource, PageSource};
pub use pipeline::{Pipeline, RunReport};
pub use storage::{BankStore, QueryResult, SqliteStore};
pub use transform::{transform, BankRecord, ExchangeRates};
