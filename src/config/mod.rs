//! Configuration module for Bank-ETL
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; an absent file or section falls back to the defaults
//! the job was originally written against.
//!
//! # Example
//!
//! ```no_run
//! use bank_etl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("bank-etl.toml")).unwrap();
//! println!("Loading into table: {}", config.output.table_name);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, RatesConfig, SourceConfig, DEFAULT_SOURCE_URL};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{is_valid_table_name, validate};
