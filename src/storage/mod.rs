//! Storage module for the loaded bank table
//!
//! This module handles all database operations for the job:
//! - Drop-and-recreate of the target table
//! - Bulk insert of the transformed records
//! - Read-only queries returning typed rows

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::BankStore;

use rusqlite::types::ValueRef;
use std::path::Path;

/// Opens the database file for a run
pub fn open_store(path: &Path) -> crate::Result<SqliteStore> {
    SqliteStore::open(path)
}

/// A single cell returned by a query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl QueryValue {
    /// Returns the value as a float if it is numeric
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as text if it is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<ValueRef<'_>> for QueryValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(v) => Self::Integer(v),
            ValueRef::Real(v) => Self::Real(v),
            ValueRef::Text(bytes) => Self::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => Self::Blob(bytes.to_vec()),
        }
    }
}

/// Column names and rows produced by a query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<QueryValue>>,
}

impl QueryResult {
    /// Returns the first cell of the first row, if any
    ///
    /// Handy for aggregate queries that yield a single value.
    pub fn scalar(&self) -> Option<&QueryValue> {
        self.rows.first().and_then(|row| row.first())
    }

    /// Returns every value in the named column
    pub fn column(&self, name: &str) -> Option<Vec<&QueryValue>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }
}
