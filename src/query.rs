//! Query runner
//!
//! Executes the fixed read-only report queries against the loaded table.
//! The statements are built from the validated table name only; nothing
//! user-supplied reaches the SQL text.

use crate::storage::{BankStore, QueryResult};
use crate::Result;

/// The report statements issued after loading, in order:
/// full dump, average GBP market cap, first five names
pub fn report_queries(table: &str) -> [String; 3] {
    [
        format!("SELECT * from {}", table),
        format!("SELECT AVG(MC_GBP_Billion) FROM {}", table),
        format!("SELECT Name from {} LIMIT 5", table),
    ]
}

/// Runs one statement and returns its rows
pub fn run_query<B: BankStore + ?Sized>(store: &B, sql: &str) -> Result<QueryResult> {
    tracing::debug!("Running query: {}", sql);
    let result = store.query(sql)?;
    tracing::debug!("Query returned {} rows", result.rows.len());
    Ok(result)
}
