//! Storage trait
//!
//! This module defines the interface the pipeline uses to persist records
//! and read them back.

use crate::storage::QueryResult;
use crate::transform::BankRecord;
use crate::Result;

/// Trait for table storage backends
pub trait BankStore {
    /// Replaces `table` with exactly `records`, in order
    ///
    /// Any previous table of that name is dropped first, so the result does
    /// not depend on what an earlier run left behind.
    ///
    /// # Returns
    ///
    /// The number of rows written
    fn replace_table(&mut self, table: &str, records: &[BankRecord]) -> Result<usize>;

    /// Runs a read-only statement and collects every row
    fn query(&self, sql: &str) -> Result<QueryResult>;
}
