//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the BankStore trait.

use crate::config::is_valid_table_name;
use crate::storage::schema::{insert_sql, replace_table_sql};
use crate::storage::traits::BankStore;
use crate::storage::{QueryResult, QueryValue};
use crate::transform::BankRecord;
use crate::{EtlError, Result};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite storage backend
///
/// The connection is closed when the store is dropped.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;
        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}

impl BankStore for SqliteStore {
    fn replace_table(&mut self, table: &str, records: &[BankRecord]) -> Result<usize> {
        if !is_valid_table_name(table) {
            return Err(EtlError::InvalidTableName(table.to_string()));
        }

        let tx = self.conn.transaction()?;
        tx.execute_batch(&replace_table_sql(table))?;
        {
            let mut stmt = tx.prepare(&insert_sql(table))?;
            for record in records {
                stmt.execute(params![
                    record.name(),
                    record.mc_usd_billion(),
                    record.mc_gbp_billion(),
                    record.mc_eur_billion(),
                    record.mc_inr_billion(),
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!("Replaced table {} with {} rows", table, records.len());
        Ok(records.len())
    }

    fn query(&self, sql: &str) -> Result<QueryResult> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let column_count = columns.len();

        let rows = stmt
            .query_map([], |row| {
                (0..column_count)
                    .map(|i| row.get_ref(i).map(QueryValue::from))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(QueryResult { columns, rows })
    }
}
