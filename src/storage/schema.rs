//! SQL text for the bank table
//!
//! Table names are spliced into the statements, so callers must check them
//! with `is_valid_table_name` first.

use crate::transform::COLUMNS;

/// SQLite column types, aligned with `COLUMNS`
const COLUMN_TYPES: [&str; 5] = ["TEXT", "REAL", "REAL", "REAL", "REAL"];

/// Drops the table if present and recreates it empty
pub fn replace_table_sql(table: &str) -> String {
    let columns = COLUMNS
        .iter()
        .zip(COLUMN_TYPES.iter())
        .map(|(name, ty)| format!("    {} {}", name, ty))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "DROP TABLE IF EXISTS {table};\nCREATE TABLE {table} (\n{columns}\n);",
        table = table,
        columns = columns
    )
}

/// Parameterized insert of one record
pub fn insert_sql(table: &str) -> String {
    let placeholders = (1..=COLUMNS.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        COLUMNS.join(", "),
        placeholders
    )
}
