//! Plain-text rendering of query results
//!
//! Rows are prefixed with their 0-based position and columns are padded to
//! a common width, numbers right-aligned and text left-aligned.

use crate::output::format_number;
use crate::storage::{QueryResult, QueryValue};

fn render_value(value: &QueryValue) -> String {
    match value {
        QueryValue::Null => "NULL".to_string(),
        QueryValue::Integer(v) => v.to_string(),
        QueryValue::Real(v) => format_number(*v),
        QueryValue::Text(s) => s.clone(),
        QueryValue::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

/// Formats a query result as an aligned text table
pub fn format_query_result(result: &QueryResult) -> String {
    if result.rows.is_empty() {
        return format!("Empty result\nColumns: [{}]\n", result.columns.join(", "));
    }

    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(render_value).collect())
        .collect();

    let index_width = (result.rows.len() - 1).to_string().len();
    let widths: Vec<usize> = result
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    out.push_str(&" ".repeat(index_width));
    for (name, width) in result.columns.iter().zip(&widths) {
        out.push_str(&format!("  {:>width$}", name, width = *width));
    }
    out.push('\n');

    for (index, (row, rendered)) in result.rows.iter().zip(&cells).enumerate() {
        out.push_str(&format!("{:<width$}", index, width = index_width));
        for ((value, cell), width) in row.iter().zip(rendered).zip(&widths) {
            match value {
                QueryValue::Text(_) => out.push_str(&format!("  {:<width$}", cell, width = *width)),
                _ => out.push_str(&format!("  {:>width$}", cell, width = *width)),
            }
        }
        out.push('\n');
    }

    out
}

/// Prints a statement followed by its result to stdout
pub fn print_query_result(sql: &str, result: &QueryResult) {
    println!("{}", sql);
    print!("{}", format_query_result(result));
}
