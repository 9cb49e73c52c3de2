//! Output module for the job's file and console results
//!
//! This module handles:
//! - Writing the record set to CSV
//! - Rendering query results as text tables

mod csv_output;
mod table;

pub use csv_output::{render_csv, write_csv};
pub use table::{format_query_result, print_query_result};

/// Formats a figure in shortest round-trip form, always with a decimal point
///
/// `800.0` stays `800.0` and `1234.5` stays `1234.5`. Very large and very
/// small magnitudes are written out in positional notation, never with an
/// exponent.
pub fn format_number(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}
