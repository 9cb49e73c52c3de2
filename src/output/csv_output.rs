//! CSV sink
//!
//! Writes the transformed records to a delimited file, replacing whatever
//! was there before. Missing figures become empty fields.

use crate::output::format_number;
use crate::transform::{BankRecord, COLUMNS};
use crate::Result;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Renders records as CSV bytes
///
/// # Arguments
///
/// * `records` - Records in output order
/// * `include_index` - Prefix each row with its 0-based position under an
///   empty header cell
pub fn render_csv(records: &[BankRecord], include_index: bool) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = Vec::with_capacity(COLUMNS.len() + 1);
    if include_index {
        header.push("");
    }
    header.extend(COLUMNS);
    writer.write_record(&header)?;

    for (index, record) in records.iter().enumerate() {
        let mut fields: Vec<String> = Vec::with_capacity(COLUMNS.len() + 1);
        if include_index {
            fields.push(index.to_string());
        }
        fields.push(record.name().to_string());
        fields.extend(
            record
                .figures()
                .into_iter()
                .map(|value| value.map(format_number).unwrap_or_default()),
        );
        writer.write_record(&fields)?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Writes records to `path`, overwriting any existing file
///
/// # Returns
///
/// The hex SHA-256 digest of the bytes written
pub fn write_csv(records: &[BankRecord], path: &Path, include_index: bool) -> Result<String> {
    let bytes = render_csv(records, include_index)?;
    std::fs::write(path, &bytes)?;

    let digest = hex::encode(Sha256::digest(&bytes));
    tracing::debug!(
        "Wrote {} records to {} (sha256 {})",
        records.len(),
        path.display(),
        digest
    );
    Ok(digest)
}
