//! HTML parser for the bank table
//!
//! The page convention is: the first `<tbody>` holds the ranking, each data
//! row has the rank, a name cell and the market cap cell. The name cell
//! starts with a flag icon link, so the bank's name is the `title` of the
//! second anchor, not the first.

use crate::EtlError;
use scraper::{ElementRef, Html, Selector};

/// Minimum number of `<td>` cells a data row must carry
const MIN_CELLS: usize = 3;
const NAME_CELL: usize = 1;
const MARKET_CAP_CELL: usize = 2;

/// A table row as it appears on the page, before numeric coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRow {
    /// Bank display name
    pub name: String,

    /// Market cap in billions of USD, exactly as printed (e.g. "1,234.5")
    pub market_cap_usd: String,
}

/// Parses page markup into bank rows, in document order
///
/// # Rules
///
/// - Only the first `<tbody>` written in the markup is read; table bodies
///   the HTML parser infers for bare `<tr>` children do not count
/// - Rows without any `<td>` (header or separator rows) are skipped
/// - A data row with fewer than three cells, or fewer than two anchors in the
///   name cell, is a `MalformedRow` error; rows are never guessed at
///
/// # Returns
///
/// * `Ok(Vec<ExtractedRow>)` - Rows in the order they appear on the page
/// * `Err(EtlError::StructureNotFound)` - The markup has no `<tbody>` tag
/// * `Err(EtlError::MalformedRow)` - A data row did not have the expected shape
///
/// # Example
///
/// ```
/// use bank_etl::extract_records;
///
/// let html = r#"<table><tbody>
///     <tr><th>Rank</th><th>Bank</th><th>Market cap</th></tr>
///     <tr><td>1</td><td><a href="/flag"></a><a href="/jpm" title="JPMorgan Chase">JPMorgan</a></td><td>432.92</td></tr>
/// </tbody></table>"#;
/// let rows = extract_records(html).unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].name, "JPMorgan Chase");
/// assert_eq!(rows[0].market_cap_usd, "432.92");
/// ```
pub fn extract_records(html: &str) -> Result<Vec<ExtractedRow>, EtlError> {
    let start = find_tbody_tag(html)
        .ok_or_else(|| EtlError::StructureNotFound("no <tbody> element in document".to_string()))?;

    // Parsing from the tag onwards leaves no earlier table for html5ever to
    // give an implied body.
    let document = Html::parse_document(&format!("<table>{}", &html[start..]));

    let tbody_selector = selector("tbody")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;
    let anchor_selector = selector("a")?;

    let tbody = document
        .select(&tbody_selector)
        .next()
        .ok_or_else(|| EtlError::StructureNotFound("no <tbody> element in document".to_string()))?;

    let mut records = Vec::new();

    for (index, row) in tbody.select(&row_selector).enumerate() {
        let row_number = index + 1;
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();

        if cells.is_empty() {
            continue;
        }

        if cells.len() < MIN_CELLS {
            return Err(EtlError::MalformedRow {
                row: row_number,
                reason: format!(
                    "expected at least {} cells, found {}",
                    MIN_CELLS,
                    cells.len()
                ),
            });
        }

        let anchors: Vec<ElementRef> = cells[NAME_CELL].select(&anchor_selector).collect();
        let name_link = anchors.get(1).ok_or_else(|| EtlError::MalformedRow {
            row: row_number,
            reason: format!(
                "name cell has {} anchor(s), expected at least 2",
                anchors.len()
            ),
        })?;

        let name = match name_link.value().attr("title") {
            Some(title) => title.to_string(),
            None => {
                tracing::warn!("Row {} name link has no title attribute", row_number);
                String::new()
            }
        };

        records.push(ExtractedRow {
            name,
            market_cap_usd: stripped_text(cells[MARKET_CAP_CELL]),
        });
    }

    tracing::debug!("Extracted {} rows", records.len());
    Ok(records)
}

/// Byte offset of the first `<tbody` start tag in the raw markup, any case
fn find_tbody_tag(html: &str) -> Option<usize> {
    const TAG: &[u8] = b"<tbody";

    html.as_bytes()
        .windows(TAG.len() + 1)
        .position(|window| {
            window[..TAG.len()].eq_ignore_ascii_case(TAG)
                && matches!(window[TAG.len()], b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
        })
}

/// Concatenates an element's text fragments, each trimmed of whitespace
fn stripped_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect()
}

fn selector(css: &str) -> Result<Selector, EtlError> {
    Selector::parse(css)
        .map_err(|_| EtlError::StructureNotFound(format!("invalid selector '{}'", css)))
}
