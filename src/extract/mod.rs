//! Extract stage: fetching the source page and pulling bank rows out of it
//!
//! This module contains:
//! - The HTTP fetcher and the `PageSource` abstraction over it
//! - The HTML table parser that turns markup into ordered rows

mod fetcher;
mod parser;

pub use fetcher::{build_http_client, fetch_page, HttpSource, PageSource};
pub use parser::{extract_records, ExtractedRow};
