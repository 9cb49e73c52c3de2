//! Append-only progress log
//!
//! Each stage boundary adds one `<timestamp> : <message>` line to a text
//! file. The file is opened per call in append mode and never truncated.

use crate::Result;
use chrono::{Local, NaiveDateTime};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Year-MonthAbbrev-Day-Hour:Minute:Second, e.g. `2023-Sep-08-09:16:35`
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Formats a single log line (without the trailing newline)
pub fn format_line(timestamp: NaiveDateTime, message: &str) -> String {
    format!("{} : {}", timestamp.format(TIMESTAMP_FORMAT), message)
}

/// Writer for the progress log file
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Appends `message` stamped with the current local time
    pub fn log(&self, message: &str) -> Result<()> {
        self.log_at(Local::now().naive_local(), message)
    }

    /// Appends `message` stamped with `timestamp`
    pub fn log_at(&self, timestamp: NaiveDateTime, message: &str) -> Result<()> {
        let line = format_line(timestamp, message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        file.flush()?;

        tracing::info!("{}", message);
        Ok(())
    }
}
