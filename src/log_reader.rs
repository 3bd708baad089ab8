//! Event timestamp log parsing

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::error::ClipCamResult;
use crate::timefmt;

/// Reads the append-only timestamp log written by an external process.
#[derive(Debug, Clone)]
pub struct LogReader {
    path: PathBuf,
}

impl LogReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse every well-formed line into a timestamp, preserving file order.
    ///
    /// A missing log file yields an empty list. Malformed lines are skipped
    /// with a diagnostic, never aborting the read.
    pub fn read(&self) -> ClipCamResult<Vec<NaiveDateTime>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            match timefmt::parse_timestamp(&line) {
                Ok(entry) => entries.push(entry),
                Err(error) => warn!("Skipping invalid date line '{}': {}", line.trim(), error),
            }
        }
        Ok(entries)
    }
}
