//! Output sink trait and types
//!
//! This module defines the trait interface for record sinks and the errors
//! they report.

use crate::extract::AdvisorRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// What a sink did with a batch of records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStatus {
    /// Records were written to `path`
    Written { path: PathBuf, rows: usize },

    /// Nothing to write; no file was touched
    Skipped,
}

/// Trait for record sinks
///
/// A sink receives the full, ordered record list once at the end of a run.
pub trait RecordSink {
    /// Writes all records
    ///
    /// An empty slice must not create or truncate any file.
    fn write_records(&self, records: &[AdvisorRecord]) -> OutputResult<WriteStatus>;
}
