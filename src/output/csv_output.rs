//! CSV record sink

use crate::extract::{AdvisorRecord, COLUMNS};
use crate::output::traits::{OutputResult, RecordSink, WriteStatus};
use std::path::{Path, PathBuf};

/// Writes records to a CSV file, header first
#[derive(Debug, Clone)]
pub struct CsvOutput {
    path: PathBuf,
}

impl CsvOutput {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecordSink for CsvOutput {
    fn write_records(&self, records: &[AdvisorRecord]) -> OutputResult<WriteStatus> {
        if records.is_empty() {
            tracing::warn!("No advisor records to write; {} left untouched", self.path.display());
            return Ok(WriteStatus::Skipped);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let absolute = std::env::current_dir()
            .map(|cwd| cwd.join(&self.path))
            .unwrap_or_else(|_| self.path.clone());
        tracing::info!("Preparing to write CSV to {}", absolute.display());

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(COLUMNS)?;
        for record in records {
            writer.write_record(record.to_row())?;
        }
        writer.flush()?;

        Ok(WriteStatus::Written {
            path: absolute,
            rows: records.len(),
        })
    }
}
