//! CSV export backend.
//!
//! Writes one results file with the 43-column schema of [`crate::row`].
//! The inner `csv::Writer` flushes on drop, so rows written before an
//! abnormal termination still reach disk.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use fleet_sim::TrialReport;

use crate::row;
use crate::writer::ReportWriter;
use crate::OutputResult;

/// Writes sweep results to a single CSV file.
pub struct CsvReporter {
    rows:     Writer<File>,
    finished: bool,
}

impl CsvReporter {
    /// Create (or truncate) the results file at `path` and write the header.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut rows = Writer::from_path(path)?;
        rows.write_record(row::header())?;
        Ok(Self { rows, finished: false })
    }
}

impl ReportWriter for CsvReporter {
    fn write_row(&mut self, report: &TrialReport) -> OutputResult<()> {
        self.rows.write_record(row::record(report))?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.rows.flush()?;
        Ok(())
    }
}
