//! `fleet-output` — results export for the drone fleet simulator.
//!
//! One CSV backend writes the sweep results table: one row per trial, 43
//! columns (configuration plus ten metrics for each of the four outcome
//! categories).  The backend implements [`ReportWriter`] and is driven by
//! [`SweepOutputObserver`], which implements `fleet_sim::FleetObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fleet_output::{CsvReporter, SweepOutputObserver};
//!
//! let reporter = CsvReporter::new(Path::new("SweepResults.csv"))?;
//! let mut observer = SweepOutputObserver::new(reporter);
//! coordinator.run_sweep(&mut observer)?;
//! if let Some(e) = observer.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvReporter;
pub use error::{OutputError, OutputResult};
pub use observer::SweepOutputObserver;
pub use row::{COLUMN_COUNT, header, record};
pub use writer::ReportWriter;
