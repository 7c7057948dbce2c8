//! The `ReportWriter` trait implemented by export backends.

use fleet_sim::TrialReport;

use crate::OutputResult;

/// Trait implemented by results-export backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally by [`SweepOutputObserver`][crate::SweepOutputObserver]
/// and retrieved with `take_error`.
pub trait ReportWriter {
    /// Append one trial's row to the results table.
    fn write_row(&mut self, report: &TrialReport) -> OutputResult<()>;

    /// Flush and close the underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
