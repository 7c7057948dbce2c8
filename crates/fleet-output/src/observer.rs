//! `SweepOutputObserver<W>` — bridges `FleetObserver` to a `ReportWriter`.

use fleet_sim::{FleetObserver, TrialReport};

use crate::writer::ReportWriter;
use crate::{OutputError, OutputResult};

/// A [`FleetObserver`] that appends every finished trial to a
/// [`ReportWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `run_sweep` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SweepOutputObserver<W: ReportWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: ReportWriter> SweepOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after the sweep returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sweep).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ReportWriter> FleetObserver for SweepOutputObserver<W> {
    fn on_trial_end(&mut self, report: &TrialReport) {
        let result = self.writer.write_row(report);
        self.store_err(result);
    }

    fn on_sweep_end(&mut self, _trials: usize) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
