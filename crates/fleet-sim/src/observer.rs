//! Sweep observer trait for progress reporting and data collection.

use fleet_core::Tick;
use fleet_drone::DroneEvent;

use crate::report::{TrialConfig, TrialReport};

/// Callbacks invoked by [`FleetCoordinator::run_sweep`][crate::FleetCoordinator::run_sweep]
/// at key points of the sweep.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Warnings (demand shortfalls, dropped
/// truck slots, aborted trials) flow through `on_warning` — the coordinator
/// itself never prints.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl FleetObserver for ProgressPrinter {
///     fn on_trial_start(&mut self, index: usize, total: usize, _config: &TrialConfig) {
///         println!("trial {index}/{total}");
///     }
/// }
/// ```
pub trait FleetObserver {
    /// Called before a trial begins.  `index` is 1-based.
    fn on_trial_start(&mut self, _index: usize, _total: usize, _config: &TrialConfig) {}

    /// Called for every drone event, in drone-ID order within a tick.
    fn on_event(&mut self, _tick: Tick, _event: &DroneEvent) {}

    /// Called for non-fatal anomalies: shortfalls, dropped slots, aborts.
    fn on_warning(&mut self, _message: &str) {}

    /// Called once per trial after teardown, with its finished report.
    fn on_trial_end(&mut self, _report: &TrialReport) {}

    /// Called after the last trial.  `trials` is the number of reports.
    fn on_sweep_end(&mut self, _trials: usize) {}
}

/// A [`FleetObserver`] that does nothing.  Use when you need to call
/// `run_sweep` but don't want callbacks.
pub struct NoopObserver;

impl FleetObserver for NoopObserver {}
