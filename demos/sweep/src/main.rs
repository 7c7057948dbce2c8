//! sweep — smallest end-to-end run of the drone fleet simulator.
//!
//! Sweeps both truck-placement methods over a small synthetic city (an 8×8
//! grid of building obstacles) and exports one metrics row per trial to
//! `SweepResults.csv`.  The full experiment scale is 100–300 demand points
//! and 20–40 trucks for 15 repetitions; bump the constants below to
//! reproduce it.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use fleet_core::SimParams;
use fleet_output::{CsvReporter, ReportWriter, SweepOutputObserver};
use fleet_sim::{Category, FleetCoordinator, FleetObserver, TrialConfig, TrialReport};
use fleet_world::WorldBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEMAND_COUNTS: [usize; 2] = [10, 15];
const TRUCK_COUNTS:  [usize; 2] = [2, 3];
const RUNS:          usize      = 1;
const SEED:          u64        = 42;

// Synthetic city: 8×8 building grid, 60 m block spacing.
const CITY_BLOCKS:     usize = 8;
const BLOCK_SPACING:   f32   = 60.0;
const BUILDING_HEIGHT: f32   = 20.0;
const BUILDING_RADIUS: f32   = 8.0;

const OUTPUT_PATH: &str = "SweepResults.csv";

// ── Observer: progress printing + CSV rows ────────────────────────────────────

struct ProgressObserver<W: ReportWriter> {
    inner:    SweepOutputObserver<W>,
    rows:     usize,
    warnings: usize,
}

impl<W: ReportWriter> ProgressObserver<W> {
    fn new(inner: SweepOutputObserver<W>) -> Self {
        Self { inner, rows: 0, warnings: 0 }
    }
}

impl<W: ReportWriter> FleetObserver for ProgressObserver<W> {
    fn on_trial_start(&mut self, index: usize, total: usize, config: &TrialConfig) {
        println!(
            "trial {index}/{total}: {} demand={} trucks={} run={}",
            config.method, config.demand_count, config.truck_count, config.run
        );
    }

    fn on_warning(&mut self, message: &str) {
        self.warnings += 1;
        eprintln!("  warning: {message}");
    }

    fn on_trial_end(&mut self, report: &TrialReport) {
        self.rows += 1;
        self.inner.on_trial_end(report);
    }

    fn on_sweep_end(&mut self, trials: usize) {
        self.inner.on_sweep_end(trials);
    }
}

fn main() -> Result<()> {
    // 1. Build the world and pick demand sources (deliveries go near
    //    buildings).
    let world = WorldBuilder::new()
        .ground(-500.0, -500.0, 500.0, 500.0, 0.0)
        .obstacle_grid(CITY_BLOCKS, CITY_BLOCKS, BLOCK_SPACING, BUILDING_HEIGHT, BUILDING_RADIUS)
        .build();
    let sources = world.obstacle_centers();
    println!("World: {} buildings, 1 km × 1 km footprint", world.obstacle_count());

    // 2. Sweep configuration.
    let params = SimParams {
        demand_counts: DEMAND_COUNTS.to_vec(),
        truck_counts:  TRUCK_COUNTS.to_vec(),
        number_of_runs: RUNS,
        seed: SEED,
        ..SimParams::default()
    };
    let total = params.total_trials();
    println!("Sweep: {total} trials, seed {SEED}");
    println!();

    // 3. Coordinator and CSV output.
    let mut coordinator = FleetCoordinator::new(world, params, sources)?;
    let reporter = CsvReporter::new(Path::new(OUTPUT_PATH))?;
    let mut observer = ProgressObserver::new(SweepOutputObserver::new(reporter));

    // 4. Run.
    let t0 = Instant::now();
    let reports = coordinator.run_sweep(&mut observer)?;
    let elapsed = t0.elapsed();

    if let Some(e) = observer.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!();
    println!("Sweep complete in {:.3} s", elapsed.as_secs_f64());
    println!("  {OUTPUT_PATH}: {} rows, {} warnings", observer.rows, observer.warnings);
    println!();

    println!(
        "{:<8} {:>7} {:>7} {:>9} {:>9} {:>12}",
        "Method", "Demand", "Trucks", "Success", "Failure", "FlightTime"
    );
    println!("{}", "-".repeat(58));
    for report in &reports {
        let success = report.bucket(Category::SuccessNoBottleneck).count
            + report.bucket(Category::SuccessBottleneck).count;
        let failure = report.spawned() - success;
        let flight_time: f32 = Category::ALL.iter().map(|&c| report.bucket(c).flight_time).sum();
        println!(
            "{:<8} {:>7} {:>7} {:>9} {:>9} {:>12.1}",
            report.config.method.label(),
            report.config.demand_count,
            report.config.truck_count,
            success,
            failure,
            flight_time
        );
    }

    Ok(())
}
