//! Sweep and flight configuration.
//!
//! `SimParams` is a plain struct; applications construct one (or start from
//! `Default`, which carries the published study constants) and pass it to
//! the coordinator.  There is no ambient global configuration.

use crate::CoreError;

// ── Method ────────────────────────────────────────────────────────────────────

/// Truck-placement strategy for a trial.
///
/// `Centroid` models a single operator planning launch sites with k-means;
/// `Random` models independent operators splitting the demand arbitrarily.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    Centroid,
    Random,
}

impl Method {
    /// Both methods in sweep order (`Centroid` first).
    pub const ALL: [Method; 2] = [Method::Centroid, Method::Random];

    /// Name used in the exported report's `Method` column.
    pub fn label(self) -> &'static str {
        match self {
            Method::Centroid => "KMeans",
            Method::Random   => "Random",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── SimParams ─────────────────────────────────────────────────────────────────

/// Full configuration for a sweep.
///
/// Distances are in world units (metres), times in simulated seconds,
/// speeds in units per second.  Defaults: drones cruise at 60 m, hover-drop
/// at 15 m, and fly 15 m/s.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams {
    // ── Sweep space ───────────────────────────────────────────────────────
    /// Demand-point counts to sweep (max simultaneous drones per trial).
    pub demand_counts: Vec<usize>,
    /// Truck counts to sweep (launch points per trial).
    pub truck_counts: Vec<usize>,
    /// Repetitions of every (demand, truck, method) combination.
    pub number_of_runs: usize,
    /// Simulated seconds before a trial is forcibly completed.
    pub max_simulation_time: f32,
    /// Master RNG seed.  The same seed always produces identical sweeps.
    pub seed: u64,

    // ── Timing ────────────────────────────────────────────────────────────
    /// Seconds per simulation tick.  Default: 0.02 (50 Hz fixed step).
    pub tick_secs: f32,
    /// Pause between trial teardown and the next trial's start.
    pub cooldown_time: f32,

    // ── Demand generation ─────────────────────────────────────────────────
    /// Radius of the horizontal sampling disk around each source location.
    pub spawn_radius: f32,
    /// A candidate demand point is rejected if any obstacle lies closer
    /// than this.
    pub demand_clearance: f32,

    // ── Clustering & truck placement ──────────────────────────────────────
    /// Trucks closer together than this are rejected (launch interference).
    pub min_distance_between_trucks: f32,
    /// Placement retries (with jitter) before falling back to the nearest
    /// ground position.
    pub max_attempts: usize,
    /// Horizontal jitter half-range applied per placement retry.
    pub truck_jitter: f32,
    /// k-means convergence threshold: iteration stops when no center moves
    /// farther than this.
    pub kmeans_epsilon: f32,
    /// Defensive cap on k-means iterations (the algorithm converges long
    /// before this for real inputs).
    pub kmeans_max_iterations: usize,

    // ── Flight ────────────────────────────────────────────────────────────
    /// Cruise altitude ceiling.
    pub flight_height: f32,
    /// Altitude above the demand point at which the package is dropped.
    pub hover_height: f32,
    /// Drone speed in units per second.
    pub speed: f32,
    /// Time spent in the `Deliver` state.
    pub delivery_time: f32,
    /// Stagger between consecutive drone launches from one truck.
    pub deployment_delay: f32,
    /// A movement state transitions when remaining distance to its target
    /// falls at or below this.
    pub delivery_distance_threshold: f32,

    // ── Avoidance ─────────────────────────────────────────────────────────
    /// Radius within which potential-field repulsion applies.
    pub avoidance_radius: f32,
    /// Repulsion strength against other drones (decays while stuck).
    pub drone_avoidance_strength: f32,
    /// Repulsion strength against obstacles.
    pub building_avoidance_strength: f32,
    /// Hard cap on the repulsion magnitude from any single neighbour.
    pub max_avoidance_force: f32,

    // ── Stuck detection ───────────────────────────────────────────────────
    /// Interval between displacement checks.
    pub position_check_interval: f32,
    /// Accumulated stuck time past which a drone is marked bottlenecked.
    pub stuck_time_threshold: f32,
    /// Floor for the decaying drone-avoidance strength.
    pub min_drone_avoidance_strength: f32,

    // ── Metrics ───────────────────────────────────────────────────────────
    /// Radius of the encounter/proximity tracking sphere.
    pub proximity_radius: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            demand_counts:  vec![100, 150, 200, 250, 300],
            truck_counts:   vec![20, 25, 30, 35, 40],
            number_of_runs: 15,
            max_simulation_time: 600.0,
            seed: 42,

            tick_secs:     0.02,
            cooldown_time: 1.0,

            spawn_radius:     100.0,
            demand_clearance: 1.0,

            min_distance_between_trucks: 15.0,
            max_attempts:          10,
            truck_jitter:          100.0,
            kmeans_epsilon:        0.1,
            kmeans_max_iterations: 100,

            flight_height:    60.0,
            hover_height:     15.0,
            speed:            15.0,
            delivery_time:    10.0,
            deployment_delay: 15.0,
            delivery_distance_threshold: 5.0,

            avoidance_radius:            30.0,
            drone_avoidance_strength:    30.0,
            building_avoidance_strength: 10.0,
            max_avoidance_force:         30.0,

            position_check_interval:      1.0,
            stuck_time_threshold:         3.0,
            min_drone_avoidance_strength: 10.0,

            proximity_radius: 60.0,
        }
    }
}

impl SimParams {
    /// Total trials in the sweep: both methods × every (demand, truck) pair
    /// × `number_of_runs`.
    pub fn total_trials(&self) -> usize {
        Method::ALL.len() * self.demand_counts.len() * self.truck_counts.len() * self.number_of_runs
    }

    /// Reject configurations that cannot produce a meaningful sweep.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.demand_counts.is_empty() {
            return Err(CoreError::Config("demand_counts must not be empty".into()));
        }
        if self.truck_counts.is_empty() {
            return Err(CoreError::Config("truck_counts must not be empty".into()));
        }
        if self.truck_counts.iter().any(|&k| k == 0) {
            return Err(CoreError::Config("truck counts must be positive".into()));
        }
        if self.number_of_runs == 0 {
            return Err(CoreError::Config("number_of_runs must be positive".into()));
        }
        if !(self.tick_secs > 0.0) {
            return Err(CoreError::Config("tick_secs must be positive".into()));
        }
        if !(self.speed > 0.0) {
            return Err(CoreError::Config("speed must be positive".into()));
        }
        Ok(())
    }
}
