//! Per-trial metric aggregation handed to observers at trial end.

use fleet_core::Method;
use fleet_drone::DroneAgent;

use crate::category::Category;

/// The sweep coordinates of one trial.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialConfig {
    pub method: Method,
    /// Configured demand-point count for this trial.
    pub demand_count: usize,
    /// Configured truck count for this trial.
    pub truck_count: usize,
    /// Repetition index, `0..number_of_runs`.
    pub run: usize,
}

/// Metrics summed over all drones that finished a trial in one category.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryMetrics {
    pub count: usize,
    pub encounters: u64,
    pub unique_drones: u64,
    pub avoidance_maneuvers: u64,
    pub flight_time: f32,
    pub flight_time_in_proximity: f32,
    pub flight_time_horizontal: f32,
    pub flight_time_horizontal_proximity: f32,
    pub flight_time_vertical: f32,
    pub flight_time_vertical_proximity: f32,
}

impl CategoryMetrics {
    /// Fold one drone's lifetime metrics into this bucket.
    ///
    /// Encounters and unique drones both report the size of the drone's
    /// unique-encounter set; the export schema carries both columns.
    pub(crate) fn absorb(&mut self, agent: &DroneAgent) {
        let unique = agent.encounter_count() as u64;
        let m = agent.metrics();
        self.encounters += unique;
        self.unique_drones += unique;
        self.avoidance_maneuvers += m.avoidance_maneuvers as u64;
        self.flight_time += m.flight_time;
        self.flight_time_in_proximity += m.flight_time_in_proximity;
        self.flight_time_horizontal += m.flight_time_horizontal;
        self.flight_time_horizontal_proximity += m.flight_time_horizontal_proximity;
        self.flight_time_vertical += m.flight_time_vertical;
        self.flight_time_vertical_proximity += m.flight_time_vertical_proximity;
    }
}

/// One row of the sweep's results: the trial configuration plus the four
/// category buckets in report-column order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialReport {
    pub config: TrialConfig,
    pub categories: [CategoryMetrics; Category::COUNT],
}

impl TrialReport {
    pub fn new(config: TrialConfig) -> Self {
        Self {
            config,
            categories: [CategoryMetrics::default(); Category::COUNT],
        }
    }

    #[inline]
    pub fn bucket(&self, category: Category) -> &CategoryMetrics {
        &self.categories[category.index()]
    }

    #[inline]
    pub(crate) fn bucket_mut(&mut self, category: Category) -> &mut CategoryMetrics {
        &mut self.categories[category.index()]
    }

    /// Drones spawned in this trial (sum of all bucket counts).
    pub fn spawned(&self) -> usize {
        self.categories.iter().map(|c| c.count).sum()
    }
}
