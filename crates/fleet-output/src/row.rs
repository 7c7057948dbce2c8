//! Flattening of trial reports into the fixed results-table schema.
//!
//! The schema is a compatibility contract with downstream analysis scripts:
//! three configuration columns followed by ten metric columns for each of
//! the four outcome categories, 43 columns total, in exactly this order.
//! Change nothing here without versioning the consumers.

use fleet_sim::{Category, TrialReport};

/// Metric column suffixes, in schema order.
const METRIC_SUFFIXES: [&str; 10] = [
    "Count",
    "Encounters",
    "UniqueDrones",
    "AvoidanceManeuvers",
    "FlightTime",
    "FlightTimeInProximity",
    "FlightTimeHorizontal",
    "FlightTimeHorizontalProximity",
    "FlightTimeVertical",
    "FlightTimeVerticalProximity",
];

/// Total columns per row.
pub const COLUMN_COUNT: usize = 3 + Category::COUNT * METRIC_SUFFIXES.len();

/// The header record: `TotalDrones,TotalTrucks,Method`, then
/// `<CategoryLabel>_<MetricSuffix>` for every category and metric.
pub fn header() -> Vec<String> {
    let mut columns = Vec::with_capacity(COLUMN_COUNT);
    columns.push("TotalDrones".to_owned());
    columns.push("TotalTrucks".to_owned());
    columns.push("Method".to_owned());
    for category in Category::ALL {
        for suffix in METRIC_SUFFIXES {
            columns.push(format!("{}_{suffix}", category.label()));
        }
    }
    columns
}

/// Flatten one trial report into a record matching [`header`].
///
/// The configuration columns carry the configured sweep values, not the
/// effective counts after shortfalls or dropped truck slots.
pub fn record(report: &TrialReport) -> Vec<String> {
    let mut fields = Vec::with_capacity(COLUMN_COUNT);
    fields.push(report.config.demand_count.to_string());
    fields.push(report.config.truck_count.to_string());
    fields.push(report.config.method.label().to_owned());
    for category in Category::ALL {
        let bucket = report.bucket(category);
        fields.push(bucket.count.to_string());
        fields.push(bucket.encounters.to_string());
        fields.push(bucket.unique_drones.to_string());
        fields.push(bucket.avoidance_maneuvers.to_string());
        fields.push(bucket.flight_time.to_string());
        fields.push(bucket.flight_time_in_proximity.to_string());
        fields.push(bucket.flight_time_horizontal.to_string());
        fields.push(bucket.flight_time_horizontal_proximity.to_string());
        fields.push(bucket.flight_time_vertical.to_string());
        fields.push(bucket.flight_time_vertical_proximity.to_string());
    }
    fields
}
