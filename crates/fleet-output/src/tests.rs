//! Unit tests for fleet-output.

use fleet_core::Method;
use fleet_sim::{Category, CategoryMetrics, FleetObserver, TrialConfig, TrialReport};

use crate::{COLUMN_COUNT, CsvReporter, ReportWriter, SweepOutputObserver, header, record};

fn sample_report() -> TrialReport {
    let mut report = TrialReport::new(TrialConfig {
        method: Method::Centroid,
        demand_count: 100,
        truck_count: 20,
        run: 0,
    });
    report.categories[Category::SuccessNoBottleneck.index()] = CategoryMetrics {
        count: 98,
        encounters: 412,
        unique_drones: 412,
        avoidance_maneuvers: 1337,
        flight_time: 12.5,
        flight_time_in_proximity: 3.25,
        flight_time_horizontal: 7.5,
        flight_time_horizontal_proximity: 1.5,
        flight_time_vertical: 4.0,
        flight_time_vertical_proximity: 0.75,
    };
    report.categories[Category::FailBottleneck.index()].count = 2;
    report
}

#[cfg(test)]
mod schema {
    use super::*;

    #[test]
    fn header_matches_the_export_contract() {
        let expected = "TotalDrones,TotalTrucks,Method,\
            SuccessfulNoBottlenecks_Count,SuccessfulNoBottlenecks_Encounters,SuccessfulNoBottlenecks_UniqueDrones,SuccessfulNoBottlenecks_AvoidanceManeuvers,SuccessfulNoBottlenecks_FlightTime,SuccessfulNoBottlenecks_FlightTimeInProximity,SuccessfulNoBottlenecks_FlightTimeHorizontal,SuccessfulNoBottlenecks_FlightTimeHorizontalProximity,SuccessfulNoBottlenecks_FlightTimeVertical,SuccessfulNoBottlenecks_FlightTimeVerticalProximity,\
            SuccessfulBottlenecks_Count,SuccessfulBottlenecks_Encounters,SuccessfulBottlenecks_UniqueDrones,SuccessfulBottlenecks_AvoidanceManeuvers,SuccessfulBottlenecks_FlightTime,SuccessfulBottlenecks_FlightTimeInProximity,SuccessfulBottlenecks_FlightTimeHorizontal,SuccessfulBottlenecks_FlightTimeHorizontalProximity,SuccessfulBottlenecks_FlightTimeVertical,SuccessfulBottlenecks_FlightTimeVerticalProximity,\
            UnsuccessfulNoBottlenecks_Count,UnsuccessfulNoBottlenecks_Encounters,UnsuccessfulNoBottlenecks_UniqueDrones,UnsuccessfulNoBottlenecks_AvoidanceManeuvers,UnsuccessfulNoBottlenecks_FlightTime,UnsuccessfulNoBottlenecks_FlightTimeInProximity,UnsuccessfulNoBottlenecks_FlightTimeHorizontal,UnsuccessfulNoBottlenecks_FlightTimeHorizontalProximity,UnsuccessfulNoBottlenecks_FlightTimeVertical,UnsuccessfulNoBottlenecks_FlightTimeVerticalProximity,\
            UnsuccessfulBottlenecks_Count,UnsuccessfulBottlenecks_Encounters,UnsuccessfulBottlenecks_UniqueDrones,UnsuccessfulBottlenecks_AvoidanceManeuvers,UnsuccessfulBottlenecks_FlightTime,UnsuccessfulBottlenecks_FlightTimeInProximity,UnsuccessfulBottlenecks_FlightTimeHorizontal,UnsuccessfulBottlenecks_FlightTimeHorizontalProximity,UnsuccessfulBottlenecks_FlightTimeVertical,UnsuccessfulBottlenecks_FlightTimeVerticalProximity";
        assert_eq!(header().join(","), expected);
        assert_eq!(header().len(), COLUMN_COUNT);
        assert_eq!(COLUMN_COUNT, 43);
    }

    #[test]
    fn record_flattens_in_column_order() {
        let fields = record(&sample_report());
        assert_eq!(fields.len(), COLUMN_COUNT);
        assert_eq!(&fields[..3], ["100", "20", "KMeans"]);
        // First category bucket, schema order.
        assert_eq!(
            &fields[3..13],
            ["98", "412", "412", "1337", "12.5", "3.25", "7.5", "1.5", "4", "0.75"]
        );
        // Empty buckets flatten to zeros.
        assert_eq!(&fields[13..16], ["0", "0", "0"]);
        // FailBottleneck count landed in the final bucket.
        assert_eq!(fields[33], "2");
    }

    #[test]
    fn random_method_labels_as_random() {
        let mut report = sample_report();
        report.config.method = Method::Random;
        assert_eq!(record(&report)[2], "Random");
    }
}

#[cfg(test)]
mod csv_backend {
    use super::*;

    #[test]
    fn writes_header_and_one_row_per_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SweepResults.csv");

        let mut reporter = CsvReporter::new(&path).unwrap();
        reporter.write_row(&sample_report()).unwrap();
        reporter.write_row(&sample_report()).unwrap();
        reporter.finish().unwrap();
        // Idempotent.
        reporter.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("TotalDrones,TotalTrucks,Method,"));
        assert_eq!(lines[1].split(',').count(), COLUMN_COUNT);
        assert!(lines[1].starts_with("100,20,KMeans,98,412,412,1337,12.5,"));
    }

    #[test]
    fn observer_bridges_trial_rows_to_the_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SweepResults.csv");

        let reporter = CsvReporter::new(&path).unwrap();
        let mut observer = SweepOutputObserver::new(reporter);

        observer.on_trial_end(&sample_report());
        observer.on_trial_end(&sample_report());
        observer.on_sweep_end(2);

        assert!(observer.take_error().is_none());
        drop(observer);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
    }
}
