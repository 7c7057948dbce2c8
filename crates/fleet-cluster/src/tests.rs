//! Unit tests for fleet-cluster.

use fleet_core::vec3::mean;
use fleet_core::{Method, SimParams, SimRng, Vec3};
use fleet_world::WorldBuilder;

use crate::partition::nearest_center;
use crate::{Partition, cluster, kmeans, place_trucks, random_partition};

/// Two well-separated blobs of five points each.
fn two_blobs() -> Vec<Vec3> {
    let mut points = Vec::new();
    for i in 0..5 {
        points.push(Vec3::new(i as f32, 0.0, 0.0));
        points.push(Vec3::new(100.0 + i as f32, 0.0, 50.0));
    }
    points
}

#[cfg(test)]
mod centroid {
    use super::*;

    #[test]
    fn two_blobs_two_clusters() {
        // Deterministic seed: clustering must converge within the cap and
        // split 10 points into 2 non-overlapping sets summing to 10.
        let points = two_blobs();
        let partition = cluster(&points, 2, Method::Centroid, 0.1, 100, &mut SimRng::new(42)).unwrap();

        assert_eq!(partition.centers.len(), 2);
        assert_eq!(partition.assignment.len(), 2);
        assert_eq!(partition.assigned_count(), 10);

        for (i, a) in partition.assignment[0].iter().enumerate() {
            for b in &partition.assignment[0][i + 1..] {
                assert_ne!(a, b);
            }
            assert!(!partition.assignment[1].contains(a), "point in both clusters");
        }
    }

    #[test]
    fn converged_centers_are_stable() {
        // Idempotence: one more assignment/mean step on converged centers
        // must not move any center farther than epsilon.
        let points = two_blobs();
        let epsilon = 0.1;
        let partition = kmeans(&points, 2, epsilon, 100, &mut SimRng::new(7));

        let mut reassigned: Vec<Vec<Vec3>> = vec![Vec::new(); partition.centers.len()];
        for &p in &points {
            reassigned[nearest_center(p, &partition.centers)].push(p);
        }
        for (center, members) in partition.centers.iter().zip(&reassigned) {
            if members.is_empty() {
                continue;
            }
            assert!(
                center.distance(mean(members)) <= epsilon,
                "center moved more than epsilon after convergence"
            );
        }
    }

    #[test]
    fn empty_cluster_keeps_stale_center() {
        // With k = 3 over 2 distinct points, at least one slot starts on a
        // duplicate center and may end empty; its center must survive.
        let points = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)];
        let partition = kmeans(&points, 3, 0.1, 100, &mut SimRng::new(1));
        assert_eq!(partition.centers.len(), 3);
        assert_eq!(partition.assigned_count(), 2);
    }

    #[test]
    fn single_cluster_center_is_mean() {
        let points = two_blobs();
        let partition = kmeans(&points, 1, 0.1, 100, &mut SimRng::new(3));
        let expected = mean(&points);
        assert!(partition.centers[0].distance(expected) <= 0.1 + 1e-3);
        assert_eq!(partition.assignment[0].len(), 10);
    }
}

#[cfg(test)]
mod random {
    use super::*;

    #[test]
    fn every_point_lands_exactly_once() {
        let points: Vec<Vec3> = (0..23).map(|i| Vec3::new(i as f32, 0.0, -(i as f32))).collect();
        let partition = random_partition(&points, 4, &mut SimRng::new(11));

        assert_eq!(partition.assigned_count(), 23);
        for &p in &points {
            let owners = partition
                .assignment
                .iter()
                .filter(|slot| slot.contains(&p))
                .count();
            assert_eq!(owners, 1, "point {p} owned by {owners} trucks");
        }
    }

    #[test]
    fn base_chunks_are_equal() {
        let points: Vec<Vec3> = (0..20).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let partition = random_partition(&points, 4, &mut SimRng::new(2));
        for slot in &partition.assignment {
            assert_eq!(slot.len(), 5);
        }
    }

    #[test]
    fn centers_are_member_means() {
        let points: Vec<Vec3> = (0..12).map(|i| Vec3::new(i as f32, 0.0, 2.0 * i as f32)).collect();
        let partition = random_partition(&points, 3, &mut SimRng::new(5));
        for (center, members) in partition.centers.iter().zip(&partition.assignment) {
            assert!(center.distance(mean(members)) < 1e-4);
        }
    }
}

#[cfg(test)]
mod contract {
    use super::*;

    #[test]
    fn cluster_rejects_degenerate_inputs() {
        let points = two_blobs();
        assert!(cluster(&points, 0, Method::Centroid, 0.1, 100, &mut SimRng::new(0)).is_err());
        assert!(cluster(&[], 2, Method::Centroid, 0.1, 100, &mut SimRng::new(0)).is_err());
    }

    #[test]
    fn validate_detects_count_mismatch() {
        let partition = Partition {
            centers:    vec![Vec3::ZERO, Vec3::ZERO],
            assignment: vec![vec![]],
        };
        assert!(partition.validate(2).is_err());
        let partition = Partition {
            centers:    vec![Vec3::ZERO],
            assignment: vec![vec![]],
        };
        assert!(partition.validate(1).is_ok());
    }
}

#[cfg(test)]
mod placement {
    use super::*;

    fn params() -> SimParams {
        SimParams {
            min_distance_between_trucks: 15.0,
            max_attempts: 10,
            truck_jitter: 50.0,
            ..SimParams::default()
        }
    }

    #[test]
    fn separated_centers_all_place() {
        let world = WorldBuilder::new()
            .ground(-500.0, -500.0, 500.0, 500.0, 0.0)
            .build();
        let partition = Partition {
            centers: vec![Vec3::new(-100.0, 0.0, 0.0), Vec3::new(100.0, 0.0, 0.0)],
            assignment: vec![vec![Vec3::ZERO], vec![Vec3::ZERO]],
        };
        let outcome = place_trucks(&world, &partition, &params(), &mut SimRng::new(1));
        assert_eq!(outcome.trucks.len(), 2);
        assert_eq!(outcome.dropped, 0);
        for truck in &outcome.trucks {
            assert_eq!(truck.position.y, 0.0, "truck not ground-snapped");
        }
    }

    #[test]
    fn coincident_centers_jitter_apart_or_drop() {
        let world = WorldBuilder::new()
            .ground(-500.0, -500.0, 500.0, 500.0, 0.0)
            .build();
        let partition = Partition {
            centers: vec![Vec3::ZERO; 3],
            assignment: vec![vec![Vec3::ZERO]; 3],
        };
        let outcome = place_trucks(&world, &partition, &params(), &mut SimRng::new(9));

        assert_eq!(outcome.trucks.len() + outcome.dropped, 3);
        assert!(!outcome.trucks.is_empty());
        for (i, a) in outcome.trucks.iter().enumerate() {
            for b in &outcome.trucks[i + 1..] {
                assert!(
                    a.position.distance(b.position) >= 15.0,
                    "placed trucks violate separation"
                );
            }
        }
    }

    #[test]
    fn off_ground_center_falls_back_into_footprint() {
        // Center far outside the footprint; jitter (±50) cannot reach it,
        // so placement must use the nearest-ground fallback.
        let world = WorldBuilder::new()
            .ground(-100.0, -100.0, 100.0, 100.0, 2.0)
            .build();
        let partition = Partition {
            centers: vec![Vec3::new(400.0, 0.0, 0.0)],
            assignment: vec![vec![Vec3::ZERO]],
        };
        let outcome = place_trucks(&world, &partition, &params(), &mut SimRng::new(3));
        assert_eq!(outcome.trucks.len(), 1);
        let pos = outcome.trucks[0].position;
        assert!(pos.x <= 100.0 && pos.y == 2.0);
    }
}
