//! Unit tests for fleet-demand.

use fleet_core::{SimRng, Vec3};
use fleet_world::{SpatialQuery, StaticWorld, WorldBuilder};

use crate::{DemandError, DemandGenerator};

fn open_world() -> StaticWorld {
    WorldBuilder::new()
        .ground(-200.0, -200.0, 200.0, 200.0, 0.0)
        .build()
}

#[test]
fn generates_requested_count_on_open_ground() {
    let world = open_world();
    let sources = vec![Vec3::ZERO];
    let generator = DemandGenerator::new(50.0, 1.0);
    let set = generator
        .generate(&world, &sources, 20, &mut SimRng::new(1))
        .unwrap();
    assert_eq!(set.points.len(), 20);
    assert!(!set.is_short());
}

#[test]
fn points_are_ground_snapped_and_in_radius() {
    let world = WorldBuilder::new()
        .ground(-200.0, -200.0, 200.0, 200.0, 3.5)
        .build();
    let source = Vec3::new(10.0, 0.0, -10.0);
    let generator = DemandGenerator::new(40.0, 1.0);
    let set = generator
        .generate(&world, &[source], 15, &mut SimRng::new(2))
        .unwrap();
    for p in &set.points {
        assert_eq!(p.y, 3.5);
        let horizontal = (p.horizontal() - source.horizontal()).length();
        assert!(horizontal <= 40.0 + 1e-3, "point {p} outside sampling disk");
    }
}

#[test]
fn points_respect_obstacle_clearance() {
    // One obstacle dead-center in a small sampling disk.
    let world = WorldBuilder::new()
        .ground(-50.0, -50.0, 50.0, 50.0, 0.0)
        .obstacle(Vec3::new(0.0, 0.0, 0.0), 4.0)
        .build();
    let generator = DemandGenerator::new(20.0, 1.0);
    let set = generator
        .generate(&world, &[Vec3::ZERO], 30, &mut SimRng::new(3))
        .unwrap();
    for p in &set.points {
        assert!(!world.obstructed(*p, 1.0), "point {p} violates clearance");
    }
}

#[test]
fn stops_short_when_no_valid_ground() {
    // Sources sit far outside the ground footprint: every candidate fails
    // the ground query, so the attempt budget runs out.
    let world = WorldBuilder::new()
        .ground(-10.0, -10.0, 10.0, 10.0, 0.0)
        .build();
    let sources = vec![Vec3::new(1_000.0, 0.0, 1_000.0)];
    let generator = DemandGenerator::new(5.0, 1.0);
    let set = generator
        .generate(&world, &sources, 10, &mut SimRng::new(4))
        .unwrap();
    assert!(set.points.is_empty());
    assert_eq!(set.shortfall(), 10);
}

#[test]
fn no_sources_is_an_error() {
    let world = open_world();
    let generator = DemandGenerator::new(50.0, 1.0);
    let result = generator.generate(&world, &[], 5, &mut SimRng::new(5));
    assert!(matches!(result, Err(DemandError::NoSources)));
}

#[test]
fn points_are_duplicate_free() {
    let world = open_world();
    let generator = DemandGenerator::new(60.0, 1.0);
    let set = generator
        .generate(&world, &[Vec3::ZERO], 50, &mut SimRng::new(6))
        .unwrap();
    for (i, a) in set.points.iter().enumerate() {
        for b in &set.points[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn deterministic_for_same_seed() {
    let world = open_world();
    let generator = DemandGenerator::new(50.0, 1.0);
    let a = generator
        .generate(&world, &[Vec3::ZERO], 10, &mut SimRng::new(9))
        .unwrap();
    let b = generator
        .generate(&world, &[Vec3::ZERO], 10, &mut SimRng::new(9))
        .unwrap();
    assert_eq!(a.points, b.points);
}
