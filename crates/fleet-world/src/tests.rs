//! Unit tests for fleet-world.

use fleet_core::Vec3;

use crate::{SpatialQuery, WorldBuilder};

fn small_world() -> crate::StaticWorld {
    WorldBuilder::new()
        .ground(-100.0, -100.0, 100.0, 100.0, 0.0)
        .obstacle(Vec3::new(10.0, 5.0, 0.0), 2.0)
        .obstacle(Vec3::new(-50.0, 5.0, 50.0), 5.0)
        .build()
}

#[test]
fn ground_inside_and_outside() {
    let world = small_world();
    assert_eq!(world.ground_height(Vec3::new(0.0, 60.0, 0.0)), Some(0.0));
    assert_eq!(world.ground_height(Vec3::new(99.0, 60.0, -99.0)), Some(0.0));
    assert_eq!(world.ground_height(Vec3::new(200.0, 60.0, 0.0)), None);
}

#[test]
fn nearby_finds_obstacle_within_radius() {
    let world = small_world();
    let hits = world.nearby(Vec3::new(0.0, 5.0, 0.0), 15.0);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].center, Vec3::new(10.0, 5.0, 0.0));
    assert!((hits[0].distance - 10.0).abs() < 1e-4);
}

#[test]
fn nearby_accounts_for_obstacle_radius() {
    // Center distance 6 > query radius 5, but the 2-unit footprint brings
    // the surface within reach.
    let world = WorldBuilder::new()
        .obstacle(Vec3::new(6.0, 0.0, 0.0), 2.0)
        .build();
    assert!(world.obstructed(Vec3::ZERO, 5.0));
    assert!(!world.obstructed(Vec3::ZERO, 3.0));
}

#[test]
fn nearby_empty_when_clear() {
    let world = small_world();
    assert!(world.nearby(Vec3::new(90.0, 5.0, -90.0), 10.0).is_empty());
}

#[test]
fn obstacle_grid_counts() {
    let world = WorldBuilder::new()
        .obstacle_grid(3, 4, 20.0, 10.0, 5.0)
        .build();
    assert_eq!(world.obstacle_count(), 12);
    assert_eq!(world.obstacle_centers().len(), 12);
}

#[test]
fn grid_is_centered() {
    let world = WorldBuilder::new()
        .obstacle_grid(3, 3, 10.0, 0.0, 1.0)
        .build();
    let centers = world.obstacle_centers();
    let sum = centers.iter().fold(Vec3::ZERO, |a, &c| a + c);
    assert!(sum.length() < 1e-3, "grid should be centered on the origin");
}
