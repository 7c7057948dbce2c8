//! Truck placement: turn computed centers into ground-valid launch sites.
//!
//! # Per-slot procedure
//!
//! 1. Start from the cluster center.
//! 2. While the site is off-ground or within `min_distance_between_trucks`
//!    of an already-placed truck, retry with bounded random horizontal
//!    jitter (up to `max_attempts`).
//! 3. If the budget runs out, fall back to the nearest valid ground
//!    position to the last attempted point.
//! 4. Instantiate the truck only if the separation check now passes;
//!    otherwise drop the slot (and its assigned deliveries) with a warning
//!    counted in [`PlacementOutcome::dropped`].
//!
//! Dropped slots reduce the effective truck count for the trial — never
//! fatal.

use fleet_core::{SimParams, SimRng, TruckId, Vec3};
use fleet_world::SpatialQuery;

use crate::partition::Partition;

// ── PlacedTruck ───────────────────────────────────────────────────────────────

/// A successfully placed truck with its assigned delivery points.
#[derive(Clone, Debug)]
pub struct PlacedTruck {
    pub id: TruckId,
    /// Ground-snapped launch position.
    pub position: Vec3,
    /// Delivery destinations this truck's drones will serve.
    pub assigned: Vec<Vec3>,
}

/// Result of placing all slots of a partition.
#[derive(Clone, Debug, Default)]
pub struct PlacementOutcome {
    pub trucks: Vec<PlacedTruck>,
    /// Slots abandoned because no separation-respecting site was found.
    pub dropped: usize,
}

impl PlacementOutcome {
    /// Total deliveries that will actually be flown.
    pub fn assigned_count(&self) -> usize {
        self.trucks.iter().map(|t| t.assigned.len()).sum()
    }
}

// ── place_trucks ──────────────────────────────────────────────────────────────

/// Place one truck per partition slot, subject to ground validity and the
/// minimum-separation constraint.
pub fn place_trucks<W: SpatialQuery>(
    world:     &W,
    partition: &Partition,
    params:    &SimParams,
    rng:       &mut SimRng,
) -> PlacementOutcome {
    let mut outcome = PlacementOutcome::default();
    let mut placed_positions: Vec<Vec3> = Vec::with_capacity(partition.centers.len());

    for (slot, (&center, assigned)) in partition
        .centers
        .iter()
        .zip(&partition.assignment)
        .enumerate()
    {
        let mut candidate = center;
        let mut last_attempt = candidate;
        let mut attempts = 0;

        while !site_ok(world, candidate, &placed_positions, params) && attempts < params.max_attempts {
            candidate = last_attempt + jitter(params.truck_jitter, rng);
            last_attempt = candidate;
            attempts += 1;
        }

        if !site_ok(world, candidate, &placed_positions, params) {
            // Budget exhausted: snap to the nearest valid ground position
            // to the last attempt and re-test separation below.
            match world.nearest_ground(last_attempt) {
                Some(ground) => candidate = ground,
                None => {
                    outcome.dropped += 1;
                    continue;
                }
            }
        }

        if too_close(candidate, &placed_positions, params.min_distance_between_trucks) {
            outcome.dropped += 1;
            continue;
        }

        let position = match world.ground_height(candidate) {
            Some(y) => candidate.with_y(y),
            None => {
                outcome.dropped += 1;
                continue;
            }
        };

        placed_positions.push(position);
        outcome.trucks.push(PlacedTruck {
            id: TruckId(slot as u32),
            position,
            assigned: assigned.clone(),
        });
    }

    outcome
}

fn site_ok<W: SpatialQuery>(
    world:  &W,
    site:   Vec3,
    placed: &[Vec3],
    params: &SimParams,
) -> bool {
    world.ground_height(site).is_some()
        && !too_close(site, placed, params.min_distance_between_trucks)
}

fn too_close(site: Vec3, placed: &[Vec3], min_distance: f32) -> bool {
    placed.iter().any(|&p| site.distance(p) < min_distance)
}

fn jitter(half_range: f32, rng: &mut SimRng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-half_range..=half_range),
        0.0,
        rng.gen_range(-half_range..=half_range),
    )
}
