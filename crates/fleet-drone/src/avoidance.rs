//! Inverse-square potential-field steering.
//!
//! Every neighbour (drone or obstacle) inside the avoidance radius
//! contributes a repulsive vector pointing away from it with magnitude
//!
//!   min(strength / distance², max_force)
//!
//! All terms are summed before the caller normalizes them together with the
//! direction-to-target vector.  The per-term cap bounds the blow-up as
//! distance → 0; the cap applies to each term individually, not the sum.

use fleet_core::{DroneId, SimParams, Vec3};
use fleet_world::SpatialQuery;

/// Summed repulsion from nearby drones and obstacles.
///
/// `drone_strength` is passed separately from `params` because it decays
/// while the drone is stuck; the obstacle term always uses the configured
/// `building_avoidance_strength`.
///
/// Returns the force vector and the number of drone-repulsion terms applied
/// (each one counts as an avoidance maneuver).
pub fn avoidance_force<W: SpatialQuery>(
    self_id:        DroneId,
    position:       Vec3,
    neighbors:      &[(DroneId, Vec3)],
    world:          &W,
    params:         &SimParams,
    drone_strength: f32,
) -> (Vec3, u32) {
    let mut force = Vec3::ZERO;
    let mut maneuvers = 0;

    // ── Other drones ──────────────────────────────────────────────────────
    for &(id, other) in neighbors {
        if id == self_id {
            continue;
        }
        let away = position - other;
        let distance = away.length();
        if distance > params.avoidance_radius || distance <= f32::EPSILON {
            continue;
        }
        let magnitude = (drone_strength / (distance * distance)).min(params.max_avoidance_force);
        force += away.normalized() * magnitude;
        maneuvers += 1;
    }

    // ── Obstacles ─────────────────────────────────────────────────────────
    for hit in world.nearby(position, params.avoidance_radius) {
        if hit.distance <= f32::EPSILON {
            continue;
        }
        let magnitude = (params.building_avoidance_strength / (hit.distance * hit.distance))
            .min(params.max_avoidance_force);
        force += (position - hit.center).normalized() * magnitude;
    }

    (force, maneuvers)
}
