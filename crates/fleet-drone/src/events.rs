//! Lifecycle and metric events emitted by drones.
//!
//! Events are returned from [`DroneAgent::tick`][crate::DroneAgent] and
//! dispatched by the coordinator to its observers; drones never call into
//! the coordinator directly.

use fleet_core::DroneId;

/// One event produced during a drone tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DroneEvent {
    /// The drone returned to its truck after a committed delivery.
    SuccessfulDelivery(DroneId),
    /// The drone returned to its truck without delivering.
    FailedDelivery(DroneId),
    /// A never-before-seen drone entered the proximity radius.
    DroneEncounter,
    /// One repulsion term against another drone was applied this tick.
    AvoidanceManeuver,
    /// Cumulative flight time after this tick, in seconds.
    FlightTimeUpdate(f32),
    /// Cumulative in-proximity flight time after this tick, in seconds.
    FlightTimeInProximityUpdate(f32),
}
