//! `fleet-core` — foundational types for the drone fleet simulator.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It
//! intentionally has no `fleet-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `DroneId`, `TruckId`, `DemandId`                      |
//! | [`vec3`]    | `Vec3` — 3-D position/direction math                  |
//! | [`time`]    | `Tick`, `SimClock`                                    |
//! | [`rng`]     | `DroneRng` (per-agent), `SimRng` (global)             |
//! | [`params`]  | `SimParams`, `Method`                                 |
//! | [`error`]   | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.     |

pub mod error;
pub mod ids;
pub mod params;
pub mod rng;
pub mod time;
pub mod vec3;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{DemandId, DroneId, TruckId};
pub use params::{Method, SimParams};
pub use rng::{DroneRng, SimRng};
pub use time::{SimClock, Tick};
pub use vec3::Vec3;
