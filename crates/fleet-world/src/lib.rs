//! `fleet-world` — spatial queries for the drone fleet simulator.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`query`] | `SpatialQuery` trait, `ObstacleHit`                       |
//! | [`world`] | `StaticWorld` (rstar obstacle index + ground), `WorldBuilder` |
//!
//! The rest of the simulator treats the world as a pure query service: given
//! a point and radius, which obstacles are near it; given a point, what is
//! the ground height below it.  Nothing here mutates, so a single world is
//! shared by reference across every trial of a sweep.

pub mod query;
pub mod world;

#[cfg(test)]
mod tests;

pub use query::{ObstacleHit, SpatialQuery};
pub use world::{StaticWorld, WorldBuilder};
