//! `fleet-demand` — delivery-point generation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                          |
//! |---------------|---------------------------------------------------|
//! | [`generator`] | `DemandGenerator`, `DemandSet`                    |
//! | [`error`]     | `DemandError`, `DemandResult<T>`                  |
//!
//! Demand points are sampled near source locations (typically obstacle
//! centers — deliveries cluster around buildings) by rejection against the
//! world's ground and clearance constraints.  Generation may legitimately
//! stop short of the requested count; a partial demand set is valid and the
//! shortfall is reported, not raised.

pub mod error;
pub mod generator;

#[cfg(test)]
mod tests;

pub use error::{DemandError, DemandResult};
pub use generator::{DemandGenerator, DemandSet};
