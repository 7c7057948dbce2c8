//! `fleet-cluster` — demand partitioning and truck placement.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`partition`] | `Partition`, `cluster` (k-means + random split)       |
//! | [`placement`] | `PlacedTruck`, `place_trucks`                         |
//! | [`error`]     | `ClusterError`, `ClusterResult<T>`                    |
//!
//! Clustering decides which truck serves which demand points; placement
//! turns the computed centers into ground-valid, separation-respecting
//! launch sites.  Placement failures degrade (dropped slots, fallback
//! positions) — only a center/assignment count mismatch is trial-fatal.

pub mod error;
pub mod partition;
pub mod placement;

#[cfg(test)]
mod tests;

pub use error::{ClusterError, ClusterResult};
pub use partition::{Partition, cluster, kmeans, random_partition};
pub use placement::{PlacedTruck, PlacementOutcome, place_trucks};
