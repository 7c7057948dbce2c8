//! Error types for fleet-cluster.

use thiserror::Error;

/// Errors from clustering and truck placement.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Structural contract violation — trial-fatal: the coordinator aborts
    /// the trial without spawning agents.
    #[error("expected {expected} slots but got {centers} centers / {assigned} assignments")]
    CountMismatch {
        expected: usize,
        centers:  usize,
        assigned: usize,
    },

    #[error("cannot cluster into zero trucks")]
    ZeroTrucks,

    #[error("no demand points to cluster")]
    NoPoints,
}

/// Alias for `Result<T, ClusterError>`.
pub type ClusterResult<T> = Result<T, ClusterError>;
