//! Error types for fleet-demand.

use thiserror::Error;

/// Errors from demand generation.
///
/// Stopping short of the requested count is deliberately *not* an error —
/// see [`DemandSet::shortfall`][crate::DemandSet::shortfall].
#[derive(Debug, Error)]
pub enum DemandError {
    #[error("no source locations to sample around")]
    NoSources,
}

/// Alias for `Result<T, DemandError>`.
pub type DemandResult<T> = Result<T, DemandError>;
