//! The `SpatialQuery` trait — the seam between the simulator and its host
//! environment.
//!
//! Production deployments back this with a scene graph's collision queries;
//! the simulator ships [`StaticWorld`][crate::StaticWorld] for headless runs
//! and tests.  Implementations must be pure: repeated queries with the same
//! arguments return the same answer within a tick.

use fleet_core::Vec3;

/// One obstacle found by [`SpatialQuery::nearby`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObstacleHit {
    /// Obstacle center.
    pub center: Vec3,
    /// Obstacle footprint radius.
    pub radius: f32,
    /// Distance from the query point to `center`.
    pub distance: f32,
}

/// Read-only spatial query service.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: one world instance is shared by
/// every trial in a sweep.
pub trait SpatialQuery: Send + Sync {
    /// All obstacles whose surface lies within `radius` of `point`.
    ///
    /// "Surface" means the query sphere intersects the obstacle's footprint
    /// sphere, so large obstacles are found even when their centers are
    /// farther away than `radius`.  Order is unspecified.
    fn nearby(&self, point: Vec3, radius: f32) -> Vec<ObstacleHit>;

    /// Height of the ground directly below `point`, or `None` if there is
    /// no ground there (outside the world footprint).
    fn ground_height(&self, point: Vec3) -> Option<f32>;

    /// Convenience: `true` if any obstacle surface lies within `radius` of
    /// `point`.
    fn obstructed(&self, point: Vec3, radius: f32) -> bool {
        !self.nearby(point, radius).is_empty()
    }

    /// The nearest point with valid ground to `point`, ground-snapped, or
    /// `None` if the implementation cannot find one.
    ///
    /// The default only succeeds when there is already ground directly below
    /// `point`; implementations with a known footprint override this to
    /// search sideways.  Used as the last-resort fallback in truck placement.
    fn nearest_ground(&self, point: Vec3) -> Option<Vec3> {
        self.ground_height(point).map(|y| point.with_y(y))
    }
}
