//! Static world: a flat ground footprint plus fixed obstacles.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over obstacle `[x, z]` footprints answers the
//! per-tick `nearby` queries from every drone.  The tree filters on
//! horizontal distance; the exact 3-D sphere test runs on the survivors.
//!
//! # Ground model
//!
//! Ground is a single axis-aligned rectangle at a fixed height.  Queries
//! outside the rectangle return `None`, which the demand generator and the
//! truck placer treat as "not a valid site".  That is deliberately the
//! simplest model satisfying the query contract; heightfields slot in by
//! implementing [`SpatialQuery`] directly.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use fleet_core::Vec3;

use crate::query::{ObstacleHit, SpatialQuery};

// ── R-tree obstacle entry ─────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[x, z]` footprint point
/// with the index of the obstacle it belongs to.
#[derive(Clone)]
struct ObstacleEntry {
    point: [f32; 2], // [x, z]
    idx:   usize,
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ObstacleEntry {
    /// Squared horizontal distance — sufficient for the coarse filter; the
    /// exact 3-D test runs afterwards.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

/// A fixed obstacle: a sphere of `radius` centered at `center`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub center: Vec3,
    pub radius: f32,
}

// ── StaticWorld ───────────────────────────────────────────────────────────────

/// Immutable world shared across all trials of a sweep.
///
/// Construct via [`WorldBuilder`].
pub struct StaticWorld {
    /// Ground rectangle: `[min_x, min_z]` .. `[max_x, max_z]`.
    ground_min: [f32; 2],
    ground_max: [f32; 2],
    /// Ground height (y) everywhere inside the footprint.
    ground_height: f32,

    obstacles:   Vec<Obstacle>,
    spatial_idx: RTree<ObstacleEntry>,

    /// Largest obstacle radius — widens the coarse R-tree filter so big
    /// obstacles are found from query points beyond their center distance.
    max_obstacle_radius: f32,
}

impl StaticWorld {
    /// Number of obstacles in the world.
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Obstacle centers, e.g. for use as demand-generation sources.
    pub fn obstacle_centers(&self) -> Vec<Vec3> {
        self.obstacles.iter().map(|o| o.center).collect()
    }

    /// The fixed ground height of this world.
    pub fn ground_level(&self) -> f32 {
        self.ground_height
    }
}

impl SpatialQuery for StaticWorld {
    fn nearby(&self, point: Vec3, radius: f32) -> Vec<ObstacleHit> {
        // Coarse pass: anything whose horizontal center distance could allow
        // a sphere intersection.
        let reach = radius + self.max_obstacle_radius;
        self.spatial_idx
            .locate_within_distance([point.x, point.z], reach * reach)
            .filter_map(|entry| {
                let obstacle = &self.obstacles[entry.idx];
                let distance = point.distance(obstacle.center);
                (distance <= radius + obstacle.radius).then_some(ObstacleHit {
                    center: obstacle.center,
                    radius: obstacle.radius,
                    distance,
                })
            })
            .collect()
    }

    fn ground_height(&self, point: Vec3) -> Option<f32> {
        let inside = point.x >= self.ground_min[0]
            && point.x <= self.ground_max[0]
            && point.z >= self.ground_min[1]
            && point.z <= self.ground_max[1];
        inside.then_some(self.ground_height)
    }

    fn nearest_ground(&self, point: Vec3) -> Option<Vec3> {
        // The footprint is a rectangle, so the nearest ground point is the
        // clamp of the query point into it.
        let x = point.x.clamp(self.ground_min[0], self.ground_max[0]);
        let z = point.z.clamp(self.ground_min[1], self.ground_max[1]);
        Some(Vec3::new(x, self.ground_height, z))
    }
}

// ── WorldBuilder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`StaticWorld`].
///
/// # Example
///
/// ```rust
/// use fleet_core::Vec3;
/// use fleet_world::WorldBuilder;
///
/// let world = WorldBuilder::new()
///     .ground(-500.0, -500.0, 500.0, 500.0, 0.0)
///     .obstacle(Vec3::new(50.0, 20.0, 50.0), 10.0)
///     .build();
/// ```
pub struct WorldBuilder {
    ground_min:    [f32; 2],
    ground_max:    [f32; 2],
    ground_height: f32,
    obstacles:     Vec<Obstacle>,
}

impl WorldBuilder {
    /// Start with a 1 km × 1 km ground square centered on the origin at
    /// height 0 and no obstacles.
    pub fn new() -> Self {
        Self {
            ground_min:    [-500.0, -500.0],
            ground_max:    [500.0, 500.0],
            ground_height: 0.0,
            obstacles:     Vec::new(),
        }
    }

    /// Set the ground rectangle and its height.
    pub fn ground(mut self, min_x: f32, min_z: f32, max_x: f32, max_z: f32, height: f32) -> Self {
        self.ground_min = [min_x, min_z];
        self.ground_max = [max_x, max_z];
        self.ground_height = height;
        self
    }

    /// Add one obstacle.
    pub fn obstacle(mut self, center: Vec3, radius: f32) -> Self {
        self.obstacles.push(Obstacle { center, radius });
        self
    }

    /// Add a rectangular grid of `nx × nz` obstacles with `spacing` between
    /// centers, centered on the origin.  Convenient for synthetic city
    /// blocks in demos and tests.
    pub fn obstacle_grid(mut self, nx: usize, nz: usize, spacing: f32, height: f32, radius: f32) -> Self {
        let x0 = -(nx.saturating_sub(1) as f32) * spacing * 0.5;
        let z0 = -(nz.saturating_sub(1) as f32) * spacing * 0.5;
        for i in 0..nx {
            for j in 0..nz {
                let center = Vec3::new(x0 + i as f32 * spacing, height, z0 + j as f32 * spacing);
                self.obstacles.push(Obstacle { center, radius });
            }
        }
        self
    }

    /// Build the world and its spatial index.
    pub fn build(self) -> StaticWorld {
        let entries: Vec<ObstacleEntry> = self
            .obstacles
            .iter()
            .enumerate()
            .map(|(idx, o)| ObstacleEntry { point: [o.center.x, o.center.z], idx })
            .collect();

        let max_obstacle_radius = self
            .obstacles
            .iter()
            .map(|o| o.radius)
            .fold(0.0_f32, f32::max);

        StaticWorld {
            ground_min:    self.ground_min,
            ground_max:    self.ground_max,
            ground_height: self.ground_height,
            obstacles:     self.obstacles,
            spatial_idx:   RTree::bulk_load(entries),
            max_obstacle_radius,
        }
    }
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}
