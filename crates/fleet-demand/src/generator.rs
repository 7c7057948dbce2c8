//! Rejection-sampling demand generation.
//!
//! # Algorithm
//!
//! Until `count` points are placed or the overall budget (`count * 10`
//! attempts) is spent:
//!
//! 1. pick a source location uniformly at random;
//! 2. sample a horizontal offset within a disk of `radius` around it
//!    (up to [`CANDIDATE_RETRY_CAP`] resamples per placement);
//! 3. accept iff the ground query succeeds directly below the candidate
//!    (snapping its height to ground) and no obstacle lies within
//!    `clearance` of it.
//!
//! Stopping short is not an error: the shortfall is carried in the returned
//! [`DemandSet`] for the coordinator to surface as a warning.

use fleet_core::{SimRng, Vec3};
use fleet_world::SpatialQuery;

use crate::{DemandError, DemandResult};

/// Resamples allowed per placement before giving up on that candidate.
pub const CANDIDATE_RETRY_CAP: usize = 100;

/// Overall attempt budget multiplier: generation stops after
/// `count * ATTEMPT_BUDGET_FACTOR` placements have been tried.
pub const ATTEMPT_BUDGET_FACTOR: usize = 10;

// ── DemandSet ─────────────────────────────────────────────────────────────────

/// The outcome of one generation run: ground-snapped, duplicate-free points
/// plus how many of the requested placements could not be satisfied.
#[derive(Clone, Debug)]
pub struct DemandSet {
    /// Accepted delivery destinations.
    pub points: Vec<Vec3>,
    /// How many points were requested.
    pub requested: usize,
}

impl DemandSet {
    /// Number of requested points that could not be placed.
    pub fn shortfall(&self) -> usize {
        self.requested - self.points.len()
    }

    /// `true` if generation stopped short of the requested count.
    pub fn is_short(&self) -> bool {
        self.shortfall() > 0
    }
}

// ── DemandGenerator ───────────────────────────────────────────────────────────

/// Generates delivery points near source locations.
pub struct DemandGenerator {
    /// Sampling disk radius around each source.
    pub radius: f32,
    /// Minimum obstacle clearance for an accepted point.
    pub clearance: f32,
}

impl DemandGenerator {
    pub fn new(radius: f32, clearance: f32) -> Self {
        Self { radius, clearance }
    }

    /// Generate up to `count` valid demand points near `sources`.
    ///
    /// Returns [`DemandError::NoSources`] if `sources` is empty; every other
    /// failure mode degrades to a shorter `DemandSet`.
    pub fn generate<W: SpatialQuery>(
        &self,
        world:   &W,
        sources: &[Vec3],
        count:   usize,
        rng:     &mut SimRng,
    ) -> DemandResult<DemandSet> {
        if sources.is_empty() {
            return Err(DemandError::NoSources);
        }

        let mut points: Vec<Vec3> = Vec::with_capacity(count);
        let mut attempts = 0;
        let budget = count * ATTEMPT_BUDGET_FACTOR;

        while points.len() < count && attempts < budget {
            // `sources` is non-empty, so `choose` cannot fail.
            let source = self.choose_source(sources, rng);
            if let Some(candidate) = self.sample_near(world, source, rng)
                && self.is_valid(world, candidate, &points)
            {
                points.push(candidate);
            }
            attempts += 1;
        }

        Ok(DemandSet { points, requested: count })
    }

    fn choose_source(&self, sources: &[Vec3], rng: &mut SimRng) -> Vec3 {
        *rng.choose(sources).unwrap_or(&Vec3::ZERO)
    }

    /// Sample a ground-snapped candidate within the disk around `source`.
    ///
    /// Resamples until the offset lands on valid, clear ground, giving up
    /// (returning the `None`) after [`CANDIDATE_RETRY_CAP`] tries.
    fn sample_near<W: SpatialQuery>(
        &self,
        world:  &W,
        source: Vec3,
        rng:    &mut SimRng,
    ) -> Option<Vec3> {
        for _ in 0..CANDIDATE_RETRY_CAP {
            let offset = disk_sample(rng) * self.radius;
            let candidate = (source + offset).horizontal();
            if let Some(ground) = world.ground_height(candidate)
                && !world.obstructed(candidate.with_y(ground), self.clearance)
            {
                return Some(candidate.with_y(ground));
            }
        }
        None
    }

    /// Final validity check on an already-snapped candidate.
    fn is_valid<W: SpatialQuery>(&self, world: &W, candidate: Vec3, accepted: &[Vec3]) -> bool {
        world.ground_height(candidate).is_some()
            && !world.obstructed(candidate, self.clearance)
            && accepted.iter().all(|&p| p != candidate)
    }
}

/// Uniform sample inside the unit sphere, projected onto the horizontal
/// plane.  The projection is slightly center-weighted compared to a uniform
/// disk, so demand skews toward its source.
fn disk_sample(rng: &mut SimRng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..=1.0f32),
            rng.gen_range(-1.0..=1.0f32),
            rng.gen_range(-1.0..=1.0f32),
        );
        if v.length_sq() <= 1.0 {
            return v.horizontal();
        }
    }
}
