//! Demand partitioning: iterative centroid clustering and random split.

use fleet_core::vec3::mean;
use fleet_core::{Method, SimRng, Vec3};

use crate::{ClusterError, ClusterResult};

// ── Partition ─────────────────────────────────────────────────────────────────

/// The result of clustering: one center and one point list per truck slot.
#[derive(Clone, Debug)]
pub struct Partition {
    /// Computed truck centers, one per slot.
    pub centers: Vec<Vec3>,
    /// Points assigned to each slot, parallel to `centers`.
    pub assignment: Vec<Vec<Vec3>>,
}

impl Partition {
    /// Check the structural contract: `k` centers and `k` point lists.
    ///
    /// A violation is trial-fatal — the coordinator aborts the trial
    /// without spawning agents.
    pub fn validate(&self, k: usize) -> ClusterResult<()> {
        if self.centers.len() != k || self.assignment.len() != k {
            return Err(ClusterError::CountMismatch {
                expected: k,
                centers:  self.centers.len(),
                assigned: self.assignment.len(),
            });
        }
        Ok(())
    }

    /// Total number of assigned points across all slots.
    pub fn assigned_count(&self) -> usize {
        self.assignment.iter().map(Vec::len).sum()
    }
}

/// Partition `points` into `k` slots with the given method.
///
/// `epsilon` and `max_iterations` only apply to the centroid method.
pub fn cluster(
    points:         &[Vec3],
    k:              usize,
    method:         Method,
    epsilon:        f32,
    max_iterations: usize,
    rng:            &mut SimRng,
) -> ClusterResult<Partition> {
    if k == 0 {
        return Err(ClusterError::ZeroTrucks);
    }
    if points.is_empty() {
        return Err(ClusterError::NoPoints);
    }
    let partition = match method {
        Method::Centroid => kmeans(points, k, epsilon, max_iterations, rng),
        Method::Random   => random_partition(points, k, rng),
    };
    partition.validate(k)?;
    Ok(partition)
}

// ── Centroid method ───────────────────────────────────────────────────────────

/// Standard Lloyd's-iteration k-means.
///
/// Initial centers are sampled from `points` uniformly **with replacement**:
/// duplicate initial centers are possible, and a cluster that ends up empty
/// keeps its stale center and is never re-seeded.  Callers wanting k
/// distinct sites must cope with empty assignments.
///
/// Iteration stops when no center moves farther than `epsilon`, or after
/// `max_iterations` as a defensive bound.
pub fn kmeans(
    points:         &[Vec3],
    k:              usize,
    epsilon:        f32,
    max_iterations: usize,
    rng:            &mut SimRng,
) -> Partition {
    let mut centers: Vec<Vec3> = (0..k)
        .map(|_| points[rng.gen_range(0..points.len())])
        .collect();

    let mut clusters: Vec<Vec<Vec3>> = vec![Vec::new(); k];

    for _ in 0..max_iterations {
        for cluster in &mut clusters {
            cluster.clear();
        }
        for &point in points {
            clusters[nearest_center(point, &centers)].push(point);
        }

        let mut moved = false;
        for (center, members) in centers.iter_mut().zip(&clusters) {
            if members.is_empty() {
                continue; // stale center kept as-is
            }
            let updated = mean(members);
            if center.distance(updated) > epsilon {
                *center = updated;
                moved = true;
            }
        }

        if !moved {
            break;
        }
    }

    Partition { centers, assignment: clusters }
}

/// Index of the center nearest to `point`; ties break to the lowest index.
pub(crate) fn nearest_center(point: Vec3, centers: &[Vec3]) -> usize {
    let mut nearest = 0;
    let mut nearest_d = point.distance(centers[0]);
    for (i, &center) in centers.iter().enumerate().skip(1) {
        let d = point.distance(center);
        if d < nearest_d {
            nearest = i;
            nearest_d = d;
        }
    }
    nearest
}

// ── Random method ─────────────────────────────────────────────────────────────

/// Shuffle, split into `count / k` contiguous chunks, then hand the
/// remainder out one point at a time to randomly chosen slots.  Each slot's
/// center is the arithmetic mean of its members.
///
/// Every input point lands in exactly one slot.
pub fn random_partition(points: &[Vec3], k: usize, rng: &mut SimRng) -> Partition {
    let mut shuffled = points.to_vec();
    rng.shuffle(&mut shuffled);

    let per_slot = points.len() / k;
    let mut assignment: Vec<Vec<Vec3>> = (0..k)
        .map(|i| shuffled[i * per_slot..(i + 1) * per_slot].to_vec())
        .collect();

    for &leftover in &shuffled[per_slot * k..] {
        let slot = rng.gen_range(0..k);
        assignment[slot].push(leftover);
    }

    let centers = assignment.iter().map(|members| mean(members)).collect();
    Partition { centers, assignment }
}
