//! Outcome categories and the single-writer category map.
//!
//! Every spawned drone is in exactly one category at all times, starting as
//! an undelivered, unbottlenecked drone.  Only the coordinator mutates the
//! map, through [`CategoryMap::assign`], which removes the drone from its
//! old bucket and adds it to the new one atomically — the bucket counts can
//! never double-count or lose a drone.

use fleet_core::DroneId;
use rustc_hash::FxHashMap;

/// The four outcome buckets of a trial.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    SuccessNoBottleneck,
    SuccessBottleneck,
    FailNoBottleneck,
    FailBottleneck,
}

impl Category {
    pub const COUNT: usize = 4;

    /// All categories in report-column order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::SuccessNoBottleneck,
        Category::SuccessBottleneck,
        Category::FailNoBottleneck,
        Category::FailBottleneck,
    ];

    /// The bucket for a drone with the given flags.
    pub fn from_flags(delivered: bool, bottlenecked: bool) -> Category {
        match (delivered, bottlenecked) {
            (true, false)  => Category::SuccessNoBottleneck,
            (true, true)   => Category::SuccessBottleneck,
            (false, false) => Category::FailNoBottleneck,
            (false, true)  => Category::FailBottleneck,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Category::SuccessNoBottleneck => 0,
            Category::SuccessBottleneck   => 1,
            Category::FailNoBottleneck    => 2,
            Category::FailBottleneck      => 3,
        }
    }

    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Category::SuccessNoBottleneck | Category::SuccessBottleneck)
    }

    /// Column prefix used in the exported report.
    pub fn label(self) -> &'static str {
        match self {
            Category::SuccessNoBottleneck => "SuccessfulNoBottlenecks",
            Category::SuccessBottleneck   => "SuccessfulBottlenecks",
            Category::FailNoBottleneck    => "UnsuccessfulNoBottlenecks",
            Category::FailBottleneck      => "UnsuccessfulBottlenecks",
        }
    }
}

// ── CategoryMap ───────────────────────────────────────────────────────────────

/// Tracks which bucket each spawned drone is in, with per-bucket counts.
///
/// Invariant: `counts` sums to the number of distinct drones ever assigned.
#[derive(Default)]
pub struct CategoryMap {
    assigned: FxHashMap<DroneId, Category>,
    counts:   [usize; Category::COUNT],
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `drone` into `category`, leaving its previous bucket if it had
    /// one.
    pub fn assign(&mut self, drone: DroneId, category: Category) {
        if let Some(previous) = self.assigned.insert(drone, category) {
            self.counts[previous.index()] -= 1;
        }
        self.counts[category.index()] += 1;
    }

    pub fn category_of(&self, drone: DroneId) -> Option<Category> {
        self.assigned.get(&drone).copied()
    }

    #[inline]
    pub fn count(&self, category: Category) -> usize {
        self.counts[category.index()]
    }

    /// Total drones tracked — always equals the number spawned this trial.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Drones currently in either success bucket.
    pub fn success_count(&self) -> usize {
        self.count(Category::SuccessNoBottleneck) + self.count(Category::SuccessBottleneck)
    }
}
