//! Deterministic per-drone and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each drone gets its own independent `SmallRng` seeded by:
//!
//!   seed = trial_seed XOR (drone_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive drone IDs uniformly across the seed space.
//! This means:
//!
//! - Drones never share RNG state (no ordering dependency between agents).
//! - Deploying more drones in a trial does not disturb the seeds of the
//!   drones already in flight — runs are reproducible as fleets grow.
//! - Stuck-escape perturbations are a pure function of (seed, drone, tick
//!   history), so a whole sweep replays identically from one `SimParams`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::DroneId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── DroneRng ──────────────────────────────────────────────────────────────────

/// Per-drone deterministic RNG.
///
/// Create one per drone at deployment; store alongside the agent.  The type
/// is `!Sync` to prevent accidental sharing across threads.
pub struct DroneRng(SmallRng);

impl DroneRng {
    /// Seed deterministically from the trial's seed and a drone ID.
    pub fn new(trial_seed: u64, drone: DroneId) -> Self {
        let seed = trial_seed ^ (drone.0 as u64).wrapping_mul(MIXING_CONSTANT);
        DroneRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for trial-scoped operations: demand sampling,
/// cluster initialization, truck-placement jitter, partition shuffling.
///
/// Used only in single-threaded contexts.  Each trial derives a child from
/// the sweep root so trial N is reproducible without replaying trials 0..N.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — used to give
    /// each trial its own deterministic stream.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Draw a raw 64-bit value — used to derive per-trial drone seeds.
    #[inline]
    pub fn gen_u64(&mut self) -> u64 {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
