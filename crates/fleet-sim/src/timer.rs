//! `TimerQueue` — sparse deferred-action queue for the coordinator.
//!
//! # Why this exists
//!
//! A trial has a handful of things that must happen at a future tick:
//! staggered drone deployments, the periodic timeout check, and destroying
//! completed drones one tick after they report.  Scanning for due work every
//! tick would cost O(pending) per tick; the queue inverts it so each tick
//! drains only the actions scheduled for exactly that tick.
//!
//! # Epochs
//!
//! Every event carries the epoch of the trial that armed it.  Each trial
//! starts by bumping the coordinator's epoch instead of hunting down and
//! cancelling individual events; the drain loop drops anything stale.  This
//! replaces manual unsubscribe bookkeeping and cannot leak callbacks across
//! trials.

use std::collections::BTreeMap;

use fleet_core::{DemandId, DroneId, Tick, TruckId, Vec3};

/// A deferred coordinator action.
#[derive(Clone, Debug, PartialEq)]
pub enum TimerAction {
    /// Spawn one drone at its truck and start its route.
    DeployDrone {
        drone: DroneId,
        demand: DemandId,
        truck: TruckId,
        truck_position: Vec3,
        target: Vec3,
    },
    /// Periodic check of the trial against `max_simulation_time`.
    TimeoutCheck,
    /// Remove a completed drone from the trial.
    DestroyDrone(DroneId),
}

/// One queued action, tagged with the trial that scheduled it.
#[derive(Clone, Debug, PartialEq)]
pub struct TimerEvent {
    pub epoch:  u64,
    pub action: TimerAction,
}

/// Maps ticks → actions due at that tick.
#[derive(Default)]
pub struct TimerQueue {
    inner: BTreeMap<Tick, Vec<TimerEvent>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` for `tick` on behalf of trial `epoch`.
    pub fn push(&mut self, tick: Tick, epoch: u64, action: TimerAction) {
        self.inner.entry(tick).or_default().push(TimerEvent { epoch, action });
        self.total += 1;
    }

    /// Remove and return everything due at exactly `tick`.
    ///
    /// Returns `None` when nothing is due (the common case — avoids an
    /// allocation).  Callers must still filter by epoch.
    pub fn drain_tick(&mut self, tick: Tick) -> Option<Vec<TimerEvent>> {
        let events = self.inner.remove(&tick)?;
        self.total -= events.len();
        Some(events)
    }

    /// Drop every entry scheduled before `tick`.  Called as each trial
    /// starts so skipped-over stale events cannot accumulate across a long
    /// sweep.
    pub fn purge_before(&mut self, tick: Tick) {
        self.inner = self.inner.split_off(&tick);
        self.total = self.inner.values().map(Vec::len).sum();
    }

    /// The earliest tick with at least one queued action, or `None`.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
