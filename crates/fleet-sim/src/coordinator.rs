//! `FleetCoordinator` — drives the full experiment sweep.
//!
//! # Sweep order
//!
//! Method outermost (`Centroid`, then `Random`); within a method the
//! demand-count index advances fastest, then the truck-count index, then the
//! repetition.  Total trials =
//! `2 × |demand_counts| × |truck_counts| × number_of_runs`.
//!
//! # Trial lifecycle
//!
//! 1. Generate demand points near the configured sources.
//! 2. Cluster them and place one truck per slot (a partition shape mismatch
//!    aborts the trial, never the sweep).
//! 3. Per truck, sort assigned points farthest-first and schedule one drone
//!    per point with a `deployment_delay` stagger.
//! 4. Tick: fire due timers, snapshot all drone positions, tick every drone
//!    against the snapshot in ascending `DroneId` order, apply its output.
//! 5. Complete when the success buckets cover every spawned drone, or when
//!    the periodic timeout check trips `max_simulation_time`.
//! 6. Teardown: fold surviving drones into their buckets, purge stale
//!    timers, report the row, idle through `cooldown_time`.
//!
//! There is exactly one coordinator per sweep and it is plain owned data —
//! nothing here is global.

use std::collections::BTreeMap;

use fleet_cluster::{cluster, place_trucks};
use fleet_core::{DemandId, DroneId, Method, SimClock, SimParams, SimRng, Vec3};
use fleet_demand::DemandGenerator;
use fleet_drone::{DroneAgent, TickContext};
use fleet_world::SpatialQuery;

use crate::category::{Category, CategoryMap};
use crate::observer::FleetObserver;
use crate::report::{TrialConfig, TrialReport};
use crate::timer::{TimerAction, TimerQueue};
use crate::{SimError, SimResult};

/// Seconds between timeout checks.
const TIMEOUT_CHECK_SECS: f32 = 1.0;

// ── Trial-scoped state ────────────────────────────────────────────────────────

/// Everything that lives and dies with one trial.
struct TrialState {
    /// Live drones, keyed for deterministic ascending-ID iteration.
    drones: BTreeMap<DroneId, DroneAgent>,
    categories: CategoryMap,
    spawned: usize,
    /// Trial teardown has begun; ignore further completion triggers.
    completing: bool,
}

impl TrialState {
    fn new() -> Self {
        Self {
            drones: BTreeMap::new(),
            categories: CategoryMap::new(),
            spawned: 0,
            completing: false,
        }
    }
}

// ── FleetCoordinator ──────────────────────────────────────────────────────────

/// Owns the world, the clock, and the timer queue, and runs sweeps.
pub struct FleetCoordinator<W: SpatialQuery> {
    world: W,
    params: SimParams,
    /// Locations demand points are sampled around (typically obstacle
    /// centers — deliveries go near buildings).
    sources: Vec<Vec3>,
    clock: SimClock,
    timers: TimerQueue,
    /// Current trial epoch; timer events from other epochs are stale.
    epoch: u64,
}

impl<W: SpatialQuery> FleetCoordinator<W> {
    /// Create a coordinator.  Fails if `params` cannot produce a sweep.
    pub fn new(world: W, params: SimParams, sources: Vec<Vec3>) -> SimResult<Self> {
        params.validate().map_err(SimError::Config)?;
        let clock = SimClock::new(params.tick_secs);
        Ok(Self {
            world,
            params,
            sources,
            clock,
            timers: TimerQueue::new(),
            epoch: 0,
        })
    }

    #[inline]
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    #[inline]
    pub fn world(&self) -> &W {
        &self.world
    }

    /// Run the whole sweep, returning one report per trial in sweep order.
    pub fn run_sweep<O: FleetObserver>(&mut self, observer: &mut O) -> SimResult<Vec<TrialReport>> {
        let total = self.params.total_trials();
        let mut reports = Vec::with_capacity(total);
        let mut root = SimRng::new(self.params.seed);
        let mut index = 0usize;

        let demand_counts = self.params.demand_counts.clone();
        let truck_counts = self.params.truck_counts.clone();
        let runs = self.params.number_of_runs;

        for method in Method::ALL {
            for run in 0..runs {
                for &truck_count in &truck_counts {
                    for &demand_count in &demand_counts {
                        index += 1;
                        let config = TrialConfig { method, demand_count, truck_count, run };
                        // Child streams make trial N reproducible without
                        // replaying trials 0..N.
                        let mut rng = root.child(index as u64);

                        observer.on_trial_start(index, total, &config);
                        let report = self.run_trial(config, &mut rng, observer);
                        observer.on_trial_end(&report);
                        reports.push(report);

                        self.cooldown();
                    }
                }
            }
        }

        observer.on_sweep_end(reports.len());
        Ok(reports)
    }

    // ── Trial execution ───────────────────────────────────────────────────

    fn run_trial<O: FleetObserver>(
        &mut self,
        config: TrialConfig,
        rng: &mut SimRng,
        observer: &mut O,
    ) -> TrialReport {
        self.epoch += 1;
        let epoch = self.epoch;
        let trial_start = self.clock.current_tick;
        // Anything left over from earlier epochs is stale by definition.
        self.timers.purge_before(trial_start);
        let trial_seed = rng.gen_u64();
        let mut report = TrialReport::new(config);

        // ── Demand ────────────────────────────────────────────────────────
        let generator = DemandGenerator::new(self.params.spawn_radius, self.params.demand_clearance);
        let demand = match generator.generate(&self.world, &self.sources, config.demand_count, rng) {
            Ok(set) => set,
            Err(e) => {
                observer.on_warning(&format!("trial aborted: demand generation failed: {e}"));
                return report;
            }
        };
        if demand.is_short() {
            observer.on_warning(&format!(
                "demand shortfall: placed {} of {} requested points",
                demand.points.len(),
                demand.requested
            ));
        }

        // ── Clustering and truck placement ────────────────────────────────
        let partition = match cluster(
            &demand.points,
            config.truck_count,
            config.method,
            self.params.kmeans_epsilon,
            self.params.kmeans_max_iterations,
            rng,
        ) {
            Ok(p) => p,
            Err(e) => {
                observer.on_warning(&format!("trial aborted: clustering failed: {e}"));
                return report;
            }
        };
        if let Err(e) = partition.validate(config.truck_count) {
            observer.on_warning(&format!("trial aborted: {e}"));
            return report;
        }

        let placement = place_trucks(&self.world, &partition, &self.params, rng);
        if placement.dropped > 0 {
            observer.on_warning(&format!(
                "{} truck slot(s) dropped for separation or ground validity",
                placement.dropped
            ));
        }

        // ── Schedule deployments ──────────────────────────────────────────
        //
        // Farthest deliveries launch first so long routes overlap the
        // stagger instead of extending the trial's tail.
        let mut next_id = 0u32;
        let mut scheduled = 0usize;
        for truck in &placement.trucks {
            let mut targets = truck.assigned.clone();
            targets.sort_by(|a, b| {
                b.distance(truck.position).total_cmp(&a.distance(truck.position))
            });
            for (slot, &target) in targets.iter().enumerate() {
                let delay = slot as f32 * self.params.deployment_delay;
                let due = trial_start.offset(self.clock.ticks_for_secs(delay));
                self.timers.push(due, epoch, TimerAction::DeployDrone {
                    drone: DroneId(next_id),
                    demand: DemandId(next_id),
                    truck: truck.id,
                    truck_position: truck.position,
                    target,
                });
                next_id += 1;
                scheduled += 1;
            }
        }

        if scheduled == 0 {
            observer.on_warning("trial aborted: no deliveries to fly");
            return report;
        }

        self.timers.push(
            trial_start.offset(self.clock.ticks_for_secs(TIMEOUT_CHECK_SECS)),
            epoch,
            TimerAction::TimeoutCheck,
        );

        // ── Tick loop ─────────────────────────────────────────────────────
        let mut trial = TrialState::new();

        loop {
            let now = self.clock.current_tick;

            if let Some(events) = self.timers.drain_tick(now) {
                for event in events {
                    if event.epoch != epoch {
                        continue;
                    }
                    match event.action {
                        TimerAction::DeployDrone { drone, demand, truck: _, truck_position, target } => {
                            let mut agent = DroneAgent::new(
                                drone, trial_seed, truck_position, demand, target, &self.params,
                            );
                            if self.world.ground_height(truck_position).is_none() {
                                observer.on_warning(&format!(
                                    "{drone} has no ground under its truck; grounded"
                                ));
                                agent.mark_inert();
                            }
                            trial.categories.assign(drone, Category::FailNoBottleneck);
                            trial.drones.insert(drone, agent);
                            trial.spawned += 1;
                        }
                        TimerAction::TimeoutCheck => {
                            let elapsed = now.since(trial_start) as f32 * self.clock.tick_secs;
                            if elapsed > self.params.max_simulation_time && !trial.completing {
                                observer.on_warning("trial timeout reached; completing");
                                trial.completing = true;
                            } else {
                                self.timers.push(
                                    now.offset(self.clock.ticks_for_secs(TIMEOUT_CHECK_SECS)),
                                    epoch,
                                    TimerAction::TimeoutCheck,
                                );
                            }
                        }
                        TimerAction::DestroyDrone(drone) => {
                            if let Some(agent) = trial.drones.remove(&drone) {
                                absorb(&mut report, &trial.categories, &agent);
                            }
                        }
                    }
                }
            }

            if trial.completing {
                break;
            }

            // Pre-tick position snapshot: every agent steers against the
            // same view, so evaluation order cannot change the outcome.
            let snapshot: Vec<(DroneId, Vec3)> =
                trial.drones.iter().map(|(&id, a)| (id, a.position())).collect();

            let ids: Vec<DroneId> = trial.drones.keys().copied().collect();
            for id in ids {
                let Some(agent) = trial.drones.get_mut(&id) else { continue };
                let ctx = TickContext {
                    now,
                    dt: self.clock.tick_secs,
                    params: &self.params,
                    world: &self.world,
                    neighbors: &snapshot,
                };
                let out = agent.tick(&ctx);

                for event in &out.events {
                    observer.on_event(now, event);
                }
                if out.recategorize {
                    let category = Category::from_flags(agent.delivered(), agent.bottlenecked());
                    trial.categories.assign(id, category);
                }
                if out.completed {
                    self.timers.push(now.offset(1), epoch, TimerAction::DestroyDrone(id));
                    if !trial.completing && trial.categories.success_count() >= trial.spawned {
                        trial.completing = true;
                    }
                }
            }

            if trial.completing {
                break;
            }
            self.clock.advance();
        }

        // ── Teardown ──────────────────────────────────────────────────────
        for agent in trial.drones.values() {
            absorb(&mut report, &trial.categories, agent);
        }
        for category in Category::ALL {
            report.bucket_mut(category).count = trial.categories.count(category);
        }

        report
    }

    /// Idle the clock between trials so trial-local deadline arithmetic
    /// never collides across epochs.
    fn cooldown(&mut self) {
        let ticks = self.clock.ticks_for_secs(self.params.cooldown_time);
        for _ in 0..ticks {
            self.clock.advance();
        }
    }
}

/// Fold one drone into its current bucket of the report.
fn absorb(report: &mut TrialReport, categories: &CategoryMap, agent: &DroneAgent) {
    let category = categories
        .category_of(agent.id())
        .unwrap_or(Category::FailNoBottleneck);
    report.bucket_mut(category).absorb(agent);
}
