//! The per-drone agent: route following, steering, stuck recovery.
//!
//! One `DroneAgent` is created per demand point at deployment and destroyed
//! after it reports completion.  Each tick the coordinator hands the agent a
//! [`TickContext`] holding the pre-tick position snapshot of every live
//! drone; the agent advances its own state and position and returns a
//! [`TickOutput`] describing everything the coordinator must act on.

use fleet_core::{DemandId, DroneId, DroneRng, SimParams, Tick, Vec3};
use fleet_world::SpatialQuery;
use rustc_hash::FxHashSet;

use crate::avoidance::avoidance_force;
use crate::events::DroneEvent;
use crate::metrics::FlightMetrics;
use crate::state::FlightState;

/// Displacement below which a drone is considered to not have moved over a
/// position-check interval.
const STUCK_DISPLACEMENT: f32 = 0.5;

// ── TickContext / TickOutput ──────────────────────────────────────────────────

/// Read-only per-tick inputs shared by every agent.
///
/// `neighbors` is the position snapshot taken before any agent ticked, so
/// the result of a tick never depends on agent evaluation order.
pub struct TickContext<'a, W: SpatialQuery> {
    pub now: Tick,
    /// Seconds this tick represents.
    pub dt: f32,
    pub params: &'a SimParams,
    pub world: &'a W,
    /// Snapshot of every live drone's position, including this one's.
    pub neighbors: &'a [(DroneId, Vec3)],
}

/// Everything a tick asks the coordinator to do.
#[derive(Debug, Default, PartialEq)]
pub struct TickOutput {
    pub events: Vec<DroneEvent>,
    /// Set when the package is dropped; the coordinator removes the demand
    /// point from the world.
    pub delivered_demand: Option<DemandId>,
    /// The agent's (delivered, bottlenecked) pair changed; the coordinator
    /// must refresh the agent's outcome category.
    pub recategorize: bool,
    /// The route finished; the coordinator destroys the agent next tick.
    pub completed: bool,
}

// ── DroneAgent ────────────────────────────────────────────────────────────────

/// A single drone flying one out-and-back delivery route.
pub struct DroneAgent {
    id: DroneId,
    position: Vec3,
    state: FlightState,

    /// The demand point this drone serves.
    demand: DemandId,
    target: Vec3,
    truck_position: Vec3,

    delivered: bool,
    bottlenecked: bool,
    /// Set when the drone cannot operate (no ground under its truck).  An
    /// inert drone ignores every tick.
    inert: bool,

    rng: DroneRng,

    // Stuck detection.  Displacement is sampled every
    // `position_check_interval`; consecutive near-zero samples accumulate
    // into `stuck_time`, which decays the avoidance strength and, past the
    // threshold, perturbs the heading.
    avoidance_strength: f32,
    check_timer: f32,
    stuck_time: f32,
    last_check_pos: Vec3,

    encountered: FxHashSet<DroneId>,
    metrics: FlightMetrics,
}

impl DroneAgent {
    /// Create a drone sitting on its truck, ready to ascend.
    pub fn new(
        id: DroneId,
        trial_seed: u64,
        truck_position: Vec3,
        demand: DemandId,
        target: Vec3,
        params: &SimParams,
    ) -> Self {
        Self {
            id,
            position: truck_position,
            state: FlightState::Ascend,
            demand,
            target,
            truck_position,
            delivered: false,
            bottlenecked: false,
            inert: false,
            rng: DroneRng::new(trial_seed, id),
            avoidance_strength: params.drone_avoidance_strength,
            check_timer: 0.0,
            stuck_time: 0.0,
            last_check_pos: truck_position,
            encountered: FxHashSet::default(),
            metrics: FlightMetrics::default(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> DroneId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn state(&self) -> FlightState {
        self.state
    }

    #[inline]
    pub fn delivered(&self) -> bool {
        self.delivered
    }

    #[inline]
    pub fn bottlenecked(&self) -> bool {
        self.bottlenecked
    }

    #[inline]
    pub fn metrics(&self) -> &FlightMetrics {
        &self.metrics
    }

    /// Distinct other drones ever seen inside the proximity radius.
    #[inline]
    pub fn encounter_count(&self) -> usize {
        self.encountered.len()
    }

    /// Permanently ground the drone.  Called by the coordinator when the
    /// drone's truck has no ground under it.
    pub fn mark_inert(&mut self) {
        self.inert = true;
    }

    #[inline]
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the drone by one tick.
    pub fn tick<W: SpatialQuery>(&mut self, ctx: &TickContext<'_, W>) -> TickOutput {
        let mut out = TickOutput::default();
        if self.inert || self.state == FlightState::Completed {
            return out;
        }

        let in_proximity = self.track_proximity(ctx, &mut out);

        match self.state {
            FlightState::Deliver { until } => {
                if ctx.now >= until {
                    self.advance_state(ctx, &mut out);
                }
            }
            _ => self.fly(ctx, &mut out),
        }

        self.update_stuck(ctx, &mut out);

        self.metrics.record_tick(
            ctx.dt,
            self.state.is_horizontal(),
            self.state.is_vertical(),
            in_proximity,
        );
        out.events.push(DroneEvent::FlightTimeUpdate(self.metrics.flight_time));
        if in_proximity {
            out.events.push(DroneEvent::FlightTimeInProximityUpdate(
                self.metrics.flight_time_in_proximity,
            ));
        }

        out
    }

    /// The point the current state steers toward.
    fn goal(&self, params: &SimParams) -> Vec3 {
        match self.state {
            // Straight up from wherever the drone currently is.
            FlightState::Ascend => self.position.with_y(params.flight_height),
            FlightState::MoveToTarget => self.target.with_y(params.flight_height),
            FlightState::DescendToHover => self.target.with_y(self.target.y + params.hover_height),
            FlightState::AscendBack => self.target.with_y(params.flight_height),
            FlightState::MoveToTruck => self.truck_position.with_y(params.flight_height),
            FlightState::DescendBack => self.truck_position,
            // Unreachable from `tick`; hold position.
            FlightState::Deliver { .. } | FlightState::Completed => self.position,
        }
    }

    /// Steer toward the current goal and transition on arrival.
    fn fly<W: SpatialQuery>(&mut self, ctx: &TickContext<'_, W>, out: &mut TickOutput) {
        let goal = self.goal(ctx.params);

        let (force, maneuvers) = avoidance_force(
            self.id,
            self.position,
            ctx.neighbors,
            ctx.world,
            ctx.params,
            self.avoidance_strength,
        );
        self.metrics.avoidance_maneuvers += maneuvers;
        for _ in 0..maneuvers {
            out.events.push(DroneEvent::AvoidanceManeuver);
        }

        let mut dir = ((goal - self.position).normalized() + force).normalized();

        // Keep the cruise ceiling and the ground as hard bounds regardless
        // of what the repulsion field wants.
        let step = ctx.params.speed * ctx.dt;
        if dir.y > 0.0 && self.position.y + dir.y * step > ctx.params.flight_height {
            dir.y = 0.0;
        }
        if dir.y < 0.0
            && let Some(ground) = ctx.world.ground_height(self.position)
            && self.position.y + dir.y * step < ground
        {
            dir.y = 0.0;
        }

        // Stuck escape: inject horizontal noise, deliberately without
        // renormalizing, so the escape step can exceed unit length.
        if self.stuck_time > ctx.params.stuck_time_threshold {
            dir.x += self.rng.gen_range(-1.0f32..1.0);
            dir.z += self.rng.gen_range(-1.0f32..1.0);
        }

        self.position += dir * step;

        if self.position.distance(goal) <= ctx.params.delivery_distance_threshold {
            self.advance_state(ctx, out);
        }
    }

    /// Move to the successor state and run its entry action exactly once.
    fn advance_state<W: SpatialQuery>(&mut self, ctx: &TickContext<'_, W>, out: &mut TickOutput) {
        self.state = match self.state {
            FlightState::Ascend => FlightState::MoveToTarget,
            FlightState::MoveToTarget => FlightState::DescendToHover,
            FlightState::DescendToHover => {
                // The package is dropped on entry; the hold that follows
                // models unloading time.
                out.delivered_demand = Some(self.demand);
                let wait = ticks_for(ctx.params.delivery_time, ctx.dt);
                FlightState::Deliver { until: ctx.now + wait }
            }
            FlightState::Deliver { .. } => {
                self.delivered = true;
                out.recategorize = true;
                FlightState::AscendBack
            }
            FlightState::AscendBack => FlightState::MoveToTruck,
            FlightState::MoveToTruck => FlightState::DescendBack,
            FlightState::DescendBack => {
                out.events.push(if self.delivered {
                    DroneEvent::SuccessfulDelivery(self.id)
                } else {
                    DroneEvent::FailedDelivery(self.id)
                });
                out.recategorize = true;
                out.completed = true;
                FlightState::Completed
            }
            FlightState::Completed => FlightState::Completed,
        };
    }

    /// Record encounters and report whether any other drone is currently
    /// inside the proximity radius.
    fn track_proximity<W: SpatialQuery>(
        &mut self,
        ctx: &TickContext<'_, W>,
        out: &mut TickOutput,
    ) -> bool {
        let mut in_proximity = false;
        for &(id, pos) in ctx.neighbors {
            if id == self.id {
                continue;
            }
            if self.position.distance(pos) <= ctx.params.proximity_radius {
                in_proximity = true;
                if self.encountered.insert(id) {
                    out.events.push(DroneEvent::DroneEncounter);
                }
            }
        }
        in_proximity
    }

    /// Sample displacement once per check interval and adjust the stuck
    /// timer and avoidance strength.
    fn update_stuck<W: SpatialQuery>(&mut self, ctx: &TickContext<'_, W>, out: &mut TickOutput) {
        self.check_timer += ctx.dt;
        if self.check_timer < ctx.params.position_check_interval {
            return;
        }
        // The delivery hold is intentional stillness, not congestion.
        if !self.state.is_delivering() {
            if self.position.distance(self.last_check_pos) < STUCK_DISPLACEMENT {
                self.stuck_time += self.check_timer;
                if self.stuck_time > ctx.params.stuck_time_threshold {
                    if !self.bottlenecked {
                        self.bottlenecked = true;
                        out.recategorize = true;
                    }
                    // Yield: weaker repulsion lets jammed drones slide past
                    // each other.
                    self.avoidance_strength = (self.avoidance_strength * 0.5)
                        .max(ctx.params.min_drone_avoidance_strength);
                }
            } else {
                self.stuck_time = 0.0;
                self.avoidance_strength = (self.avoidance_strength * 2.0)
                    .min(ctx.params.drone_avoidance_strength);
            }
        }
        self.last_check_pos = self.position;
        self.check_timer = 0.0;
    }
}

/// Ticks spanning `secs` seconds at `dt` seconds per tick, rounded up.
fn ticks_for(secs: f32, dt: f32) -> u64 {
    (secs / dt).ceil().max(0.0) as u64
}
