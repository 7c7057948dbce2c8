//! `fleet-drone` — the per-drone flight agent.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`state`]     | `FlightState` — the delivery route state machine       |
//! | [`agent`]     | `DroneAgent`, `TickContext`, `TickOutput`              |
//! | [`avoidance`] | inverse-square potential-field steering force          |
//! | [`metrics`]   | `FlightMetrics` — per-drone flight-time counters       |
//! | [`events`]    | `DroneEvent` — lifecycle and metric events             |
//!
//! # Tick discipline
//!
//! The coordinator snapshots every live drone's position **before** ticking
//! any of them, then calls [`DroneAgent::tick`] once per drone with that
//! snapshot.  All neighbour reads go through the snapshot, so evaluation
//! order across agents cannot affect the result and no agent ever sees a
//! partially-updated neighbour.  The agent mutates only itself; everything
//! the coordinator must act on (events, demand destruction, category
//! changes, completion) comes back in [`TickOutput`].

pub mod agent;
pub mod avoidance;
pub mod events;
pub mod metrics;
pub mod state;


pub use agent::{DroneAgent, TickContext, TickOutput};
pub use avoidance::avoidance_force;
pub use events::DroneEvent;
pub use metrics::FlightMetrics;
pub use state::FlightState;
