//! `fleet-sim` — sweep and trial orchestration.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`coordinator`] | `FleetCoordinator` — runs the sweep tick by tick      |
//! | [`category`]    | `Category`, `CategoryMap` — drone outcome buckets     |
//! | [`timer`]       | `TimerQueue` — epoch-tagged deferred actions          |
//! | [`report`]      | `TrialConfig`, `TrialReport`, `CategoryMetrics`       |
//! | [`observer`]    | `FleetObserver` — progress, events, warnings, rows    |
//! | [`error`]       | `SimError` / `SimResult`                              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fleet_core::{SimParams, Vec3};
//! use fleet_sim::{FleetCoordinator, NoopObserver};
//! use fleet_world::WorldBuilder;
//!
//! let world = WorldBuilder::new().obstacle_grid(8, 8, 60.0, 20.0, 10.0).build();
//! let sources = world.obstacle_centers();
//! let mut coordinator = FleetCoordinator::new(world, SimParams::default(), sources)?;
//! let reports = coordinator.run_sweep(&mut NoopObserver)?;
//! ```

pub mod category;
pub mod coordinator;
pub mod error;
pub mod observer;
pub mod report;
pub mod timer;


pub use category::{Category, CategoryMap};
pub use coordinator::FleetCoordinator;
pub use error::{SimError, SimResult};
pub use observer::{FleetObserver, NoopObserver};
pub use report::{CategoryMetrics, TrialConfig, TrialReport};
pub use timer::{TimerAction, TimerEvent, TimerQueue};
