//! The delivery route state machine.
//!
//! A drone flies a fixed out-and-back route:
//!
//! ```text
//! Ascend → MoveToTarget → DescendToHover → Deliver
//!        → AscendBack → MoveToTruck → DescendBack → Completed
//! ```
//!
//! All transitions are unconditional progressions driven by reaching the
//! current state's target point, except `Deliver`, which holds until its
//! deadline tick.  Entry actions run exactly once, at the moment
//! [`DroneAgent`][crate::DroneAgent] advances the state — there are no
//! per-tick "already started" flags.

use fleet_core::Tick;

/// Where a drone is in its delivery route.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlightState {
    /// Climb vertically from the truck to cruise altitude.
    Ascend,
    /// Cruise horizontally toward the demand point.
    MoveToTarget,
    /// Descend to hover height above the demand point.
    DescendToHover,
    /// Hold position while the package is dropped; `until` is the absolute
    /// tick at which the wait expires.
    Deliver { until: Tick },
    /// Climb back to cruise altitude above the demand point.
    AscendBack,
    /// Cruise horizontally back to the truck.
    MoveToTruck,
    /// Descend onto the truck.
    DescendBack,
    /// Route finished; the agent is destroyed one tick later.
    Completed,
}

impl FlightState {
    /// `true` for the two horizontal-cruise states.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, FlightState::MoveToTarget | FlightState::MoveToTruck)
    }

    /// `true` for the four vertical climb/descend states.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            FlightState::Ascend
                | FlightState::DescendToHover
                | FlightState::AscendBack
                | FlightState::DescendBack
        )
    }

    /// `true` while the drone is holding for the delivery wait.
    #[inline]
    pub fn is_delivering(self) -> bool {
        matches!(self, FlightState::Deliver { .. })
    }
}

impl std::fmt::Display for FlightState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FlightState::Ascend         => "Ascend",
            FlightState::MoveToTarget   => "MoveToTarget",
            FlightState::DescendToHover => "DescendToHover",
            FlightState::Deliver { .. } => "Deliver",
            FlightState::AscendBack     => "AscendBack",
            FlightState::MoveToTruck    => "MoveToTruck",
            FlightState::DescendBack    => "DescendBack",
            FlightState::Completed      => "Completed",
        };
        f.write_str(name)
    }
}
