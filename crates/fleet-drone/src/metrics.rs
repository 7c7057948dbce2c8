//! Per-drone flight-time and maneuver counters.

/// Counters accumulated over a drone's lifetime.
///
/// Flight time advances every tick the drone is alive; the horizontal and
/// vertical splits advance only in the corresponding movement phases, so
/// they do not sum to the total (`Deliver` and `Completed` count toward
/// neither).  Each counter has an in-proximity twin that advances only
/// while at least one other drone is inside the proximity radius.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FlightMetrics {
    /// Drone-repulsion terms applied (one per neighbour per tick).
    pub avoidance_maneuvers: u32,
    pub flight_time: f32,
    pub flight_time_in_proximity: f32,
    pub flight_time_horizontal: f32,
    pub flight_time_horizontal_proximity: f32,
    pub flight_time_vertical: f32,
    pub flight_time_vertical_proximity: f32,
}

impl FlightMetrics {
    /// Advance the counters by one tick.
    pub(crate) fn record_tick(&mut self, dt: f32, horizontal: bool, vertical: bool, in_proximity: bool) {
        self.flight_time += dt;
        if in_proximity {
            self.flight_time_in_proximity += dt;
        }
        if horizontal {
            self.flight_time_horizontal += dt;
            if in_proximity {
                self.flight_time_horizontal_proximity += dt;
            }
        } else if vertical {
            self.flight_time_vertical += dt;
            if in_proximity {
                self.flight_time_vertical_proximity += dt;
            }
        }
    }
}
