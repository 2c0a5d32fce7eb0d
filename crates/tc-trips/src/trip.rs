//! Completed trips and their legs.

use std::collections::BTreeMap;

use tc_core::{AgentId, EventTime, FacilityId, LinkId, Mode};

/// One movement segment inside a trip.
///
/// Opened by a departure event and closed by the following arrival event,
/// at which point `travel_time` is set.  A leg still open when its trip
/// completes keeps `travel_time = None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub mode:           Mode,
    pub departure_time: EventTime,
    /// Seconds from departure to arrival.
    pub travel_time:    Option<f64>,
}

impl Leg {
    #[inline]
    pub fn new(mode: Mode, departure_time: EventTime) -> Self {
        Self { mode, departure_time, travel_time: None }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.travel_time.is_some()
    }

    /// Set the travel time from an arrival at `arrival`.  No-op if the leg
    /// was already closed.
    pub fn close(&mut self, arrival: EventTime) {
        if self.travel_time.is_none() {
            self.travel_time = Some(arrival - self.departure_time);
        }
    }

    pub fn arrival_time(&self) -> Option<EventTime> {
        self.travel_time.map(|tt| self.departure_time + tt)
    }
}

/// A completed door-to-door journey between two real activities.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub departure_link:     LinkId,
    pub arrival_link:       LinkId,
    pub departure_facility: Option<FacilityId>,
    pub arrival_facility:   Option<FacilityId>,
    pub departure_time:     EventTime,
    pub arrival_time:       EventTime,
    /// Dominant mode, resolved when the trip completed.
    pub main_mode:          Mode,
    pub legs:               Vec<Leg>,
}

impl Trip {
    /// Seconds between leaving the origin activity and starting the
    /// destination activity (includes waits at stage activities).
    #[inline]
    pub fn duration(&self) -> f64 {
        self.arrival_time - self.departure_time
    }

    /// Sum of closed leg travel times.
    pub fn in_vehicle_time(&self) -> f64 {
        self.legs.iter().filter_map(|l| l.travel_time).sum()
    }

    /// Leg modes in travel order.
    pub fn leg_modes(&self) -> impl Iterator<Item = Mode> + '_ {
        self.legs.iter().map(|l| l.mode)
    }
}

/// Snapshot of completed trips: agent → trips in completion order.
pub type TripMap = BTreeMap<AgentId, Vec<Trip>>;
