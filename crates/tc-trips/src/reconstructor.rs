//! The `TripReconstructor` — per-agent trip state machine.

use log::{debug, trace};

use tc_core::{AgentId, EventTime, FacilityId, LinkId, Mode, ModePriority};
use tc_events::{Event, EventHandler};

use crate::{AcceptAll, AgentFilter, Leg, Trip, TripMap};

#[cfg(feature = "fx-hash")]
type AgentMap<V> = rustc_hash::FxHashMap<AgentId, V>;
#[cfg(not(feature = "fx-hash"))]
type AgentMap<V> = std::collections::HashMap<AgentId, V>;

#[cfg(feature = "fx-hash")]
type AgentIdSet = rustc_hash::FxHashSet<AgentId>;
#[cfg(not(feature = "fx-hash"))]
type AgentIdSet = std::collections::HashSet<AgentId>;

/// Mode assigned when the priority policy has nothing to classify (a trip
/// that completed without a single departure).
pub const FALLBACK_MODE: Mode = Mode::NonNetworkWalk;

/// `true` for synthetic activities inserted between the legs of one trip
/// (`"pt interaction"`, `"car interaction"`, `"drt interaction"`, …).
#[inline]
pub fn is_stage_activity(act_type: &str) -> bool {
    act_type.ends_with("interaction")
}

/// A trip whose destination activity has not started yet.  Never leaves
/// this module; callers only see finished [`Trip`]s.
#[derive(Debug, Clone)]
struct OpenTrip {
    departure_link:     LinkId,
    departure_facility: Option<FacilityId>,
    departure_time:     EventTime,
    legs:               Vec<Leg>,
}

impl OpenTrip {
    fn finish(
        self,
        arrival_link:     LinkId,
        arrival_facility: Option<FacilityId>,
        arrival_time:     EventTime,
        priority:         &ModePriority,
    ) -> Trip {
        let main_mode = priority.resolve_or(self.legs.iter().map(|l| l.mode), FALLBACK_MODE);
        Trip {
            departure_link:     self.departure_link,
            arrival_link,
            departure_facility: self.departure_facility,
            arrival_facility,
            departure_time:     self.departure_time,
            arrival_time,
            main_mode,
            legs:               self.legs,
        }
    }
}

/// Consumes an ordered event stream and collects completed trips per agent.
///
/// # States per agent
///
/// ```text
///            actend (real activity)          actstart (real activity)
/// NoActiveTrip ───────────────────▶ TripOpen ─────────────────────▶ NoActiveTrip
///                                    │  ▲                            (trip stored)
///                      departure/    └──┘ stage act end/start
///                      arrival
/// ```
///
/// - Agents seen in a `DriverStarts` event are excluded for the rest of the
///   replay.  Trips they completed before are kept.
/// - A `Stuck` event discards every trip of that agent and ignores the agent
///   until the next [`reset`][Self::reset].
/// - Out-of-place events (arrival with no open trip, …) are no-ops.
///
/// # Type parameter
///
/// `F` decides which agents are tracked at all (default: [`AcceptAll`]).
pub struct TripReconstructor<F: AgentFilter = AcceptAll> {
    filter:           F,
    priority:         ModePriority,
    open:             AgentMap<OpenTrip>,
    trips:            AgentMap<Vec<Trip>>,
    excluded_drivers: AgentIdSet,
    stuck:            AgentIdSet,
}

impl Default for TripReconstructor<AcceptAll> {
    fn default() -> Self {
        Self::new(AcceptAll, ModePriority::default())
    }
}

impl<F: AgentFilter> TripReconstructor<F> {
    pub fn new(filter: F, priority: ModePriority) -> Self {
        Self {
            filter,
            priority,
            open:             AgentMap::default(),
            trips:            AgentMap::default(),
            excluded_drivers: AgentIdSet::default(),
            stuck:            AgentIdSet::default(),
        }
    }

    /// Clear all per-replay state.  The filter and priority policy are kept.
    pub fn reset(&mut self) {
        self.open.clear();
        self.trips.clear();
        self.excluded_drivers.clear();
        self.stuck.clear();
    }

    /// Advance the state machine by one event.
    pub fn handle(&mut self, event: &Event) {
        match event {
            Event::DriverStarts { agent, .. } => {
                self.excluded_drivers.insert(*agent);
                if self.open.remove(agent).is_some() {
                    trace!("{agent}: open trip dropped, agent became a driver");
                }
            }

            Event::ActivityEnd { time, agent, link, facility, act_type } => {
                if is_stage_activity(act_type) || !self.tracks(*agent) {
                    return;
                }
                let previous = self.open.insert(
                    *agent,
                    OpenTrip {
                        departure_link:     *link,
                        departure_facility: *facility,
                        departure_time:     *time,
                        legs:               Vec::new(),
                    },
                );
                if previous.is_some() {
                    trace!("{agent}: activity ended at {time} while a trip was open; restarting trip");
                }
            }

            Event::Departure { time, agent, mode, .. } => match self.open.get_mut(agent) {
                Some(trip) => trip.legs.push(Leg::new(*mode, *time)),
                None => trace!("{agent}: departure at {time} without open trip"),
            },

            Event::Arrival { time, agent, .. } => {
                match self.open.get_mut(agent).and_then(|t| t.legs.last_mut()) {
                    Some(leg) => leg.close(*time),
                    None => trace!("{agent}: arrival at {time} without open leg"),
                }
            }

            Event::ActivityStart { time, agent, link, facility, act_type } => {
                if is_stage_activity(act_type) {
                    return;
                }
                let Some(open) = self.open.remove(agent) else {
                    return;
                };
                let trip = open.finish(*link, *facility, *time, &self.priority);
                self.trips.entry(*agent).or_default().push(trip);
            }

            Event::Stuck { time, agent, .. } => {
                self.open.remove(agent);
                let discarded = self.trips.remove(agent).map_or(0, |t| t.len());
                self.stuck.insert(*agent);
                debug!("{agent}: stuck at {time}, discarded {discarded} trips");
            }
        }
    }

    /// Deep-copied snapshot of all completed trips, ordered by agent.
    ///
    /// Trips still open are not included.
    pub fn trips(&self) -> TripMap {
        self.trips
            .iter()
            .map(|(agent, trips)| (*agent, trips.clone()))
            .collect()
    }

    /// Consume the reconstructor, returning completed trips without cloning.
    pub fn into_trips(self) -> TripMap {
        self.trips.into_iter().collect()
    }

    /// Completed trips of one agent (empty if none).
    pub fn trips_of(&self, agent: AgentId) -> &[Trip] {
        self.trips.get(&agent).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of completed trips across all agents.
    pub fn trip_count(&self) -> usize {
        self.trips.values().map(Vec::len).sum()
    }

    /// Number of agents currently between two real activities.
    pub fn open_trip_count(&self) -> usize {
        self.open.len()
    }

    /// Agents excluded because they operate a transport service, sorted.
    pub fn excluded_drivers(&self) -> Vec<AgentId> {
        let mut v: Vec<AgentId> = self.excluded_drivers.iter().copied().collect();
        v.sort_unstable();
        v
    }

    /// Agents whose trips were discarded after a stuck event, sorted.
    pub fn stuck_agents(&self) -> Vec<AgentId> {
        let mut v: Vec<AgentId> = self.stuck.iter().copied().collect();
        v.sort_unstable();
        v
    }

    pub fn priority(&self) -> &ModePriority {
        &self.priority
    }

    fn tracks(&self, agent: AgentId) -> bool {
        !self.excluded_drivers.contains(&agent)
            && !self.stuck.contains(&agent)
            && self.filter.accepts(agent)
    }
}

impl<F: AgentFilter> EventHandler for TripReconstructor<F> {
    #[inline]
    fn handle_event(&mut self, event: &Event) {
        self.handle(event);
    }

    fn reset(&mut self, iteration: u32) {
        debug!(
            "reset for replay {iteration}: dropping {} trips, {} open trips, {} excluded drivers",
            self.trip_count(),
            self.open.len(),
            self.excluded_drivers.len(),
        );
        TripReconstructor::<F>::reset(self);
    }
}
