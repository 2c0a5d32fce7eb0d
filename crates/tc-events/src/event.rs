//! Typed simulator events.

use std::fmt;

use tc_core::{AgentId, EventTime, FacilityId, LinkId, Mode};

/// One discrete event emitted by the mobility simulator.
///
/// Only the event types the trip pipeline reacts to are modelled; the loader
/// rejects anything else rather than silently dropping it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Agent leaves an activity (home, work, or a `"… interaction"` stage).
    ActivityEnd {
        time:     EventTime,
        agent:    AgentId,
        link:     LinkId,
        facility: Option<FacilityId>,
        act_type: String,
    },

    /// Agent begins an activity.
    ActivityStart {
        time:     EventTime,
        agent:    AgentId,
        link:     LinkId,
        facility: Option<FacilityId>,
        act_type: String,
    },

    /// Agent starts a leg on `link` with `mode`.
    Departure {
        time:  EventTime,
        agent: AgentId,
        link:  LinkId,
        mode:  Mode,
    },

    /// Agent finishes a leg on `link`.
    Arrival {
        time:  EventTime,
        agent: AgentId,
        link:  LinkId,
        mode:  Mode,
    },

    /// Agent got stuck and was removed from the simulation.
    Stuck {
        time:  EventTime,
        agent: AgentId,
        link:  Option<LinkId>,
        mode:  Option<Mode>,
    },

    /// Agent starts operating a transport service (e.g. a bus driver).
    DriverStarts {
        time:  EventTime,
        agent: AgentId,
    },
}

impl Event {
    pub fn time(&self) -> EventTime {
        match self {
            Event::ActivityEnd { time, .. }
            | Event::ActivityStart { time, .. }
            | Event::Departure { time, .. }
            | Event::Arrival { time, .. }
            | Event::Stuck { time, .. }
            | Event::DriverStarts { time, .. } => *time,
        }
    }

    pub fn agent(&self) -> AgentId {
        match self {
            Event::ActivityEnd { agent, .. }
            | Event::ActivityStart { agent, .. }
            | Event::Departure { agent, .. }
            | Event::Arrival { agent, .. }
            | Event::Stuck { agent, .. }
            | Event::DriverStarts { agent, .. } => *agent,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::ActivityEnd { .. }   => EventKind::ActivityEnd,
            Event::ActivityStart { .. } => EventKind::ActivityStart,
            Event::Departure { .. }     => EventKind::Departure,
            Event::Arrival { .. }       => EventKind::Arrival,
            Event::Stuck { .. }         => EventKind::Stuck,
            Event::DriverStarts { .. }  => EventKind::DriverStarts,
        }
    }
}

/// Discriminant of [`Event`], used by the loader and in log lines.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EventKind {
    ActivityEnd,
    ActivityStart,
    Departure,
    Arrival,
    Stuck,
    DriverStarts,
}

impl EventKind {
    /// Parse the `kind` column.  Accepts the simulator's own type names
    /// (`stuckAndAbort`, `TransitDriverStarts`) as well as the short forms.
    pub fn parse(s: &str) -> Option<EventKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "actend"                                => Some(EventKind::ActivityEnd),
            "actstart"                              => Some(EventKind::ActivityStart),
            "departure"                             => Some(EventKind::Departure),
            "arrival"                               => Some(EventKind::Arrival),
            "stuck" | "stuckandabort"               => Some(EventKind::Stuck),
            "driverstarts" | "transitdriverstarts"  => Some(EventKind::DriverStarts),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::ActivityEnd   => "actend",
            EventKind::ActivityStart => "actstart",
            EventKind::Departure     => "departure",
            EventKind::Arrival       => "arrival",
            EventKind::Stuck         => "stuck",
            EventKind::DriverStarts  => "driverstarts",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
