//! CSV event loader.
//!
//! # CSV format
//!
//! One row per event, already sorted by `time`.  Unused columns stay empty.
//!
//! ```csv
//! time,kind,agent,link,facility,mode,act_type
//! 21600,actend,1,10,100,,home
//! 21600,departure,1,10,,car,
//! 22500,arrival,1,42,,car,
//! 22500,actstart,1,42,420,,work
//! ```
//!
//! | `kind`         | Required columns                     |
//! |----------------|--------------------------------------|
//! | `actend`       | `link`, `act_type` (`facility` opt.) |
//! | `actstart`     | `link`, `act_type` (`facility` opt.) |
//! | `departure`    | `link`, `mode`                       |
//! | `arrival`      | `link`, `mode`                       |
//! | `stuck`        | — (`link`, `mode` optional)          |
//! | `driverstarts` | —                                    |
//!
//! The simulator's long type names (`stuckAndAbort`, `TransitDriverStarts`)
//! are accepted too.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tc_core::{AgentId, EventTime, FacilityId, LinkId, Mode};

use crate::{Event, EventError, EventKind};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EventRecord {
    time:     f64,
    kind:     String,
    agent:    u32,
    link:     Option<u32>,
    facility: Option<u32>,
    mode:     Option<String>,
    act_type: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an event stream from a CSV file.
pub fn load_events_csv(path: &Path) -> Result<Vec<Event>, EventError> {
    let file = std::fs::File::open(path)
        .map_err(EventError::Io)?;
    load_events_reader(file)
}

/// Like [`load_events_csv`] but accepts any `Read` source.
///
/// Row order is preserved; ordering is checked later by
/// [`replay`][crate::replay], not here.
pub fn load_events_reader<R: Read>(reader: R) -> Result<Vec<Event>, EventError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut events = Vec::new();

    for (row, result) in csv_reader.deserialize::<EventRecord>().enumerate() {
        let record = result.map_err(|e| EventError::Parse(e.to_string()))?;
        // Row 1 is the header.
        events.push(record.into_event(row + 2)?);
    }

    Ok(events)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

impl EventRecord {
    fn into_event(self, line: usize) -> Result<Event, EventError> {
        let kind = EventKind::parse(&self.kind).ok_or_else(|| {
            EventError::Parse(format!("line {line}: unknown event kind {:?}", self.kind))
        })?;
        let time  = EventTime(self.time);
        let agent = AgentId(self.agent);

        let link = |what: &str| {
            self.link.map(LinkId).ok_or_else(|| missing(line, kind, what))
        };

        let event = match kind {
            EventKind::ActivityEnd | EventKind::ActivityStart => {
                let link     = link("link")?;
                let facility = self.facility.map(FacilityId);
                let act_type = non_empty(self.act_type)
                    .ok_or_else(|| missing(line, kind, "act_type"))?;
                if kind == EventKind::ActivityEnd {
                    Event::ActivityEnd { time, agent, link, facility, act_type }
                } else {
                    Event::ActivityStart { time, agent, link, facility, act_type }
                }
            }
            EventKind::Departure | EventKind::Arrival => {
                let link = link("link")?;
                let mode = non_empty(self.mode)
                    .map(|m| Mode::parse(&m))
                    .ok_or_else(|| missing(line, kind, "mode"))?;
                if kind == EventKind::Departure {
                    Event::Departure { time, agent, link, mode }
                } else {
                    Event::Arrival { time, agent, link, mode }
                }
            }
            EventKind::Stuck => Event::Stuck {
                time,
                agent,
                link: self.link.map(LinkId),
                mode: non_empty(self.mode).map(|m| Mode::parse(&m)),
            },
            EventKind::DriverStarts => Event::DriverStarts { time, agent },
        };

        Ok(event)
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

fn missing(line: usize, kind: EventKind, what: &str) -> EventError {
    EventError::Parse(format!("line {line}: {kind} event is missing {what}"))
}
