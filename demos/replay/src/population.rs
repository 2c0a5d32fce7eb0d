//! Synthetic corridor city and the event stream of one simulated day.
//!
//! 200 links, 100 m apart, run west to east along the x axis.  Every agent
//! has a home and a work facility just north of a random link and makes one
//! commute each way.  Agent 0 drives a transit vehicle and agent 1 gets stuck
//! on the way home, so the replay exercises both exclusion paths.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tc_aggregate::CoordIndex;
use tc_core::{AgentId, Coord, EventTime, FacilityId, LinkId, Mode};
use tc_events::Event;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

const LINK_COUNT:     u32 = 200;
const LINK_SPACING_M: f64 = 100.0;
/// Facilities sit this far north of their link.
const FACILITY_SETBACK_M: f64 = 40.0;

const MORNING_START: f64 = 6.0 * 3_600.0;
const EVENING_START: f64 = 16.0 * 3_600.0;
const WORK_DAY:      f64 = 8.0 * 3_600.0;

pub struct Population {
    pub coords: CoordIndex,
    /// Time-ordered event stream.
    pub events: Vec<Event>,
}

/// Build the corridor and `agents` commuters, deterministically from `seed`.
pub fn build(agents: u32, seed: u64) -> Population {
    let mut coords = CoordIndex::new();
    for n in 0..LINK_COUNT {
        coords.insert_link(LinkId(n), link_coord(n));
    }

    let mut events = Vec::new();
    for id in 0..agents {
        let seed = seed ^ (id as u64).wrapping_mul(MIXING_CONSTANT);
        let mut rng = SmallRng::seed_from_u64(seed);
        let agent = AgentId(id);

        let home_link = rng.gen_range(0..LINK_COUNT / 4);
        let work_link = rng.gen_range(0..LINK_COUNT);
        let home = FacilityId(id * 2);
        let work = FacilityId(id * 2 + 1);
        coords.insert_facility(home, facility_coord(home_link));
        coords.insert_facility(work, facility_coord(work_link));

        if id == 0 {
            events.push(Event::DriverStarts { time: EventTime(MORNING_START - 1_800.0), agent });
        }

        let distance = facility_coord(home_link).distance(facility_coord(work_link));
        let mode = choose_mode(&mut rng, distance);

        let out = Endpoint { link: home_link, facility: home, act: "home" };
        let back = Endpoint { link: work_link, facility: work, act: "work" };

        let t0 = MORNING_START + rng.gen_range(0.0..7_200.0);
        let arrived = commute(&mut events, agent, &out, &back, mode, distance, t0);

        let t1 = (arrived + WORK_DAY).max(EVENING_START) + rng.gen_range(0.0..3_600.0);
        if id == 1 {
            events.push(Event::ActivityEnd {
                time:     EventTime(t1),
                agent,
                link:     LinkId(work_link),
                facility: Some(work),
                act_type: "work".into(),
            });
            events.push(Event::Departure { time: EventTime(t1), agent, link: LinkId(work_link), mode });
            events.push(Event::Stuck {
                time:  EventTime(t1 + 900.0),
                agent,
                link:  Some(LinkId(work_link)),
                mode:  Some(mode),
            });
        } else {
            commute(&mut events, agent, &back, &out, mode, distance, t1);
        }
    }

    // Stable: each agent's own events keep their order on equal times.
    events.sort_by(|a, b| a.time().secs().total_cmp(&b.time().secs()));
    Population { coords, events }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Endpoint {
    link:     u32,
    facility: FacilityId,
    act:      &'static str,
}

fn link_coord(n: u32) -> Coord {
    Coord::new(n as f64 * LINK_SPACING_M, 0.0)
}

fn facility_coord(n: u32) -> Coord {
    Coord::new(n as f64 * LINK_SPACING_M, FACILITY_SETBACK_M)
}

fn choose_mode(rng: &mut SmallRng, distance: f64) -> Mode {
    match distance {
        d if d < 1_500.0 => if rng.gen_bool(0.7) { Mode::Walk } else { Mode::Bike },
        d if d < 5_000.0 => if rng.gen_bool(0.4) { Mode::Bike } else { Mode::Car },
        _                => if rng.gen_bool(0.5) { Mode::Car } else { Mode::Pt },
    }
}

/// Average door-to-door speed in m/s.
fn speed(mode: Mode) -> f64 {
    match mode {
        Mode::Walk => 1.3,
        Mode::Bike => 4.5,
        Mode::Pt   => 7.0,
        _          => 9.0,
    }
}

/// Push one trip from `from` to `to` starting at `t0`; returns the arrival time.
fn commute(
    events:   &mut Vec<Event>,
    agent:    AgentId,
    from:     &Endpoint,
    to:       &Endpoint,
    mode:     Mode,
    distance: f64,
    t0:       f64,
) -> f64 {
    events.push(Event::ActivityEnd {
        time:     EventTime(t0),
        agent,
        link:     LinkId(from.link),
        facility: Some(from.facility),
        act_type: from.act.into(),
    });

    let legs: &[(Mode, f64)] = if mode == Mode::Pt {
        &[(Mode::NonNetworkWalk, 300.0), (Mode::Pt, 0.0), (Mode::NonNetworkWalk, 240.0)]
    } else {
        &[(mode, 0.0)]
    };

    let mut t = t0;
    for (i, &(leg_mode, fixed)) in legs.iter().enumerate() {
        if i > 0 {
            stage(events, agent, to.link, t);
        }
        let travel = if fixed > 0.0 { fixed } else { (distance / speed(leg_mode)).max(60.0) };
        events.push(Event::Departure { time: EventTime(t), agent, link: LinkId(from.link), mode: leg_mode });
        t += travel;
        events.push(Event::Arrival { time: EventTime(t), agent, link: LinkId(to.link), mode: leg_mode });
    }

    events.push(Event::ActivityStart {
        time:     EventTime(t),
        agent,
        link:     LinkId(to.link),
        facility: Some(to.facility),
        act_type: to.act.into(),
    });
    t
}

fn stage(events: &mut Vec<Event>, agent: AgentId, link: u32, t: f64) {
    let (time, link) = (EventTime(t), LinkId(link));
    events.push(Event::ActivityStart { time, agent, link, facility: None, act_type: "pt interaction".into() });
    events.push(Event::ActivityEnd { time, agent, link, facility: None, act_type: "pt interaction".into() });
}
