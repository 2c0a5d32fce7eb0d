//! Unit tests for tc-trips.

use tc_core::{AgentId, EventTime, FacilityId, LinkId, Mode, ModePriority};
use tc_events::Event;

use crate::{AgentSet, FnFilter, Leg, TripReconstructor};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn act_end(t: f64, agent: u32, link: u32, act: &str) -> Event {
    Event::ActivityEnd {
        time:     EventTime(t),
        agent:    AgentId(agent),
        link:     LinkId(link),
        facility: Some(FacilityId(link * 10)),
        act_type: act.into(),
    }
}

fn act_start(t: f64, agent: u32, link: u32, act: &str) -> Event {
    Event::ActivityStart {
        time:     EventTime(t),
        agent:    AgentId(agent),
        link:     LinkId(link),
        facility: None,
        act_type: act.into(),
    }
}

fn dep(t: f64, agent: u32, mode: Mode) -> Event {
    Event::Departure { time: EventTime(t), agent: AgentId(agent), link: LinkId(0), mode }
}

fn arr(t: f64, agent: u32, mode: Mode) -> Event {
    Event::Arrival { time: EventTime(t), agent: AgentId(agent), link: LinkId(0), mode }
}

fn stuck(t: f64, agent: u32) -> Event {
    Event::Stuck { time: EventTime(t), agent: AgentId(agent), link: None, mode: None }
}

fn driver(t: f64, agent: u32) -> Event {
    Event::DriverStarts { time: EventTime(t), agent: AgentId(agent) }
}

/// home → single leg → work, for `agent`, starting at `t0`.
fn single_leg_trip(t0: f64, agent: u32, mode: Mode) -> Vec<Event> {
    vec![
        act_end(t0, agent, 1, "home"),
        dep(t0, agent, mode),
        arr(t0 + 600.0, agent, mode),
        act_start(t0 + 600.0, agent, 2, "work"),
    ]
}

/// home → legs separated by stage activities → work.
fn multi_leg_trip(t0: f64, agent: u32, modes: &[Mode]) -> Vec<Event> {
    let mut events = vec![act_end(t0, agent, 1, "home")];
    let mut t = t0;
    for (i, &mode) in modes.iter().enumerate() {
        if i > 0 {
            events.push(act_start(t, agent, 5, "pt interaction"));
            events.push(act_end(t, agent, 5, "pt interaction"));
        }
        events.push(dep(t, agent, mode));
        t += 300.0;
        events.push(arr(t, agent, mode));
    }
    events.push(act_start(t, agent, 2, "work"));
    events
}

fn reconstructor() -> TripReconstructor {
    TripReconstructor::default()
}

fn run(rec: &mut TripReconstructor<impl crate::AgentFilter>, events: &[Event]) {
    for e in events {
        rec.handle(e);
    }
}

// ── Leg ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod leg {
    use super::*;

    #[test]
    fn close_sets_travel_time_once() {
        let mut leg = Leg::new(Mode::Car, EventTime(100.0));
        assert!(!leg.is_closed());
        assert_eq!(leg.arrival_time(), None);
        leg.close(EventTime(160.0));
        assert_eq!(leg.travel_time, Some(60.0));
        leg.close(EventTime(999.0));
        assert_eq!(leg.travel_time, Some(60.0));
        assert_eq!(leg.arrival_time(), Some(EventTime(160.0)));
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod reconstruction {
    use super::*;

    #[test]
    fn single_leg_gives_one_trip_with_that_mode() {
        for mode in [Mode::Walk, Mode::Bike, Mode::Car, Mode::Pt, Mode::Drt, Mode::Ride] {
            let mut rec = reconstructor();
            run(&mut rec, &single_leg_trip(3_600.0, 1, mode));

            let trips = rec.trips();
            assert_eq!(trips.len(), 1);
            let agent_trips = &trips[&AgentId(1)];
            assert_eq!(agent_trips.len(), 1);
            assert_eq!(agent_trips[0].main_mode, mode);
        }
    }

    #[test]
    fn trip_records_endpoints_and_times() {
        let mut rec = reconstructor();
        run(&mut rec, &single_leg_trip(3_600.0, 1, Mode::Car));

        let trip = &rec.trips_of(AgentId(1))[0];
        assert_eq!(trip.departure_link, LinkId(1));
        assert_eq!(trip.departure_facility, Some(FacilityId(10)));
        assert_eq!(trip.arrival_link, LinkId(2));
        assert_eq!(trip.arrival_facility, None);
        assert_eq!(trip.departure_time, EventTime(3_600.0));
        assert_eq!(trip.arrival_time, EventTime(4_200.0));
        assert_eq!(trip.duration(), 600.0);
        assert_eq!(trip.legs.len(), 1);
        assert_eq!(trip.legs[0].travel_time, Some(600.0));
    }

    #[test]
    fn stage_activities_do_not_split_trip() {
        let mut rec = reconstructor();
        run(&mut rec, &multi_leg_trip(0.0, 1, &[Mode::NonNetworkWalk, Mode::Pt, Mode::NonNetworkWalk]));

        let trips = rec.trips_of(AgentId(1));
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].legs.len(), 3);
        assert_eq!(trips[0].main_mode, Mode::Pt);
        assert_eq!(trips[0].in_vehicle_time(), 900.0);
    }

    #[test]
    fn pt_dominates_any_leg_order() {
        let orders: [[Mode; 3]; 3] = [
            [Mode::Walk, Mode::Pt, Mode::Walk],
            [Mode::Pt, Mode::Walk, Mode::Walk],
            [Mode::Walk, Mode::Walk, Mode::Pt],
        ];
        for order in orders {
            let mut rec = reconstructor();
            run(&mut rec, &multi_leg_trip(0.0, 1, &order));
            assert_eq!(rec.trips_of(AgentId(1))[0].main_mode, Mode::Pt, "{order:?}");
        }
    }

    #[test]
    fn car_beats_bike_even_when_shorter() {
        let mut rec = reconstructor();
        run(&mut rec, &multi_leg_trip(0.0, 1, &[Mode::Bike, Mode::Car]));
        assert_eq!(rec.trips_of(AgentId(1))[0].main_mode, Mode::Car);
    }

    #[test]
    fn walk_only_access_legs_resolve_to_walk() {
        let mut rec = reconstructor();
        run(&mut rec, &single_leg_trip(0.0, 1, Mode::NonNetworkWalk));
        assert_eq!(rec.trips_of(AgentId(1))[0].main_mode, Mode::Walk);
    }

    #[test]
    fn trip_without_legs_gets_fallback_mode() {
        let mut rec = reconstructor();
        run(&mut rec, &[act_end(0.0, 1, 1, "home"), act_start(10.0, 1, 1, "shop")]);
        let trips = rec.trips_of(AgentId(1));
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].main_mode, Mode::NonNetworkWalk);
    }

    #[test]
    fn unknown_modes_give_other() {
        let mut rec = reconstructor();
        run(&mut rec, &single_leg_trip(0.0, 1, Mode::Other));
        assert_eq!(rec.trips_of(AgentId(1))[0].main_mode, Mode::Other);
    }

    #[test]
    fn consecutive_trips_kept_in_order() {
        let mut rec = reconstructor();
        run(&mut rec, &single_leg_trip(0.0, 1, Mode::Car));
        run(&mut rec, &single_leg_trip(10_000.0, 1, Mode::Bike));
        let modes: Vec<Mode> = rec.trips_of(AgentId(1)).iter().map(|t| t.main_mode).collect();
        assert_eq!(modes, vec![Mode::Car, Mode::Bike]);
        assert_eq!(rec.trip_count(), 2);
    }

    #[test]
    fn open_trip_not_visible() {
        let mut rec = reconstructor();
        run(&mut rec, &[act_end(0.0, 1, 1, "home"), dep(0.0, 1, Mode::Car)]);
        assert!(rec.trips().is_empty());
        assert_eq!(rec.open_trip_count(), 1);
    }

    #[test]
    fn anomalies_are_noops() {
        let mut rec = reconstructor();
        run(
            &mut rec,
            &[
                dep(0.0, 1, Mode::Car),
                arr(5.0, 1, Mode::Car),
                act_start(5.0, 1, 2, "work"),
                act_end(6.0, 2, 1, "home"),
                arr(7.0, 2, Mode::Car), // arrival before any departure
            ],
        );
        assert!(rec.trips().is_empty());
        assert_eq!(rec.open_trip_count(), 1);
    }

    #[test]
    fn agents_are_independent() {
        let mut events = single_leg_trip(0.0, 1, Mode::Car);
        events.extend(single_leg_trip(0.0, 2, Mode::Bike));
        events.sort_by(|a, b| a.time().0.total_cmp(&b.time().0));

        let mut rec = reconstructor();
        run(&mut rec, &events);
        assert_eq!(rec.trips_of(AgentId(1))[0].main_mode, Mode::Car);
        assert_eq!(rec.trips_of(AgentId(2))[0].main_mode, Mode::Bike);
    }

    #[test]
    fn custom_priority_is_used() {
        let priority = ModePriority::new(vec![Mode::Pt, Mode::Bike]).unwrap();
        let mut rec = TripReconstructor::new(crate::AcceptAll, priority);
        run(&mut rec, &multi_leg_trip(0.0, 1, &[Mode::Pt, Mode::Bike]));
        assert_eq!(rec.trips_of(AgentId(1))[0].main_mode, Mode::Bike);
    }
}

// ── Stuck agents and drivers ──────────────────────────────────────────────────

#[cfg(test)]
mod exclusions {
    use super::*;

    #[test]
    fn stuck_discards_all_trips_of_agent() {
        let mut rec = reconstructor();
        run(&mut rec, &single_leg_trip(0.0, 1, Mode::Car));
        run(&mut rec, &single_leg_trip(1_000.0, 1, Mode::Car));
        run(&mut rec, &single_leg_trip(1_000.0, 2, Mode::Car));
        assert_eq!(rec.trips_of(AgentId(1)).len(), 2);

        rec.handle(&stuck(5_000.0, 1));
        assert!(rec.trips_of(AgentId(1)).is_empty());
        assert!(!rec.trips().contains_key(&AgentId(1)));
        assert_eq!(rec.trips_of(AgentId(2)).len(), 1);
        assert_eq!(rec.stuck_agents(), vec![AgentId(1)]);
    }

    #[test]
    fn stuck_agent_produces_no_further_trips() {
        let mut rec = reconstructor();
        rec.handle(&stuck(0.0, 1));
        run(&mut rec, &single_leg_trip(100.0, 1, Mode::Car));
        assert!(rec.trips().is_empty());
    }

    #[test]
    fn stuck_mid_trip_drops_open_trip() {
        let mut rec = reconstructor();
        run(&mut rec, &[act_end(0.0, 1, 1, "home"), dep(0.0, 1, Mode::Car), stuck(50.0, 1)]);
        assert_eq!(rec.open_trip_count(), 0);
        rec.handle(&act_start(60.0, 1, 2, "work"));
        assert!(rec.trips().is_empty());
    }

    #[test]
    fn driver_produces_no_trips() {
        let mut rec = reconstructor();
        rec.handle(&driver(0.0, 7));
        run(&mut rec, &single_leg_trip(100.0, 7, Mode::Pt));
        assert!(rec.trips().is_empty());
        assert_eq!(rec.excluded_drivers(), vec![AgentId(7)]);
    }

    #[test]
    fn driver_keeps_earlier_trips() {
        let mut rec = reconstructor();
        run(&mut rec, &single_leg_trip(0.0, 7, Mode::Car));
        rec.handle(&driver(1_000.0, 7));
        run(&mut rec, &single_leg_trip(2_000.0, 7, Mode::Car));
        assert_eq!(rec.trips_of(AgentId(7)).len(), 1);
    }

    #[test]
    fn filter_excludes_agents() {
        let filter: AgentSet = [AgentId(1)].into_iter().collect();
        let mut rec = TripReconstructor::new(filter, ModePriority::default());
        run(&mut rec, &single_leg_trip(0.0, 1, Mode::Car));
        run(&mut rec, &single_leg_trip(0.0, 2, Mode::Car));
        let trips = rec.trips();
        assert_eq!(trips.len(), 1);
        assert!(trips.contains_key(&AgentId(1)));
    }

    #[test]
    fn closure_filter() {
        let mut rec = TripReconstructor::new(FnFilter(|a: AgentId| a.0 >= 10), ModePriority::default());
        run(&mut rec, &single_leg_trip(0.0, 3, Mode::Car));
        run(&mut rec, &single_leg_trip(0.0, 12, Mode::Car));
        assert_eq!(rec.trips().keys().copied().collect::<Vec<_>>(), vec![AgentId(12)]);
    }
}

// ── Reset and replay ──────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use tc_events::{EventHandler, replay};

    use super::*;

    #[test]
    fn reset_clears_everything() {
        let mut rec = reconstructor();
        rec.handle(&driver(0.0, 9));
        rec.handle(&stuck(0.0, 8));
        run(&mut rec, &single_leg_trip(0.0, 1, Mode::Car));
        rec.handle(&act_end(900.0, 2, 1, "home"));

        rec.reset();
        assert!(rec.trips().is_empty());
        assert_eq!(rec.open_trip_count(), 0);
        assert!(rec.excluded_drivers().is_empty());
        assert!(rec.stuck_agents().is_empty());

        // A formerly stuck agent is tracked again after reset.
        run(&mut rec, &single_leg_trip(0.0, 8, Mode::Walk));
        assert_eq!(rec.trips_of(AgentId(8)).len(), 1);
    }

    #[test]
    fn replay_resets_between_runs() {
        let events = single_leg_trip(0.0, 1, Mode::Car);
        let mut rec = reconstructor();

        replay(&events, &mut rec, 0).unwrap();
        assert_eq!(rec.trip_count(), 1);
        replay(&events, &mut rec, 1).unwrap();
        assert_eq!(rec.trip_count(), 1, "second replay must not accumulate");
    }

    #[test]
    fn handler_trait_reset() {
        let mut rec = reconstructor();
        run(&mut rec, &single_leg_trip(0.0, 1, Mode::Car));
        EventHandler::reset(&mut rec, 3);
        assert_eq!(rec.trip_count(), 0);
    }

    #[test]
    fn snapshot_is_independent_copy() {
        let mut rec = reconstructor();
        run(&mut rec, &single_leg_trip(0.0, 1, Mode::Car));
        let snapshot = rec.trips();
        rec.handle(&stuck(10_000.0, 1));
        assert_eq!(snapshot[&AgentId(1)].len(), 1);
        assert!(rec.into_trips().is_empty());
    }
}
