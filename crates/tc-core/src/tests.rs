//! Unit tests for tc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, FacilityId, LinkId};

    #[test]
    fn parse_from_str() {
        assert_eq!(" 42 ".parse::<AgentId>().unwrap(), AgentId(42));
        assert!("abc".parse::<LinkId>().is_err());
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(LinkId(100) > LinkId(99));
    }

    #[test]
    fn invalid_sentinels() {
        assert_eq!(FacilityId::INVALID.0, u32::MAX);
        assert!(!AgentId::INVALID.is_valid());
        assert!(AgentId(3).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod coord {
    use crate::Coord;

    #[test]
    fn zero_distance() {
        let p = Coord::new(4_500.0, 12.5);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(300.0, 400.0);
        assert!((a.distance(b) - 500.0).abs() < 1e-9);
        assert_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn finiteness() {
        assert!(Coord::new(1.0, 2.0).is_finite());
        assert!(!Coord::new(f64::NAN, 2.0).is_finite());
    }
}

#[cfg(test)]
mod time {
    use crate::EventTime;

    #[test]
    fn arithmetic() {
        let t = EventTime(3_600.0);
        assert_eq!(t + 60.0, EventTime(3_660.0));
        assert_eq!(EventTime(3_660.0) - t, 60.0);
        assert_eq!(EventTime(10.0).since(EventTime(4.0)), 6.0);
    }

    #[test]
    fn display_does_not_wrap_past_midnight() {
        assert_eq!(EventTime(8.0 * 3_600.0 + 5.0 * 60.0 + 9.0).to_string(), "08:05:09");
        assert_eq!(EventTime(25.0 * 3_600.0 + 600.0).to_string(), "25:10:00");
    }
}

#[cfg(test)]
mod mode {
    use crate::{Mode, ModePriority, TcError};

    #[test]
    fn parse_known_and_unknown() {
        assert_eq!(Mode::parse("car"), Mode::Car);
        assert_eq!(Mode::parse(" PT "), Mode::Pt);
        assert_eq!(Mode::parse("access_walk"), Mode::NonNetworkWalk);
        assert_eq!(Mode::parse("hovercraft"), Mode::Other);
        assert_eq!("bike".parse::<Mode>().unwrap(), Mode::Bike);
    }

    #[test]
    fn labels_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::parse(mode.as_str()), mode);
        }
    }

    #[test]
    fn walk_variants_normalise() {
        assert_eq!(Mode::NonNetworkWalk.normalized(), Mode::Walk);
        assert_eq!(Mode::Car.normalized(), Mode::Car);
        assert!(Mode::NonNetworkWalk.is_walk());
    }

    #[test]
    fn pt_dominates_regardless_of_order() {
        let p = ModePriority::default();
        assert_eq!(p.resolve([Mode::Walk, Mode::Pt, Mode::Walk]), Some(Mode::Pt));
        assert_eq!(p.resolve([Mode::Pt, Mode::Walk, Mode::Walk]), Some(Mode::Pt));
        assert_eq!(p.resolve([Mode::Walk, Mode::Walk, Mode::Pt]), Some(Mode::Pt));
    }

    #[test]
    fn car_beats_bike() {
        let p = ModePriority::default();
        assert_eq!(p.resolve([Mode::Bike, Mode::Car]), Some(Mode::Car));
        assert_eq!(p.resolve([Mode::Car, Mode::Bike]), Some(Mode::Car));
    }

    #[test]
    fn access_walks_rank_as_walk() {
        let p = ModePriority::default();
        assert_eq!(p.resolve([Mode::NonNetworkWalk]), Some(Mode::Walk));
        assert_eq!(p.rank(Mode::NonNetworkWalk), p.rank(Mode::Walk));
    }

    #[test]
    fn unranked_legs_give_other() {
        let p = ModePriority::default();
        assert_eq!(p.resolve([Mode::Other, Mode::Other]), Some(Mode::Other));
        assert_eq!(p.resolve([Mode::Other, Mode::Bike]), Some(Mode::Bike));
    }

    #[test]
    fn empty_legs_fall_back() {
        let p = ModePriority::default();
        assert_eq!(p.resolve(std::iter::empty::<Mode>()), None);
        assert_eq!(p.resolve_or(Vec::<Mode>::new(), Mode::NonNetworkWalk), Mode::NonNetworkWalk);
    }

    #[test]
    fn custom_order() {
        let p = ModePriority::new(vec![Mode::Pt, Mode::Car]).unwrap();
        assert_eq!(p.resolve([Mode::Pt, Mode::Car]), Some(Mode::Car));
        assert_eq!(p.rank(Mode::Walk), None);
    }

    #[test]
    fn duplicate_order_rejected() {
        let err = ModePriority::new(vec![Mode::Car, Mode::Pt, Mode::Car]).unwrap_err();
        assert!(matches!(err, TcError::DuplicatePriority(Mode::Car)));
    }

    #[test]
    fn non_network_walk_not_rankable() {
        let err = ModePriority::new(vec![Mode::NonNetworkWalk, Mode::Car]).unwrap_err();
        assert!(matches!(err, TcError::Config(_)));
    }
}
