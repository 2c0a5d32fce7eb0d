//! Travel modes and the dominant-mode priority policy.
//!
//! The simulator reports modes as free-form strings.  They are folded into a
//! closed [`Mode`] enum at the loader boundary; anything unrecognised becomes
//! [`Mode::Other`] so downstream code never compares strings.
//!
//! # Dominant mode
//!
//! A trip made of several legs (walk to the stop, ride the bus, walk home) is
//! classified by the single leg mode with the highest rank in a
//! [`ModePriority`] list.  With the default order
//!
//! ```text
//! walk < bike < ride < car < drt < pt
//! ```
//!
//! any public-transit leg makes the whole trip a `pt` trip, regardless of how
//! short that leg is.

use std::fmt;
use std::str::FromStr;

use crate::{TcError, TcResult};

/// The means by which a leg (or, after resolution, a whole trip) travels.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Unrouted walk: access/egress/transfer walks and teleported walks.
    /// Normalised to [`Mode::Walk`] before ranking.
    NonNetworkWalk,
    Walk,
    Bike,
    /// Car passenger.
    Ride,
    /// Car driver.
    Car,
    /// Demand-responsive transport.
    Drt,
    /// Scheduled public transit (bus, rail, ferry…).
    Pt,
    /// Any mode string the framework does not know.
    Other,
}

impl Mode {
    /// Every variant, in declaration order.
    pub const ALL: [Mode; 8] = [
        Mode::NonNetworkWalk,
        Mode::Walk,
        Mode::Bike,
        Mode::Ride,
        Mode::Car,
        Mode::Drt,
        Mode::Pt,
        Mode::Other,
    ];

    /// Parse a simulator mode string.  Never fails: unknown strings map to
    /// [`Mode::Other`].
    pub fn parse(s: &str) -> Mode {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk" => Mode::Walk,
            "non_network_walk" | "transit_walk" | "access_walk" | "egress_walk"
            | "walk_access" | "walk_egress" => Mode::NonNetworkWalk,
            "bike" | "bicycle" => Mode::Bike,
            "ride" => Mode::Ride,
            "car" => Mode::Car,
            "drt" => Mode::Drt,
            "pt" => Mode::Pt,
            _ => Mode::Other,
        }
    }

    /// Canonical label, used for CSV/SQLite column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::NonNetworkWalk => "non_network_walk",
            Mode::Walk           => "walk",
            Mode::Bike           => "bike",
            Mode::Ride           => "ride",
            Mode::Car            => "car",
            Mode::Drt            => "drt",
            Mode::Pt             => "pt",
            Mode::Other          => "other",
        }
    }

    /// Collapse walk variants onto [`Mode::Walk`].
    #[inline]
    pub fn normalized(self) -> Mode {
        match self {
            Mode::NonNetworkWalk => Mode::Walk,
            m => m,
        }
    }

    #[inline]
    pub fn is_walk(self) -> bool {
        matches!(self, Mode::Walk | Mode::NonNetworkWalk)
    }
}

impl FromStr for Mode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Mode, Self::Err> {
        Ok(Mode::parse(s))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ModePriority ──────────────────────────────────────────────────────────────

/// Strict ascending priority order used to pick a trip's dominant mode.
///
/// Index 0 has the least influence; the last entry wins over everything.
/// Modes absent from the list have no rank and can never dominate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModePriority {
    order: Vec<Mode>,
}

impl Default for ModePriority {
    fn default() -> Self {
        Self {
            order: vec![Mode::Walk, Mode::Bike, Mode::Ride, Mode::Car, Mode::Drt, Mode::Pt],
        }
    }
}

impl ModePriority {
    /// Build a custom order, lowest influence first.
    ///
    /// # Errors
    ///
    /// `TcError::DuplicatePriority` if a mode is listed twice, and
    /// `TcError::Config` if the order names `NonNetworkWalk` (which is always
    /// normalised away and could never match).
    pub fn new(order: Vec<Mode>) -> TcResult<Self> {
        for (i, mode) in order.iter().enumerate() {
            if *mode == Mode::NonNetworkWalk {
                return Err(TcError::Config(
                    "non_network_walk is ranked as walk and cannot appear in a priority order".into(),
                ));
            }
            if order[..i].contains(mode) {
                return Err(TcError::DuplicatePriority(*mode));
            }
        }
        Ok(Self { order })
    }

    /// The order, lowest influence first.
    pub fn order(&self) -> &[Mode] {
        &self.order
    }

    /// Rank of `mode` after normalisation, or `None` if it is not ranked.
    #[inline]
    pub fn rank(&self, mode: Mode) -> Option<usize> {
        let mode = mode.normalized();
        self.order.iter().position(|&m| m == mode)
    }

    /// Dominant mode among `modes`.
    ///
    /// - `None` if `modes` is empty: there is nothing to classify.
    /// - `Some(Mode::Other)` if no mode has a rank.
    /// - Otherwise the normalised mode with the highest rank.
    pub fn resolve<I>(&self, modes: I) -> Option<Mode>
    where
        I: IntoIterator<Item = Mode>,
    {
        let mut seen_any = false;
        let mut best: Option<(usize, Mode)> = None;

        for mode in modes {
            seen_any = true;
            let mode = mode.normalized();
            if let Some(rank) = self.rank(mode) {
                if best.is_none_or(|(b, _)| rank > b) {
                    best = Some((rank, mode));
                }
            }
        }

        if !seen_any {
            return None;
        }
        Some(best.map_or(Mode::Other, |(_, m)| m))
    }

    /// Like [`resolve`][Self::resolve] but substitutes `fallback` when there
    /// is nothing to classify.
    #[inline]
    pub fn resolve_or<I>(&self, modes: I, fallback: Mode) -> Mode
    where
        I: IntoIterator<Item = Mode>,
    {
        self.resolve(modes).unwrap_or(fallback)
    }
}
