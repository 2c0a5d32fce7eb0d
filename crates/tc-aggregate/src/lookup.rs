//! Coordinate lookup for trip endpoints.
//!
//! # CSV format
//!
//! ```csv
//! kind,id,x,y
//! link,10,4512.0,1203.5
//! facility,100,4498.2,1190.0
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use tc_core::{Coord, FacilityId, LinkId};
use tc_trips::Trip;

use crate::{AggregateError, AggregateResult};

// ── CoordinateLookup ──────────────────────────────────────────────────────────

/// Resolves link and facility ids to projected coordinates.
///
/// Implementations must be `Send + Sync` so one lookup can serve every
/// worker of a parallel aggregation.
pub trait CoordinateLookup: Send + Sync {
    fn link_coord(&self, link: LinkId) -> Option<Coord>;

    fn facility_coord(&self, facility: FacilityId) -> Option<Coord>;

    /// Origin of `trip`: the departure facility if it resolves, else the
    /// departure link.
    fn departure_coord(&self, trip: &Trip) -> AggregateResult<Coord> {
        resolve(self, "departure", trip.departure_facility, trip.departure_link)
    }

    /// Destination of `trip`, resolved like [`departure_coord`](Self::departure_coord).
    fn arrival_coord(&self, trip: &Trip) -> AggregateResult<Coord> {
        resolve(self, "arrival", trip.arrival_facility, trip.arrival_link)
    }
}

fn resolve<L: CoordinateLookup + ?Sized>(
    lookup:   &L,
    which:    &'static str,
    facility: Option<FacilityId>,
    link:     LinkId,
) -> AggregateResult<Coord> {
    facility
        .and_then(|f| lookup.facility_coord(f))
        .or_else(|| lookup.link_coord(link))
        .ok_or(AggregateError::MissingCoord { which, facility, link })
}

// ── CoordIndex ────────────────────────────────────────────────────────────────

/// In-memory [`CoordinateLookup`] backed by two hash maps.
#[derive(Clone, Debug, Default)]
pub struct CoordIndex {
    links:      HashMap<LinkId, Coord>,
    facilities: HashMap<FacilityId, Coord>,
}

impl CoordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the coordinate of `link`.
    pub fn insert_link(&mut self, link: LinkId, coord: Coord) -> Option<Coord> {
        self.links.insert(link, coord)
    }

    /// Insert or replace the coordinate of `facility`.
    pub fn insert_facility(&mut self, facility: FacilityId, coord: Coord) -> Option<Coord> {
        self.facilities.insert(facility, coord)
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn facility_count(&self) -> usize {
        self.facilities.len()
    }
}

impl CoordinateLookup for CoordIndex {
    #[inline]
    fn link_coord(&self, link: LinkId) -> Option<Coord> {
        self.links.get(&link).copied()
    }

    #[inline]
    fn facility_coord(&self, facility: FacilityId) -> Option<Coord> {
        self.facilities.get(&facility).copied()
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CoordRecord {
    kind: String,
    id:   u32,
    x:    f64,
    y:    f64,
}

/// Load a [`CoordIndex`] from a CSV file.
pub fn load_coords_csv(path: &Path) -> AggregateResult<CoordIndex> {
    let file = std::fs::File::open(path)
        .map_err(AggregateError::Io)?;
    load_coords_reader(file)
}

/// Like [`load_coords_csv`] but accepts any `Read` source.
pub fn load_coords_reader<R: Read>(reader: R) -> AggregateResult<CoordIndex> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut index = CoordIndex::new();

    for (row, result) in csv_reader.deserialize::<CoordRecord>().enumerate() {
        let record = result.map_err(|e| AggregateError::Parse(e.to_string()))?;
        let line = row + 2;

        let coord = Coord::new(record.x, record.y);
        if !coord.is_finite() {
            return Err(AggregateError::Parse(format!("line {line}: non-finite coordinate {coord}")));
        }

        match record.kind.trim().to_ascii_lowercase().as_str() {
            "link"     => { index.insert_link(LinkId(record.id), coord); }
            "facility" => { index.insert_facility(FacilityId(record.id), coord); }
            other => {
                return Err(AggregateError::Parse(format!(
                    "line {line}: unknown kind {other:?} (expected link or facility)"
                )));
            }
        }
    }

    debug!(
        "loaded coordinates: {} links, {} facilities",
        index.link_count(),
        index.facility_count()
    );
    Ok(index)
}

impl<T: CoordinateLookup + ?Sized> CoordinateLookup for &T {
    #[inline]
    fn link_coord(&self, link: LinkId) -> Option<Coord> {
        (**self).link_coord(link)
    }

    #[inline]
    fn facility_coord(&self, facility: FacilityId) -> Option<Coord> {
        (**self).facility_coord(facility)
    }
}
