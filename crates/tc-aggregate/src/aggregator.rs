//! `TripAggregator` — modal split and distance distributions over a trip batch.

use std::collections::BTreeMap;

use log::debug;

use tc_core::Mode;
use tc_distribution::DistanceDistribution;
use tc_trips::{Trip, TripMap};

use crate::{AggregateResult, CoordinateLookup};

/// Trip count per dominant mode.
pub type ModalSplit = BTreeMap<Mode, u64>;

/// Whether trips are binned under their own mode or into the non-modal bins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Binning {
    Modal,
    Overall,
}

/// Aggregates one batch of completed trips.
///
/// Every operation is a fresh computation over the batch; nothing is cached
/// between calls.  With the `parallel` feature the distance distributions
/// are built on Rayon's thread pool from per-worker partial distributions
/// merged at the end, which yields the same counts as the sequential path.
pub struct TripAggregator<L: CoordinateLookup> {
    lookup: L,
    trips:  Vec<Trip>,
}

impl<L: CoordinateLookup> TripAggregator<L> {
    pub fn new(lookup: L, trips: Vec<Trip>) -> Self {
        Self { lookup, trips }
    }

    /// Flatten a reconstructor snapshot, agents in ascending id order.
    pub fn from_trip_map(lookup: L, trips: &TripMap) -> Self {
        Self::new(lookup, trips.values().flatten().cloned().collect())
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    // ── Modal split ───────────────────────────────────────────────────────

    /// Number of trips per dominant mode.  Modes without trips are absent.
    pub fn modal_split(&self) -> ModalSplit {
        let mut split = ModalSplit::new();
        for trip in &self.trips {
            *split.entry(trip.main_mode).or_default() += 1;
        }
        split
    }

    /// [`modal_split`](Self::modal_split) with each count multiplied by the
    /// scaling factor `reference` holds for its mode.
    pub fn scaled_modal_split(&self, reference: &DistanceDistribution) -> BTreeMap<Mode, f64> {
        self.modal_split()
            .into_iter()
            .map(|(mode, count)| (mode, count as f64 * reference.scaling_factor(mode)))
            .collect()
    }

    // ── Distances ─────────────────────────────────────────────────────────

    /// Straight-line distance between the trip's endpoints times `factor`.
    ///
    /// # Errors
    ///
    /// `MissingCoord` if either endpoint cannot be resolved.
    pub fn beeline_distance(&self, trip: &Trip, factor: f64) -> AggregateResult<f64> {
        let from = self.lookup.departure_coord(trip)?;
        let to = self.lookup.arrival_coord(trip)?;
        Ok(from.distance(to) * factor)
    }

    /// Count every trip into the bin of its dominant mode in an empty copy of
    /// `reference`.  Distances are scaled by the mode's beeline factor.
    ///
    /// # Errors
    ///
    /// The first `MissingCoord` or `NoMatchingBin` aborts the whole call.
    pub fn modal_distance_distribution(
        &self,
        reference: &DistanceDistribution,
    ) -> AggregateResult<DistanceDistribution> {
        let dist = self.fill(reference, Binning::Modal)?;
        debug!("modal distance distribution: {} trips in {} bins", dist.total_count(), dist.len());
        Ok(dist)
    }

    /// Like [`modal_distance_distribution`](Self::modal_distance_distribution)
    /// but counts into the non-modal bins of `reference`.  Each trip still
    /// uses the beeline factor of its own mode.
    pub fn distance_distribution(
        &self,
        reference: &DistanceDistribution,
    ) -> AggregateResult<DistanceDistribution> {
        let dist = self.fill(reference, Binning::Overall)?;
        debug!("overall distance distribution: {} trips in {} bins", dist.total_count(), dist.len());
        Ok(dist)
    }

    fn count_trip(&self, dist: &mut DistanceDistribution, trip: &Trip, binning: Binning) -> AggregateResult<()> {
        let distance = self.beeline_distance(trip, dist.beeline_factor(trip.main_mode))?;
        let mode = match binning {
            Binning::Modal   => Some(trip.main_mode),
            Binning::Overall => None,
        };
        dist.increase_count_by_one(mode, distance)?;
        Ok(())
    }

    fn fill(&self, reference: &DistanceDistribution, binning: Binning) -> AggregateResult<DistanceDistribution> {
        #[cfg(not(feature = "parallel"))]
        {
            let mut dist = reference.copy_with_empty_bins();
            for trip in &self.trips {
                self.count_trip(&mut dist, trip, binning)?;
            }
            Ok(dist)
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            use crate::AggregateError;

            self.trips
                .par_iter()
                .try_fold(
                    || reference.copy_with_empty_bins(),
                    |mut partial, trip| {
                        self.count_trip(&mut partial, trip, binning)?;
                        Ok::<_, AggregateError>(partial)
                    },
                )
                .try_reduce(
                    || reference.copy_with_empty_bins(),
                    |mut left, right| {
                        left.merge_counts(&right)?;
                        Ok::<_, AggregateError>(left)
                    },
                )
        }
    }
}
