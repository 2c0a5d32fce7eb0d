//! The `DistanceDistribution` — ordered bins plus per-mode factor tables.

use std::collections::BTreeMap;

use tc_core::Mode;

use crate::{BinKey, DistanceBin, DistributionError, DistributionResult};

/// Binned trip counts, optionally split by mode, with the two per-mode
/// correction tables used during aggregation and comparison.
///
/// - **beeline factor**: multiplies straight-line distance to approximate the
///   network distance before binning.
/// - **scaling factor**: multiplies a simulated (sampled) count to estimate a
///   full-population count before comparing with reference totals.
///
/// Both default to `1.0` for modes without an entry.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceDistribution {
    bins:            BTreeMap<BinKey, DistanceBin>,
    beeline_factors: BTreeMap<Mode, f64>,
    scaling_factors: BTreeMap<Mode, f64>,
}

impl DistanceDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Register a new bin `[lower_limit, upper_limit)` for `mode`.
    ///
    /// # Errors
    ///
    /// - `InvalidRange` unless `0 <= lower_limit < upper_limit`, both finite.
    /// - `DuplicateBin` if the exact same bin exists.
    /// - `OverlappingBin` if the range intersects another bin of `mode`.
    pub fn add_bin(
        &mut self,
        mode:          Option<Mode>,
        lower_limit:   f64,
        upper_limit:   f64,
        initial_count: u64,
    ) -> DistributionResult<()> {
        let valid = lower_limit.is_finite()
            && upper_limit.is_finite()
            && lower_limit >= 0.0
            && lower_limit < upper_limit;
        if !valid {
            return Err(DistributionError::InvalidRange { lower: lower_limit, upper: upper_limit });
        }

        let key = BinKey::new(mode, lower_limit, upper_limit);
        if self.bins.contains_key(&key) {
            return Err(DistributionError::DuplicateBin(key));
        }
        if let Some(existing) = self.mode_bins(mode).map(DistanceBin::key).find(|k| k.overlaps(&key)) {
            return Err(DistributionError::OverlappingBin { new: key, existing });
        }

        self.bins.insert(key, DistanceBin {
            mode,
            lower_limit,
            upper_limit,
            count: initial_count,
        });
        Ok(())
    }

    /// Set the beeline correction factor for `mode`.
    pub fn set_beeline_factor(&mut self, mode: Mode, factor: f64) -> DistributionResult<()> {
        check_factor("beeline factor", mode, factor)?;
        self.beeline_factors.insert(mode, factor);
        Ok(())
    }

    /// Set the count scaling factor for `mode`.
    pub fn set_scaling_factor(&mut self, mode: Mode, factor: f64) -> DistributionResult<()> {
        check_factor("scaling factor", mode, factor)?;
        self.scaling_factors.insert(mode, factor);
        Ok(())
    }

    // ── Counting ──────────────────────────────────────────────────────────

    /// Add one trip of `distance` metres to the bin of `mode` containing it.
    ///
    /// # Errors
    ///
    /// `NoMatchingBin` if no bin of `mode` contains `distance` (this includes
    /// negative and NaN distances, and modes with no bins at all).
    pub fn increase_count_by_one(&mut self, mode: Option<Mode>, distance: f64) -> DistributionResult<()> {
        let bin = self.bin_for_mut(mode, distance)
            .ok_or(DistributionError::NoMatchingBin { mode, distance })?;
        bin.count += 1;
        Ok(())
    }

    /// Key of the bin of `mode` containing `distance`, if any.
    pub fn find_bin(&self, mode: Option<Mode>, distance: f64) -> Option<BinKey> {
        if distance.is_nan() {
            return None;
        }
        // Bins of one mode never overlap, so the only candidate is the one
        // with the largest lower limit not above `distance`.
        self.bins
            .range(BinKey::mode_start(mode)..=BinKey::upto(mode, distance))
            .next_back()
            .map(|(k, _)| *k)
            .filter(|k| k.contains(distance))
    }

    fn bin_for_mut(&mut self, mode: Option<Mode>, distance: f64) -> Option<&mut DistanceBin> {
        let key = self.find_bin(mode, distance)?;
        self.bins.get_mut(&key)
    }

    // ── Structural operations ─────────────────────────────────────────────

    /// Same bin edges and factor tables, every count reset to zero.
    pub fn copy_with_empty_bins(&self) -> Self {
        let mut copy = self.clone();
        for bin in copy.bins.values_mut() {
            bin.count = 0;
        }
        copy
    }

    /// Add the counts of `other` into `self`.
    ///
    /// # Errors
    ///
    /// `StructureMismatch` if the two distributions do not have exactly the
    /// same bins.  `self` is left unchanged in that case.
    pub fn merge_counts(&mut self, other: &DistanceDistribution) -> DistributionResult<()> {
        self.check_same_bins(other)?;
        for (bin, theirs) in self.bins.values_mut().zip(other.bins.values()) {
            bin.count += theirs.count;
        }
        Ok(())
    }

    /// `Ok` if `self` and `other` have identical bin keys.
    pub fn check_same_bins(&self, other: &DistanceDistribution) -> DistributionResult<()> {
        if self.bins.len() != other.bins.len() {
            return Err(DistributionError::StructureMismatch(format!(
                "{} bins vs {} bins",
                self.bins.len(),
                other.bins.len()
            )));
        }
        if let Some((mine, theirs)) = self.bins.keys().zip(other.bins.keys()).find(|(a, b)| a != b) {
            return Err(DistributionError::StructureMismatch(format!("{mine} vs {theirs}")));
        }
        Ok(())
    }

    /// Check that each mode's bins tile one contiguous range.
    ///
    /// # Errors
    ///
    /// `Gap` naming the first hole found.
    pub fn validate_contiguous(&self) -> DistributionResult<()> {
        let mut prev: Option<&DistanceBin> = None;
        for bin in self.bins.values() {
            if let Some(p) = prev {
                if p.mode == bin.mode && p.upper_limit != bin.lower_limit {
                    return Err(DistributionError::Gap {
                        mode:  bin.mode,
                        upper: p.upper_limit,
                        lower: bin.lower_limit,
                    });
                }
            }
            prev = Some(bin);
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// All bins, ordered by mode then lower limit.
    pub fn bins(&self) -> impl Iterator<Item = &DistanceBin> {
        self.bins.values()
    }

    /// Bins of one mode, shortest first.
    pub fn mode_bins(&self, mode: Option<Mode>) -> impl Iterator<Item = &DistanceBin> {
        self.bins
            .range(BinKey::mode_start(mode)..=BinKey::mode_end(mode))
            .map(|(_, b)| b)
    }

    pub fn bin(&self, key: &BinKey) -> Option<&DistanceBin> {
        self.bins.get(key)
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Distinct bin modes in key order (`None` first if present).
    pub fn modes(&self) -> Vec<Option<Mode>> {
        let mut modes: Vec<Option<Mode>> = self.bins.keys().map(|k| k.mode).collect();
        modes.dedup();
        modes
    }

    /// Sum of all bin counts.
    pub fn total_count(&self) -> u64 {
        self.bins.values().map(|b| b.count).sum()
    }

    /// Sum of bin counts for one mode.
    pub fn count_for_mode(&self, mode: Option<Mode>) -> u64 {
        self.mode_bins(mode).map(|b| b.count).sum()
    }

    /// Beeline correction factor for `mode` (`1.0` if unset).
    pub fn beeline_factor(&self, mode: Mode) -> f64 {
        self.beeline_factors.get(&mode).copied().unwrap_or(1.0)
    }

    /// Scaling factor for `mode` (`1.0` if unset).
    pub fn scaling_factor(&self, mode: Mode) -> f64 {
        self.scaling_factors.get(&mode).copied().unwrap_or(1.0)
    }

    pub fn beeline_factors(&self) -> &BTreeMap<Mode, f64> {
        &self.beeline_factors
    }

    pub fn scaling_factors(&self) -> &BTreeMap<Mode, f64> {
        &self.scaling_factors
    }
}

fn check_factor(what: &'static str, mode: Mode, value: f64) -> DistributionResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DistributionError::InvalidFactor { what, mode, value })
    }
}
