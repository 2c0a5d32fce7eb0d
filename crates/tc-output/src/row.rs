//! Plain data row types written by report backends, and the conversions
//! that produce them.

use tc_aggregate::{Comparison, ModalSplit};
use tc_core::Mode;
use tc_distribution::DistanceDistribution;

/// Trips of one dominant mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalSplitRow {
    pub mode:  Mode,
    pub trips: u64,
    /// `trips` over all trips of the split, `0.0` for an empty split.
    pub share: f64,
}

/// One bin of a distance distribution.  `mode = None` is a non-modal bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBinRow {
    pub mode:        Option<Mode>,
    pub lower_limit: f64,
    pub upper_limit: f64,
    pub count:       u64,
}

/// One bin of a simulated-versus-expected comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonRow {
    pub mode:           Option<Mode>,
    pub lower_limit:    f64,
    pub upper_limit:    f64,
    pub simulated:      u64,
    pub scaling_factor: f64,
    pub scaled:         f64,
    pub expected:       u64,
    pub difference:     f64,
    pub squared_error:  f64,
}

/// Totals of one comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonSummaryRow {
    pub bins:                u64,
    pub simulated_total:     f64,
    pub expected_total:      u64,
    pub total_squared_error: f64,
    pub rmse:                f64,
}

// ── Conversions ───────────────────────────────────────────────────────────────

pub fn modal_split_rows(split: &ModalSplit) -> Vec<ModalSplitRow> {
    let total: u64 = split.values().sum();
    split
        .iter()
        .map(|(&mode, &trips)| ModalSplitRow {
            mode,
            trips,
            share: if total == 0 { 0.0 } else { trips as f64 / total as f64 },
        })
        .collect()
}

pub fn distribution_rows(dist: &DistanceDistribution) -> Vec<DistanceBinRow> {
    dist.bins()
        .map(|b| DistanceBinRow {
            mode:        b.mode,
            lower_limit: b.lower_limit,
            upper_limit: b.upper_limit,
            count:       b.count,
        })
        .collect()
}

pub fn comparison_rows(cmp: &Comparison) -> Vec<ComparisonRow> {
    cmp.bins
        .iter()
        .map(|b| ComparisonRow {
            mode:           b.key.mode,
            lower_limit:    b.key.lower_limit,
            upper_limit:    b.key.upper_limit,
            simulated:      b.simulated,
            scaling_factor: b.scaling_factor,
            scaled:         b.scaled,
            expected:       b.expected,
            difference:     b.difference,
            squared_error:  b.squared_error,
        })
        .collect()
}

pub fn comparison_summary(cmp: &Comparison) -> ComparisonSummaryRow {
    ComparisonSummaryRow {
        bins:                cmp.len() as u64,
        simulated_total:     cmp.simulated_total,
        expected_total:      cmp.expected_total,
        total_squared_error: cmp.total_squared_error,
        rmse:                cmp.rmse(),
    }
}
