//! Simulated-versus-expected comparison of two distance distributions.

use log::debug;

use tc_distribution::{BinKey, DistanceDistribution};

use crate::AggregateResult;

/// One bin of a [`Comparison`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BinComparison {
    pub key:            BinKey,
    /// Raw simulated count.
    pub simulated:      u64,
    pub scaling_factor: f64,
    /// `simulated * scaling_factor`.
    pub scaled:         f64,
    pub expected:       u64,
    /// `scaled - expected`.
    pub difference:     f64,
    pub squared_error:  f64,
}

/// Per-bin differences plus the accumulated error metric.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Comparison {
    pub bins:                Vec<BinComparison>,
    /// Sum of scaled simulated counts.
    pub simulated_total:     f64,
    pub expected_total:      u64,
    /// Sum of per-bin squared errors.
    pub total_squared_error: f64,
}

impl Comparison {
    /// Root-mean-square of the per-bin differences (`0.0` with no bins).
    pub fn rmse(&self) -> f64 {
        if self.bins.is_empty() {
            return 0.0;
        }
        (self.total_squared_error / self.bins.len() as f64).sqrt()
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    fn push(&mut self, key: BinKey, simulated: u64, expected: u64, scaling_factor: f64) {
        let scaled = simulated as f64 * scaling_factor;
        let difference = scaled - expected as f64;
        let squared_error = difference * difference;

        self.simulated_total += scaled;
        self.expected_total += expected;
        self.total_squared_error += squared_error;
        self.bins.push(BinComparison {
            key,
            simulated,
            scaling_factor,
            scaled,
            expected,
            difference,
            squared_error,
        });
    }
}

/// Compare `simulated` against `expected` bin by bin, scaling every
/// simulated count by `scaling_factor`.
///
/// # Errors
///
/// `Distribution(StructureMismatch)` unless both have exactly the same bins.
pub fn compare(
    simulated:      &DistanceDistribution,
    expected:       &DistanceDistribution,
    scaling_factor: f64,
) -> AggregateResult<Comparison> {
    compare_by(simulated, expected, |_| scaling_factor)
}

/// Like [`compare`] but scales each bin by the scaling factor `expected`
/// holds for the bin's mode.  Non-modal bins use `1.0`.
pub fn compare_with_mode_scaling(
    simulated: &DistanceDistribution,
    expected:  &DistanceDistribution,
) -> AggregateResult<Comparison> {
    compare_by(simulated, expected, |key| {
        key.mode.map_or(1.0, |mode| expected.scaling_factor(mode))
    })
}

fn compare_by(
    simulated: &DistanceDistribution,
    expected:  &DistanceDistribution,
    factor:    impl Fn(&BinKey) -> f64,
) -> AggregateResult<Comparison> {
    simulated.check_same_bins(expected)?;

    let mut out = Comparison::default();
    for (sim, exp) in simulated.bins().zip(expected.bins()) {
        let key = sim.key();
        out.push(key, sim.count, exp.count, factor(&key));
    }
    debug!(
        "compared {} bins: simulated {:.1}, expected {}, squared error {:.1}",
        out.len(),
        out.simulated_total,
        out.expected_total,
        out.total_squared_error
    );
    Ok(out)
}
