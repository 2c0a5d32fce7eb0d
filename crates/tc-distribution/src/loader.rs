//! Reference-statistics loader.
//!
//! # CSV format
//!
//! One row per expected bin.  Leave `mode` empty for non-modal bins and the
//! factor columns empty where the default of `1.0` applies.  A mode's factors
//! only need to appear on one of its rows, but every row that states them
//! must agree.
//!
//! ```csv
//! mode,lower_limit,upper_limit,expected_count,beeline_factor,scaling_factor
//! car,0,1000,120,1.3,10
//! car,1000,3000,340,,
//! pt,0,1000,15,1.5,10
//! pt,1000,3000,80,,
//! ,0,1000,135,,
//! ,1000,3000,420,,
//! ```
//!
//! The loaded distribution is checked with
//! [`DistanceDistribution::validate_contiguous`].

use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use tc_core::Mode;

use crate::{DistanceDistribution, DistributionError};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ReferenceRecord {
    mode:           Option<String>,
    lower_limit:    f64,
    upper_limit:    f64,
    expected_count: u64,
    beeline_factor: Option<f64>,
    scaling_factor: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the expected distribution from a CSV file.
pub fn load_reference_csv(path: &Path) -> Result<DistanceDistribution, DistributionError> {
    let file = std::fs::File::open(path)
        .map_err(DistributionError::Io)?;
    load_reference_reader(file)
}

/// Like [`load_reference_csv`] but accepts any `Read` source.
pub fn load_reference_reader<R: Read>(reader: R) -> Result<DistanceDistribution, DistributionError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut dist = DistanceDistribution::new();

    for (row, result) in csv_reader.deserialize::<ReferenceRecord>().enumerate() {
        let record = result.map_err(|e| DistributionError::Parse(e.to_string()))?;
        let line = row + 2;

        let mode = record
            .mode
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Mode::parse);

        dist.add_bin(mode, record.lower_limit, record.upper_limit, record.expected_count)?;

        let factors = [
            ("beeline_factor", record.beeline_factor),
            ("scaling_factor", record.scaling_factor),
        ];
        for (column, value) in factors {
            let Some(value) = value else { continue };
            let Some(mode) = mode else {
                return Err(DistributionError::Parse(format!(
                    "line {line}: {column} given on a non-modal row"
                )));
            };
            apply_factor(&mut dist, column, mode, value, line)?;
        }
    }

    dist.validate_contiguous()?;
    debug!(
        "loaded reference distribution: {} bins, {} modes, {} expected trips",
        dist.len(),
        dist.modes().len(),
        dist.total_count()
    );
    Ok(dist)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn apply_factor(
    dist:   &mut DistanceDistribution,
    column: &str,
    mode:   Mode,
    value:  f64,
    line:   usize,
) -> Result<(), DistributionError> {
    let current = if column == "beeline_factor" {
        dist.beeline_factors().get(&mode).copied()
    } else {
        dist.scaling_factors().get(&mode).copied()
    };

    match current {
        Some(existing) if existing != value => Err(DistributionError::Parse(format!(
            "line {line}: {column} {value} for {mode} conflicts with earlier {existing}"
        ))),
        Some(_) => Ok(()),
        None if column == "beeline_factor" => dist.set_beeline_factor(mode, value),
        None => dist.set_scaling_factor(mode, value),
    }
}
