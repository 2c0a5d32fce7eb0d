use thiserror::Error;

use tc_core::Mode;

use crate::{BinKey, mode_label};

#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("bin {0} already exists")]
    DuplicateBin(BinKey),

    #[error("invalid bin range [{lower}, {upper}): limits must be finite with 0 <= lower < upper")]
    InvalidRange { lower: f64, upper: f64 },

    #[error("bin {new} overlaps existing bin {existing}")]
    OverlappingBin { new: BinKey, existing: BinKey },

    #[error("no matching bin for mode {} and distance {distance}", mode_label(.mode))]
    NoMatchingBin { mode: Option<Mode>, distance: f64 },

    #[error("bins for mode {} leave a gap between {upper} and {lower}", mode_label(.mode))]
    Gap { mode: Option<Mode>, upper: f64, lower: f64 },

    #[error("invalid {what} {value} for mode {mode}: must be finite and > 0")]
    InvalidFactor { what: &'static str, mode: Mode, value: f64 },

    #[error("distributions do not share the same bins: {0}")]
    StructureMismatch(String),

    #[error("reference parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DistributionResult<T> = Result<T, DistributionError>;
