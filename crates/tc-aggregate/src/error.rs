use thiserror::Error;

use tc_core::{FacilityId, LinkId};
use tc_distribution::DistributionError;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("no coordinate for {which} point: facility {facility:?}, link {link}")]
    MissingCoord {
        which:    &'static str,
        facility: Option<FacilityId>,
        link:     LinkId,
    },

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error("coordinate parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AggregateResult<T> = Result<T, AggregateError>;
