//! Core error type.
//!
//! Each `tc-*` crate defines its own error enum; `TcError` only covers
//! failures of the types defined here.

use thiserror::Error;

use crate::Mode;

#[derive(Debug, Error)]
pub enum TcError {
    #[error("mode {0} appears more than once in the priority order")]
    DuplicatePriority(Mode),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tc-core`.
pub type TcResult<T> = Result<T, TcError>;
