//! Core error type.
//!
//! Sub-crates define their own error enums and convert `CoreError` upward
//! via `#[from]` where the codec crosses a crate seam.

use thiserror::Error;

/// Errors produced by `af-core` (currently all from the hex mask codec).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("empty hex string")]
    EmptyHex,

    #[error("invalid hex digit {digit:?}")]
    InvalidHexDigit { digit: char },

    #[error("hex value does not fit in a {width}-bit mask")]
    MaskOverflow { width: usize },
}

/// Shorthand result type for `af-core`.
pub type CoreResult<T> = Result<T, CoreError>;
