//! Load-path error type.
//!
//! Malformed input — a missing column, an unparseable numeric — fails fast
//! with the underlying detail attached.  Dangling links and unknown id pairs
//! are *not* errors; the loaders skip them silently.

use thiserror::Error;

/// Errors produced by `af-io`.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Mask(#[from] af_core::CoreError),

    #[error(transparent)]
    Graph(#[from] af_graph::GraphError),
}

pub type LoadResult<T> = Result<T, LoadError>;
