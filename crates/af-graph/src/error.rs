//! Graph-subsystem error type.

use thiserror::Error;

use af_core::LinkId;

/// Errors produced by `af-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("link {link} has invalid travel time {value}")]
    InvalidTravelTime { link: LinkId, value: f64 },

    #[error("link {link} has invalid speed {value}")]
    InvalidSpeed { link: LinkId, value: f64 },
}

pub type GraphResult<T> = Result<T, GraphError>;
