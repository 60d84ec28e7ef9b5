//! Engine error type.
//!
//! Errors inside one region's run are fatal to that run; the drivers stop the
//! whole job on the first failure rather than emitting a partial flag table.

use thiserror::Error;

use af_core::LinkId;

/// Errors produced by `af-engine`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A link with a negative or non-finite weight would corrupt every
    /// shortest-path tree it can reach.
    #[error("link {link} has negative travel time {value}")]
    NegativeTravelTime { link: LinkId, value: f64 },

    /// A dispatched worker thread panicked; the job cannot be trusted.
    #[error("worker thread panicked during region dispatch")]
    WorkerPanicked,
}

pub type EngineResult<T> = Result<T, EngineError>;
