//! `af-graph` — road network graph, grid partitioning, boundary nodes.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`network`] | `RoadGraph` (SoA + CSR), `RoadGraphBuilder`              |
//! | [`grid`]    | `Grid` — uniform `D×D` lat/lon partition                 |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                           |

pub mod error;
pub mod grid;
pub mod network;


pub use error::{GraphError, GraphResult};
pub use grid::{Grid, DEFAULT_GRID_DIM};
pub use network::{RoadGraph, RoadGraphBuilder, DEFAULT_SPEED_MPS};
