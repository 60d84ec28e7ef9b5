//! `af-io` — everything that touches a file.
//!
//! The rest of the workspace operates on in-memory collections; this crate
//! owns the tabular formats and the assembly of a queryable [`RoadMap`].
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`loader`]   | node/link/speeds CSV → [`af_graph::RoadGraph`]          |
//! | [`map`]      | `RoadMap` — graph + grid + k-d trees, snap queries      |
//! | [`arcflags`] | arc-flag CSV writer and reader                          |
//! | [`trip`]     | taxi-trip CSV records, winding factor                   |
//! | [`error`]    | `LoadError`, `LoadResult<T>`                            |

pub mod arcflags;
pub mod error;
pub mod loader;
pub mod map;
pub mod trip;

#[cfg(test)]
mod tests;

pub use arcflags::{read_arc_flags, read_arc_flags_path, write_arc_flags, write_arc_flags_path};
pub use error::{LoadError, LoadResult};
pub use loader::{apply_speeds, apply_speeds_path, link_index, load_graph, load_graph_paths};
pub use map::{MapConfig, RoadMap};
pub use trip::{load_trips, load_trips_path, Trip};
