//! `af-engine` — arc-flag precomputation.
//!
//! For every grid region the engine runs one *multi-origin* Dijkstra: a
//! single sweep over the reversed graph that simultaneously grows the
//! shortest-path trees rooted at all of the region's boundary nodes.  Every
//! link that appears in any of those trees gets the region's bit set in its
//! arc-flag mask; at query time a router can then discard every link whose
//! mask has the destination's bit clear.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`scratch`]  | `SearchScratch` — per-worker distance/predecessor slabs |
//! | [`search`]   | `PriorityMode`, the multi-origin Dijkstra               |
//! | [`flags`]    | `ArcFlagTable`, flag extraction, sequential driver      |
//! | [`dispatch`] | `WorkerTree`, `DispatchConfig`, parallel driver         |
//! | [`error`]    | `EngineError`, `EngineResult<T>`                        |

pub mod dispatch;
pub mod error;
pub mod flags;
pub mod scratch;
pub mod search;


pub use dispatch::{precompute_arc_flags_parallel, DispatchConfig, WorkerTree};
pub use error::{EngineError, EngineResult};
pub use flags::{flagged_links, precompute_arc_flags, precompute_region, ArcFlagTable};
pub use scratch::SearchScratch;
pub use search::{search_region, PriorityMode};
