//! `af-spatial` — static spatial index for nearest-node lookup.
//!
//! One module: [`kdtree`].  The tree is built once per node set and never
//! mutated; queries are read-only and allocation-free.

pub mod kdtree;


pub use kdtree::KdTree;
