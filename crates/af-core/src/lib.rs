//! `af-core` — foundational types for the `arcflow` road-network engine.
//!
//! This crate is a dependency of every other `af-*` crate.  It intentionally
//! has no `af-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                |
//! |-----------|---------------------------------------------------------|
//! | [`ids`]   | `NodeId`, `LinkId`, `RegionId`                          |
//! | [`geo`]   | `GeoPoint`, `PlanarPoint`, `BoundingBox`, projection    |
//! | [`mask`]  | `RegionMask` bit-vector and its hex codec               |
//! | [`error`] | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod error;
pub mod geo;
pub mod ids;
pub mod mask;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{BoundingBox, GeoPoint, PlanarPoint};
pub use ids::{LinkId, NodeId, RegionId};
pub use mask::RegionMask;
