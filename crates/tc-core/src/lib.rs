//! `tc-core` — foundational types for the `rust_tc` trip calibration framework.
//!
//! This crate is a dependency of every other `tc-*` crate.  It has no `tc-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `LinkId`, `FacilityId`                     |
//! | [`coord`]       | `Coord`, beeline (Euclidean) distance                 |
//! | [`time`]        | `EventTime`                                           |
//! | [`mode`]        | `Mode` enum, `ModePriority` dominant-mode policy      |
//! | [`error`]       | `TcError`, `TcResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod coord;
pub mod error;
pub mod ids;
pub mod mode;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::Coord;
pub use error::{TcError, TcResult};
pub use ids::{AgentId, FacilityId, LinkId};
pub use mode::{Mode, ModePriority};
pub use time::EventTime;
