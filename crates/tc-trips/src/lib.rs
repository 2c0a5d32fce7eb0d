//! `tc-trips` — rebuild door-to-door trips from a simulator event stream.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                   |
//! |-------------------|------------------------------------------------------------|
//! | [`trip`]          | `Leg`, `Trip`, `TripMap`                                   |
//! | [`filter`]        | `AgentFilter` trait, `AcceptAll`, `AgentSet`, `FnFilter`   |
//! | [`reconstructor`] | `TripReconstructor<F>` — the per-agent state machine       |
//!
//! # Trip model
//!
//! A trip runs from the end of one *real* activity to the start of the next.
//! Stage activities (`"pt interaction"`, `"car interaction"`, …) sit between
//! the legs of one trip and never split it:
//!
//! ```text
//! home ─end─▶ walk ▶ pt interaction ▶ pt ▶ pt interaction ▶ walk ─start─▶ work
//!        └──────────────────────── one trip, main mode pt ───────────────┘
//! ```
//!
//! The reconstructor is single-threaded and owned by one replay.  Run several
//! replays concurrently by giving each its own instance.

pub mod filter;
pub mod reconstructor;
pub mod trip;

#[cfg(test)]
mod tests;

pub use filter::{AcceptAll, AgentFilter, AgentSet, FnFilter};
pub use reconstructor::{TripReconstructor, is_stage_activity};
pub use trip::{Leg, Trip, TripMap};
