//! `tc-aggregate` — turn a batch of reconstructed trips into calibration
//! statistics.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`lookup`]     | `CoordinateLookup` trait, `CoordIndex`, coordinate CSV loader  |
//! | [`aggregator`] | `TripAggregator`, `ModalSplit`                                 |
//! | [`comparison`] | `compare`, `compare_with_mode_scaling`, `Comparison`           |
//! | [`error`]      | `AggregateError`, `AggregateResult<T>`                         |
//!
//! # Pipeline
//!
//! ```text
//! TripMap ─▶ TripAggregator ─┬─ modal_split()
//!                            └─ modal_distance_distribution(&expected) ─▶ simulated
//!                                                                          │
//!                         compare(&simulated, &expected, scaling) ◀────────┘
//! ```
//!
//! A trip whose distance falls outside every bin, or whose endpoints have no
//! coordinate, fails the whole aggregation call.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Builds distance distributions on Rayon's thread pool.   |

pub mod aggregator;
pub mod comparison;
pub mod error;
pub mod lookup;


pub use aggregator::{ModalSplit, TripAggregator};
pub use comparison::{BinComparison, Comparison, compare, compare_with_mode_scaling};
pub use error::{AggregateError, AggregateResult};
pub use lookup::{CoordIndex, CoordinateLookup, load_coords_csv, load_coords_reader};
