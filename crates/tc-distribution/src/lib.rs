//! `tc-distribution` — binned trip-distance distributions.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                 |
//! |------------------|----------------------------------------------------------|
//! | [`bins`]         | `BinKey`, `DistanceBin`                                  |
//! | [`distribution`] | `DistanceDistribution` (bins + per-mode factor tables)   |
//! | [`loader`]       | `load_reference_csv`, `load_reference_reader`            |
//! | [`error`]        | `DistributionError`, `DistributionResult<T>`             |
//!
//! # Lifecycle
//!
//! ```text
//! reference CSV ──load──▶ expected ──copy_with_empty_bins──▶ simulated (all 0)
//!                                                              │
//!                                  increase_count_by_one ◀─────┘ per trip
//! ```
//!
//! # Bin boundaries
//!
//! Every bin covers the half-open range `[lower_limit, upper_limit)`.  A
//! distance sitting exactly on a shared edge belongs to the upper bin, so
//! adjacent bins such as `[0, 1000)` and `[1000, 3000)` never both match.
//! Bins of one mode may not overlap.

pub mod bins;
pub mod distribution;
pub mod error;
pub mod loader;


pub use bins::{BinKey, DistanceBin, mode_label};
pub use distribution::DistanceDistribution;
pub use error::{DistributionError, DistributionResult};
pub use loader::{load_reference_csv, load_reference_reader};
