//! `tc-output` — calibration report writers for the rust_tc framework.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                                        |
//! |-----------|---------|----------------------------------------------------------------------|
//! | *(none)*  | CSV     | `modal_split.csv`, `distance_distribution.csv`, `comparison.csv`, `comparison_summary.csv` |
//! | `sqlite`  | SQLite  | `report.db`                                                          |
//!
//! Both implement [`ReportWriter`].  The functions in [`row`] turn the
//! values computed by `tc-aggregate` into writer rows.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tc_output::{CsvReportWriter, ReportWriter, row};
//!
//! let mut writer = CsvReportWriter::new(Path::new("./report"))?;
//! writer.write_modal_split(&row::modal_split_rows(&agg.modal_split()))?;
//! writer.write_distribution("simulated", &row::distribution_rows(&simulated))?;
//! writer.write_comparison(&row::comparison_rows(&cmp), &row::comparison_summary(&cmp))?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvReportWriter;
pub use error::{OutputError, OutputResult};
pub use row::{ComparisonRow, ComparisonSummaryRow, DistanceBinRow, ModalSplitRow};
pub use writer::ReportWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteReportWriter;
