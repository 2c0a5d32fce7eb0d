//! The `ReportWriter` trait implemented by all backend writers.

use crate::{ComparisonRow, ComparisonSummaryRow, DistanceBinRow, ModalSplitRow, OutputResult};

/// Sink for the values of one calibration run.
///
/// Writers only lay the rows out; every number is computed beforehand (see
/// the conversions in [`row`](crate::row)).  Writing after
/// [`finish`](Self::finish) fails with [`OutputError::Finished`](crate::OutputError::Finished).
pub trait ReportWriter {
    /// Write the modal split, one row per mode.
    fn write_modal_split(&mut self, rows: &[ModalSplitRow]) -> OutputResult<()>;

    /// Write the bins of one distribution under `label` (e.g. `"simulated"`).
    fn write_distribution(&mut self, label: &str, rows: &[DistanceBinRow]) -> OutputResult<()>;

    /// Write a per-bin comparison and its summary.
    fn write_comparison(&mut self, rows: &[ComparisonRow], summary: &ComparisonSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
