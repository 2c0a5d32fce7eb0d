//! CSV report backend.
//!
//! Creates four files in the configured output directory:
//! - `modal_split.csv`
//! - `distance_distribution.csv` (one `label` column per written distribution)
//! - `comparison.csv`
//! - `comparison_summary.csv`
//!
//! Non-modal bins carry `all` in the `mode` column.

use std::fs::File;
use std::path::Path;

use ::csv::Writer;
use log::debug;

use tc_distribution::mode_label;

use crate::{ComparisonRow, ComparisonSummaryRow, DistanceBinRow, ModalSplitRow, OutputError, OutputResult};
use crate::writer::ReportWriter;

/// Writes a calibration report to four CSV files.
pub struct CsvReportWriter {
    modal_split:  Writer<File>,
    distribution: Writer<File>,
    comparison:   Writer<File>,
    summary:      Writer<File>,
    finished:     bool,
}

impl CsvReportWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut modal_split = Writer::from_path(dir.join("modal_split.csv"))?;
        modal_split.write_record(["mode", "trips", "share"])?;

        let mut distribution = Writer::from_path(dir.join("distance_distribution.csv"))?;
        distribution.write_record(["label", "mode", "lower_limit", "upper_limit", "count"])?;

        let mut comparison = Writer::from_path(dir.join("comparison.csv"))?;
        comparison.write_record([
            "mode",
            "lower_limit",
            "upper_limit",
            "simulated",
            "scaling_factor",
            "scaled",
            "expected",
            "difference",
            "squared_error",
        ])?;

        let mut summary = Writer::from_path(dir.join("comparison_summary.csv"))?;
        summary.write_record(["bins", "simulated_total", "expected_total", "total_squared_error", "rmse"])?;

        Ok(Self {
            modal_split,
            distribution,
            comparison,
            summary,
            finished: false,
        })
    }

    fn check_open(&self) -> OutputResult<()> {
        if self.finished { Err(OutputError::Finished) } else { Ok(()) }
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_modal_split(&mut self, rows: &[ModalSplitRow]) -> OutputResult<()> {
        self.check_open()?;
        for row in rows {
            self.modal_split.write_record(&[
                row.mode.as_str().to_string(),
                row.trips.to_string(),
                row.share.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_distribution(&mut self, label: &str, rows: &[DistanceBinRow]) -> OutputResult<()> {
        self.check_open()?;
        for row in rows {
            self.distribution.write_record(&[
                label.to_string(),
                mode_label(&row.mode).to_string(),
                row.lower_limit.to_string(),
                row.upper_limit.to_string(),
                row.count.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_comparison(&mut self, rows: &[ComparisonRow], summary: &ComparisonSummaryRow) -> OutputResult<()> {
        self.check_open()?;
        for row in rows {
            self.comparison.write_record(&[
                mode_label(&row.mode).to_string(),
                row.lower_limit.to_string(),
                row.upper_limit.to_string(),
                row.simulated.to_string(),
                row.scaling_factor.to_string(),
                row.scaled.to_string(),
                row.expected.to_string(),
                row.difference.to_string(),
                row.squared_error.to_string(),
            ])?;
        }
        self.summary.write_record(&[
            summary.bins.to_string(),
            summary.simulated_total.to_string(),
            summary.expected_total.to_string(),
            summary.total_squared_error.to_string(),
            summary.rmse.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.modal_split.flush()?;
        self.distribution.flush()?;
        self.comparison.flush()?;
        self.summary.flush()?;
        debug!("csv report flushed");
        Ok(())
    }
}
