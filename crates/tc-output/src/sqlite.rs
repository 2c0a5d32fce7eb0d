//! SQLite report backend (feature `sqlite`).
//!
//! Creates a single `report.db` file in the configured output directory with
//! four tables: `modal_split`, `distance_distribution`, `comparison`, and
//! `comparison_summary`.  Each `write_comparison` call gets its own
//! `comparison_id`, shared by its bin rows and its summary row.

use std::path::Path;

use log::debug;
use rusqlite::Connection;

use tc_distribution::mode_label;

use crate::{ComparisonRow, ComparisonSummaryRow, DistanceBinRow, ModalSplitRow, OutputError, OutputResult};
use crate::writer::ReportWriter;

/// Writes a calibration report to an SQLite database.
pub struct SqliteReportWriter {
    conn:            Connection,
    next_comparison: i64,
    finished:        bool,
}

impl SqliteReportWriter {
    /// Open (or create) `report.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("report.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS modal_split (
                 mode  TEXT    NOT NULL,
                 trips INTEGER NOT NULL,
                 share REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS distance_distribution (
                 label       TEXT    NOT NULL,
                 mode        TEXT    NOT NULL,
                 lower_limit REAL    NOT NULL,
                 upper_limit REAL    NOT NULL,
                 count       INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS comparison (
                 comparison_id  INTEGER NOT NULL,
                 mode           TEXT    NOT NULL,
                 lower_limit    REAL    NOT NULL,
                 upper_limit    REAL    NOT NULL,
                 simulated      INTEGER NOT NULL,
                 scaling_factor REAL    NOT NULL,
                 scaled         REAL    NOT NULL,
                 expected       INTEGER NOT NULL,
                 difference     REAL    NOT NULL,
                 squared_error  REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS comparison_summary (
                 comparison_id       INTEGER PRIMARY KEY,
                 bins                INTEGER NOT NULL,
                 simulated_total     REAL    NOT NULL,
                 expected_total      INTEGER NOT NULL,
                 total_squared_error REAL    NOT NULL,
                 rmse                REAL    NOT NULL
             );",
        )?;

        let next_comparison: i64 = conn.query_row(
            "SELECT COALESCE(MAX(comparison_id), -1) + 1 FROM comparison_summary",
            [],
            |row| row.get(0),
        )?;

        Ok(Self { conn, next_comparison, finished: false })
    }

    fn check_open(&self) -> OutputResult<()> {
        if self.finished { Err(OutputError::Finished) } else { Ok(()) }
    }
}

impl ReportWriter for SqliteReportWriter {
    fn write_modal_split(&mut self, rows: &[ModalSplitRow]) -> OutputResult<()> {
        self.check_open()?;
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO modal_split (mode, trips, share) VALUES (?1, ?2, ?3)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.mode.as_str(), row.trips as i64, row.share])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_distribution(&mut self, label: &str, rows: &[DistanceBinRow]) -> OutputResult<()> {
        self.check_open()?;
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO distance_distribution \
                 (label, mode, lower_limit, upper_limit, count) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    label,
                    mode_label(&row.mode),
                    row.lower_limit,
                    row.upper_limit,
                    row.count as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_comparison(&mut self, rows: &[ComparisonRow], summary: &ComparisonSummaryRow) -> OutputResult<()> {
        self.check_open()?;
        let id = self.next_comparison;
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO comparison \
                 (comparison_id, mode, lower_limit, upper_limit, simulated, \
                  scaling_factor, scaled, expected, difference, squared_error) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    id,
                    mode_label(&row.mode),
                    row.lower_limit,
                    row.upper_limit,
                    row.simulated as i64,
                    row.scaling_factor,
                    row.scaled,
                    row.expected as i64,
                    row.difference,
                    row.squared_error,
                ])?;
            }
        }
        tx.execute(
            "INSERT INTO comparison_summary \
             (comparison_id, bins, simulated_total, expected_total, total_squared_error, rmse) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                id,
                summary.bins as i64,
                summary.simulated_total,
                summary.expected_total as i64,
                summary.total_squared_error,
                summary.rmse,
            ],
        )?;
        tx.commit()?;
        self.next_comparison += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        debug!("sqlite report checkpointed");
        Ok(())
    }
}
