//! Unit tests for tc-output.

use tc_aggregate::{Comparison, ModalSplit, compare};
use tc_core::Mode;
use tc_distribution::DistanceDistribution;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn split() -> ModalSplit {
    ModalSplit::from([(Mode::Car, 3), (Mode::Pt, 1)])
}

fn expected() -> DistanceDistribution {
    let mut d = DistanceDistribution::new();
    d.add_bin(Some(Mode::Car), 0.0, 1_000.0, 10).unwrap();
    d.add_bin(Some(Mode::Car), 1_000.0, 3_000.0, 20).unwrap();
    d.add_bin(None, 0.0, 5_000.0, 30).unwrap();
    d
}

fn simulated() -> DistanceDistribution {
    let mut d = expected().copy_with_empty_bins();
    d.increase_count_by_one(Some(Mode::Car), 500.0).unwrap();
    d.increase_count_by_one(Some(Mode::Car), 1_500.0).unwrap();
    d.increase_count_by_one(Some(Mode::Car), 2_500.0).unwrap();
    d
}

fn comparison() -> Comparison {
    compare(&simulated(), &expected(), 10.0).unwrap()
}

// ── Row conversions ───────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use super::*;
    use crate::row::{comparison_rows, comparison_summary, distribution_rows, modal_split_rows};

    #[test]
    fn modal_split_shares() {
        let rows = modal_split_rows(&split());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mode, Mode::Car);
        assert_eq!(rows[0].trips, 3);
        assert_eq!(rows[0].share, 0.75);
        assert_eq!(rows[1].share, 0.25);
    }

    #[test]
    fn empty_split() {
        assert!(modal_split_rows(&ModalSplit::new()).is_empty());
    }

    #[test]
    fn distribution_in_key_order() {
        let rows = distribution_rows(&simulated());
        let modes: Vec<Option<Mode>> = rows.iter().map(|r| r.mode).collect();
        assert_eq!(modes, [None, Some(Mode::Car), Some(Mode::Car)]);
        assert_eq!(rows[2].count, 2);
        assert_eq!(rows[2].lower_limit, 1_000.0);
    }

    #[test]
    fn comparison_summary_matches() {
        let cmp = comparison();
        let rows = comparison_rows(&cmp);
        let summary = comparison_summary(&cmp);
        assert_eq!(rows.len(), 3);
        assert_eq!(summary.bins, 3);
        assert_eq!(summary.expected_total, 60);
        assert_eq!(summary.simulated_total, 30.0);
        assert_eq!(summary.total_squared_error, rows.iter().map(|r| r.squared_error).sum::<f64>());
        assert_eq!(summary.rmse, cmp.rmse());
    }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::OutputError;
    use crate::csv::CsvReportWriter;
    use crate::row::{comparison_rows, comparison_summary, distribution_rows, modal_split_rows};
    use crate::writer::ReportWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: &Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(path: &Path) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvReportWriter::new(dir.path()).unwrap();
        for name in ["modal_split.csv", "distance_distribution.csv", "comparison.csv", "comparison_summary.csv"] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(&dir.path().join("modal_split.csv")), ["mode", "trips", "share"]);
        assert_eq!(
            headers(&dir.path().join("distance_distribution.csv")),
            ["label", "mode", "lower_limit", "upper_limit", "count"]
        );
        assert_eq!(
            headers(&dir.path().join("comparison_summary.csv")),
            ["bins", "simulated_total", "expected_total", "total_squared_error", "rmse"]
        );
        assert_eq!(headers(&dir.path().join("comparison.csv")).len(), 9);
    }

    #[test]
    fn csv_report_round_trip() {
        let dir = tmp();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        let cmp = comparison();
        w.write_modal_split(&modal_split_rows(&split())).unwrap();
        w.write_distribution("expected", &distribution_rows(&expected())).unwrap();
        w.write_distribution("simulated", &distribution_rows(&simulated())).unwrap();
        w.write_comparison(&comparison_rows(&cmp), &comparison_summary(&cmp)).unwrap();
        w.finish().unwrap();

        let split = records(&dir.path().join("modal_split.csv"));
        assert_eq!(split.len(), 2);
        assert_eq!(&split[0][0], "car");
        assert_eq!(&split[0][1], "3");

        let dist = records(&dir.path().join("distance_distribution.csv"));
        assert_eq!(dist.len(), 6);
        assert_eq!(&dist[0][0], "expected");
        assert_eq!(&dist[0][1], "all");
        assert_eq!(&dist[5][0], "simulated");
        assert_eq!(&dist[5][2], "1000");
        assert_eq!(&dist[5][4], "2");

        let rows = records(&dir.path().join("comparison.csv"));
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][0], "car");
        assert_eq!(&rows[1][5], "10"); // scaled
        assert_eq!(&rows[1][7], "0");  // difference

        let summary = records(&dir.path().join("comparison_summary.csv"));
        assert_eq!(summary.len(), 1);
        assert_eq!(&summary[0][0], "3");
        assert_eq!(&summary[0][2], "60");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_write_after_finish_fails() {
        let dir = tmp();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        let err = w.write_modal_split(&modal_split_rows(&split())).unwrap_err();
        assert!(matches!(err, OutputError::Finished));
    }

    #[test]
    fn csv_empty_rows_ok() {
        let dir = tmp();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.write_modal_split(&[]).unwrap();
        w.write_distribution("simulated", &[]).unwrap();
    }

    #[test]
    fn csv_missing_dir_fails() {
        let dir = tmp();
        assert!(CsvReportWriter::new(&dir.path().join("nope")).is_err());
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::row::{comparison_rows, comparison_summary, distribution_rows, modal_split_rows};
    use crate::sqlite::SqliteReportWriter;
    use crate::writer::ReportWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn count(dir: &TempDir, table: &str) -> i64 {
        let conn = rusqlite::Connection::open(dir.path().join("report.db")).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0)).unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteReportWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("report.db").exists());
    }

    #[test]
    fn sqlite_row_counts() {
        let dir = tmp();
        let mut w = SqliteReportWriter::new(dir.path()).unwrap();
        let cmp = comparison();
        w.write_modal_split(&modal_split_rows(&split())).unwrap();
        w.write_distribution("simulated", &distribution_rows(&simulated())).unwrap();
        w.write_comparison(&comparison_rows(&cmp), &comparison_summary(&cmp)).unwrap();
        w.finish().unwrap();

        assert_eq!(count(&dir, "modal_split"), 2);
        assert_eq!(count(&dir, "distance_distribution"), 3);
        assert_eq!(count(&dir, "comparison"), 3);
        assert_eq!(count(&dir, "comparison_summary"), 1);
    }

    #[test]
    fn sqlite_comparisons_numbered() {
        let dir = tmp();
        let mut w = SqliteReportWriter::new(dir.path()).unwrap();
        let cmp = comparison();
        w.write_comparison(&comparison_rows(&cmp), &comparison_summary(&cmp)).unwrap();
        w.write_comparison(&comparison_rows(&cmp), &comparison_summary(&cmp)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("report.db")).unwrap();
        let max: i64 = conn
            .query_row("SELECT MAX(comparison_id) FROM comparison", [], |r| r.get(0))
            .unwrap();
        assert_eq!(max, 1);
        let modes: i64 = conn
            .query_row("SELECT COUNT(*) FROM comparison WHERE mode = 'all'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(modes, 2);
    }

    #[test]
    fn sqlite_finish_idempotent() {
        let dir = tmp();
        let mut w = SqliteReportWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
