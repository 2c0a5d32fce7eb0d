//! replay — end-to-end example for the rust_tc trip calibration framework.
//!
//! Generates a synthetic corridor population, replays its event stream
//! through a `TripReconstructor`, aggregates the trips against an embedded
//! reference distribution, and writes a CSV report.
//!
//! ```text
//! replay [OUTPUT_DIR] [AGENTS] [SEED]
//! ```
//!
//! Set `RUST_LOG=debug` to see the library lifecycle logs.

mod population;

use std::io::Cursor;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use tc_aggregate::{TripAggregator, compare, compare_with_mode_scaling};
use tc_core::ModePriority;
use tc_distribution::{load_reference_reader, mode_label};
use tc_events::replay;
use tc_output::{CsvReportWriter, ReportWriter, row};
use tc_trips::{AcceptAll, TripReconstructor};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Run parameters, overridable positionally on the command line.
#[derive(Debug, Clone)]
struct ReplayConfig {
    output_dir:     PathBuf,
    agents:         u32,
    seed:           u64,
    /// Population-to-sample ratio for the overall comparison.
    sample_scaling: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            output_dir:     PathBuf::from("output/replay"),
            agents:         400,
            seed:           42,
            sample_scaling: 10.0,
        }
    }
}

impl ReplayConfig {
    fn from_args() -> Result<Self> {
        let mut config = Self::default();
        let mut args = std::env::args().skip(1);
        if let Some(dir) = args.next() {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(agents) = args.next() {
            config.agents = agents.parse().with_context(|| format!("invalid agent count {agents:?}"))?;
        }
        if let Some(seed) = args.next() {
            config.seed = seed.parse().with_context(|| format!("invalid seed {seed:?}"))?;
        }
        Ok(config)
    }
}

// ── Reference statistics ──────────────────────────────────────────────────────

// Expected trips for the full population (10 % sample → scaling factor 10).
const MODAL_REFERENCE_CSV: &str = "\
mode,lower_limit,upper_limit,expected_count,beeline_factor,scaling_factor\n\
walk,0,1000,380,1.1,10\n\
walk,1000,3000,160,,\n\
walk,3000,10000,0,,\n\
walk,10000,50000,0,,\n\
bike,0,1000,120,1.2,10\n\
bike,1000,3000,260,,\n\
bike,3000,10000,300,,\n\
bike,10000,50000,0,,\n\
car,0,1000,0,1.3,10\n\
car,1000,3000,340,,\n\
car,3000,10000,1450,,\n\
car,10000,50000,1900,,\n\
pt,0,1000,0,1.4,10\n\
pt,1000,3000,0,,\n\
pt,3000,10000,760,,\n\
pt,10000,50000,1800,,\n\
";

const OVERALL_REFERENCE_CSV: &str = "\
mode,lower_limit,upper_limit,expected_count,beeline_factor,scaling_factor\n\
,0,1000,500,,\n\
,1000,3000,760,,\n\
,3000,10000,2510,,\n\
,10000,50000,3700,,\n\
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = ReplayConfig::from_args()?;

    println!("=== replay — rust_tc trip calibration ===");
    println!("Agents: {}  |  Seed: {}  |  Output: {}", config.agents, config.seed, config.output_dir.display());
    println!();

    // 1. Synthetic population and its event stream.
    let pop = population::build(config.agents, config.seed);
    info!(
        "population: {} events, {} links, {} facilities",
        pop.events.len(),
        pop.coords.link_count(),
        pop.coords.facility_count()
    );

    // 2. Reference statistics.
    let expected_modal = load_reference_reader(Cursor::new(MODAL_REFERENCE_CSV))
        .context("loading modal reference distribution")?;
    let mut expected_overall = load_reference_reader(Cursor::new(OVERALL_REFERENCE_CSV))
        .context("loading overall reference distribution")?;
    // Non-modal bins still need each trip mode's beeline factor.
    for (&mode, &factor) in expected_modal.beeline_factors() {
        expected_overall.set_beeline_factor(mode, factor)?;
    }

    // 3. Replay.
    let t0 = Instant::now();
    let mut reconstructor = TripReconstructor::new(AcceptAll, ModePriority::default());
    let delivered = replay(&pop.events, &mut reconstructor, 0)?;
    info!(
        "replayed {delivered} events in {:.3} s: {} trips, {} open, drivers {:?}, stuck {:?}",
        t0.elapsed().as_secs_f64(),
        reconstructor.trip_count(),
        reconstructor.open_trip_count(),
        reconstructor.excluded_drivers(),
        reconstructor.stuck_agents(),
    );

    // 4. Aggregate and compare.
    let agg = TripAggregator::from_trip_map(&pop.coords, &reconstructor.into_trips());
    let split = agg.modal_split();
    let modal = agg.modal_distance_distribution(&expected_modal)?;
    let overall = agg.distance_distribution(&expected_overall)?;
    let modal_cmp = compare_with_mode_scaling(&modal, &expected_modal)?;
    let overall_cmp = compare(&overall, &expected_overall, config.sample_scaling)?;

    // 5. Report.
    std::fs::create_dir_all(&config.output_dir)?;
    let mut writer = CsvReportWriter::new(&config.output_dir)?;
    writer.write_modal_split(&row::modal_split_rows(&split))?;
    writer.write_distribution("expected_modal", &row::distribution_rows(&expected_modal))?;
    writer.write_distribution("simulated_modal", &row::distribution_rows(&modal))?;
    writer.write_distribution("expected_overall", &row::distribution_rows(&expected_overall))?;
    writer.write_distribution("simulated_overall", &row::distribution_rows(&overall))?;
    writer.write_comparison(&row::comparison_rows(&modal_cmp), &row::comparison_summary(&modal_cmp))?;
    writer.write_comparison(&row::comparison_rows(&overall_cmp), &row::comparison_summary(&overall_cmp))?;
    writer.finish()?;

    #[cfg(feature = "sqlite")]
    {
        let mut db = tc_output::SqliteReportWriter::new(&config.output_dir)?;
        db.write_modal_split(&row::modal_split_rows(&split))?;
        db.write_comparison(&row::comparison_rows(&modal_cmp), &row::comparison_summary(&modal_cmp))?;
        db.write_comparison(&row::comparison_rows(&overall_cmp), &row::comparison_summary(&overall_cmp))?;
        db.finish()?;
    }

    // 6. Summary.
    let scaled = agg.scaled_modal_split(&expected_modal);
    println!("{:<8} {:>7} {:>10}", "Mode", "Trips", "Scaled");
    println!("{}", "-".repeat(27));
    for (mode, trips) in &split {
        println!("{:<8} {:>7} {:>10.0}", mode.as_str(), trips, scaled.get(mode).copied().unwrap_or(0.0));
    }
    println!();

    println!("{:<6} {:>16} {:>10} {:>10} {:>10}", "Mode", "Bin [m]", "Scaled", "Expected", "Diff");
    println!("{}", "-".repeat(56));
    for bin in &modal_cmp.bins {
        println!(
            "{:<6} {:>16} {:>10.0} {:>10} {:>10.0}",
            mode_label(&bin.key.mode),
            format!("{}-{}", bin.key.lower_limit, bin.key.upper_limit),
            bin.scaled,
            bin.expected,
            bin.difference,
        );
    }
    println!();
    println!("Modal RMSE:   {:.1}", modal_cmp.rmse());
    println!("Overall RMSE: {:.1} (scaling {})", overall_cmp.rmse(), config.sample_scaling);
    println!("Report written to {}", config.output_dir.display());

    Ok(())
}
