//! CLI entry point for the trip hotspot tool.
//!
//! Provides subcommands for ranking the busiest zones, ranking the busiest
//! (zone, hour) slots, and producing a full report with optional JSON and CSV
//! artefacts.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use trip_hotspots::{
    DEFAULT_TOP_K, TripAnalyzer,
    output::{print_json, print_pretty, write_json, write_slot_csv, write_zone_csv},
};

#[derive(Parser)]
#[command(name = "trip_hotspots")]
#[command(about = "Rank the busiest pickup zones and hours in a trip log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Path to the trip log, or `-` to read from stdin
    #[arg(value_name = "FILE")]
    source: PathBuf,

    /// Number of rows to return
    #[arg(short = 'k', long = "top", default_value_t = DEFAULT_TOP_K, allow_negative_numbers = true)]
    k: i64,
}

#[derive(Subcommand)]
enum Commands {
    /// List the zones with the most trips
    Zones {
        #[command(flatten)]
        source: Source,
    },
    /// List the (zone, hour) slots with the most trips
    Slots {
        #[command(flatten)]
        source: Source,
    },
    /// Build a full report and optionally write it to disk
    Report {
        #[command(flatten)]
        source: Source,

        /// Optional: write the report as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Optional: write the zone ranking as CSV to this path
        #[arg(long)]
        zones_csv: Option<PathBuf>,

        /// Optional: write the slot ranking as CSV to this path
        #[arg(long)]
        slots_csv: Option<PathBuf>,

        /// Gzip compress CSV files
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/trip_hotspots.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("trip_hotspots.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Zones { source } => {
            let analyzer = load(&source.source);
            let rows = analyzer.top_zones(source.k);
            if rows.is_empty() {
                warn!("No zones to rank");
            }
            for (rank, row) in rows.iter().enumerate() {
                info!(rank = rank + 1, zone = %row.zone, count = row.count, "Zone");
            }
        }
        Commands::Slots { source } => {
            let analyzer = load(&source.source);
            let rows = analyzer.top_busy_slots(source.k);
            if rows.is_empty() {
                warn!("No slots to rank");
            }
            for (rank, row) in rows.iter().enumerate() {
                info!(
                    rank = rank + 1,
                    zone = %row.zone,
                    hour = row.hour,
                    count = row.count,
                    "Slot"
                );
            }
        }
        Commands::Report {
            source,
            json,
            zones_csv,
            slots_csv,
            gzip,
        } => {
            let analyzer = load(&source.source);
            let report = analyzer.report(source.k);

            print_pretty(&report);
            print_json(&report)?;

            if let Some(path) = json {
                write_json(&path, &report)?;
            }
            if let Some(path) = zones_csv {
                write_zone_csv(&path, report.top_zones(), gzip)?;
            }
            if let Some(path) = slots_csv {
                write_slot_csv(&path, report.top_slots(), gzip)?;
            }
        }
    }

    Ok(())
}

/// Ingests a trip log from a file path, or from stdin when the path is `-`.
fn load(source: &Path) -> TripAnalyzer {
    let mut analyzer = TripAnalyzer::new();
    if source.as_os_str() == "-" {
        analyzer.ingest_reader(std::io::stdin().lock());
    } else {
        analyzer.ingest(source);
    }

    let summary = analyzer.summary();
    if !summary.opened {
        warn!(source = %source.display(), "Trip log unavailable, rankings will be empty");
    } else if summary.rows_read > 0 && summary.rows_accepted == 0 {
        warn!(
            rows_skipped = summary.rows_skipped,
            "Every row in the trip log was skipped"
        );
    }
    analyzer
}
