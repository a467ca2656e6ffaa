//! Per-zone and per-zone-hour trip tallies built from a trip log.

use csv::{ByteRecord, ReaderBuilder, Terminator};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::analyzers::ranking::{rank_slots, rank_zones};
use crate::analyzers::report::build_report;
use crate::analyzers::types::{HotspotReport, SlotCount, ZoneCount};
use crate::parser::{self, SkipReason};

pub const HOURS_PER_DAY: usize = 24;

/// Trip counts for one zone, indexed by hour of day.
pub type HourlyCounts = [u64; HOURS_PER_DAY];

/// Bookkeeping for the most recent ingestion.
///
/// Purely informational: `ingest` never fails, and this is the only place the
/// difference between a missing file and a file full of bad rows shows up.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct IngestSummary {
    pub source: Option<String>,
    pub opened: bool,
    pub header_skipped: bool,
    pub rows_read: u64,
    pub rows_accepted: u64,
    pub rows_skipped: u64,
    pub skipped_by_reason: BTreeMap<SkipReason, u64>,
    pub distinct_zones: usize,
}

impl IngestSummary {
    fn record_skip(&mut self, reason: SkipReason) {
        self.rows_skipped += 1;
        *self.skipped_by_reason.entry(reason).or_insert(0) += 1;
    }
}

/// Owns the zone and zone-hour tallies for one loaded trip log.
#[derive(Debug, Default)]
pub struct TripAnalyzer {
    zone_counts: HashMap<String, u64>,
    zone_hour_counts: HashMap<String, HourlyCounts>,
    summary: IngestSummary,
}

impl TripAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current tallies with those built from the file at `path`.
    ///
    /// A file that cannot be opened leaves the tallies empty. Malformed rows
    /// are skipped. Neither case is reported as an error.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn ingest(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.clear();
        self.summary.source = Some(path.display().to_string());

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!(error = %e, "Trip log could not be opened, tallies left empty");
                return;
            }
        };

        self.fold(file);
    }

    /// Same as [`ingest`](Self::ingest) but reads from an already open source.
    pub fn ingest_reader<R: Read>(&mut self, reader: R) {
        self.clear();
        self.fold(reader);
    }

    fn clear(&mut self) {
        self.zone_counts.clear();
        self.zone_hour_counts.clear();
        self.summary = IngestSummary::default();
    }

    fn fold<R: Read>(&mut self, reader: R) {
        self.summary.opened = true;

        // The header test runs on the raw first line: the CSV reader drops blank
        // lines and a leading BOM, either of which would move what it calls line 1.
        let mut reader = BufReader::new(reader);
        let mut first_line = Vec::new();
        if let Err(e) = reader.read_until(b'\n', &mut first_line) {
            warn!(error = %e, "Trip log read failed on the first line");
            first_line.clear();
        }
        if parser::is_header(&first_line) {
            self.summary.header_skipped = true;
            first_line.clear();
        }
        let line_offset = u64::from(self.summary.header_skipped);

        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(Cursor::new(first_line).chain(reader));
        let mut record = ByteRecord::new();

        loop {
            match rdr.read_byte_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_io_error() => {
                    warn!(error = %e, "Trip log read failed, keeping rows read so far");
                    break;
                }
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable trip row");
                    self.summary.rows_read += 1;
                    self.summary.record_skip(SkipReason::Unreadable);
                    continue;
                }
            }

            let line = record.position().map_or(0, |p| p.line()) + line_offset;
            self.summary.rows_read += 1;
            match parser::parse_record(&record) {
                Ok(trip) => {
                    tally(
                        &mut self.zone_counts,
                        &mut self.zone_hour_counts,
                        trip.zone,
                        trip.hour,
                    );
                    self.summary.rows_accepted += 1;
                }
                Err(reason) => {
                    debug!(line, %reason, "Skipping trip row");
                    self.summary.record_skip(reason);
                }
            }
        }

        self.summary.distinct_zones = self.zone_counts.len();
        info!(
            rows_read = self.summary.rows_read,
            rows_accepted = self.summary.rows_accepted,
            rows_skipped = self.summary.rows_skipped,
            header_skipped = self.summary.header_skipped,
            distinct_zones = self.summary.distinct_zones,
            "Trip log ingested"
        );
    }

    /// The `k` busiest zones, most trips first, ties broken by zone name.
    ///
    /// A negative `k` is treated as zero.
    pub fn top_zones(&self, k: i64) -> Vec<ZoneCount> {
        rank_zones(&self.zone_counts, k)
    }

    /// The `k` busiest (zone, hour) slots with at least one trip.
    ///
    /// Ties are broken by zone name, then by hour. A negative `k` is treated as
    /// zero.
    pub fn top_busy_slots(&self, k: i64) -> Vec<SlotCount> {
        rank_slots(&self.zone_hour_counts, k)
    }

    /// Both rankings plus the ingestion summary, stamped with the current time.
    pub fn report(&self, k: i64) -> HotspotReport {
        build_report(self, k)
    }

    pub fn zone_count(&self, zone: &str) -> u64 {
        self.zone_counts.get(zone).copied().unwrap_or(0)
    }

    pub fn hourly_counts(&self, zone: &str) -> Option<&HourlyCounts> {
        self.zone_hour_counts.get(zone)
    }

    pub fn zone_counts(&self) -> &HashMap<String, u64> {
        &self.zone_counts
    }

    pub fn zone_hour_counts(&self) -> &HashMap<String, HourlyCounts> {
        &self.zone_hour_counts
    }

    pub fn total_trips(&self) -> u64 {
        self.zone_counts.values().sum()
    }

    pub fn distinct_zones(&self) -> usize {
        self.zone_counts.len()
    }

    pub fn summary(&self) -> &IngestSummary {
        &self.summary
    }
}

fn tally(
    zone_counts: &mut HashMap<String, u64>,
    zone_hour_counts: &mut HashMap<String, HourlyCounts>,
    zone: &str,
    hour: u8,
) {
    let hour = usize::from(hour);

    // Look up before inserting so repeat zones don't allocate a new key.
    if let Some(count) = zone_counts.get_mut(zone) {
        *count += 1;
    } else {
        zone_counts.insert(zone.to_owned(), 1);
    }

    if let Some(hours) = zone_hour_counts.get_mut(zone) {
        hours[hour] += 1;
    } else {
        let mut hours = [0; HOURS_PER_DAY];
        hours[hour] = 1;
        zone_hour_counts.insert(zone.to_owned(), hours);
    }
}
