use chrono::Utc;

use crate::analyzers::types::HotspotReport;
use crate::stats::TripAnalyzer;

/// Snapshots both rankings and the ingestion summary into a [`HotspotReport`].
pub fn build_report(analyzer: &TripAnalyzer, k: i64) -> HotspotReport {
    HotspotReport {
        generated_at: Utc::now(),
        summary: analyzer.summary().clone(),
        top_zones: analyzer.top_zones(k),
        top_slots: analyzer.top_busy_slots(k),
    }
}
