//! Row and report types produced by the ranking queries.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::stats::IngestSummary;

/// Trip count for a single zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneCount {
    pub zone: String,
    pub count: u64,
}

/// Trip count for a single zone during one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotCount {
    pub zone: String,
    pub hour: u8,
    pub count: u64,
}

/// Full hotspot report, serialized as JSON by the CLI.
#[derive(Debug, Serialize)]
pub struct HotspotReport {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) summary: IngestSummary,
    pub(crate) top_zones: Vec<ZoneCount>,
    pub(crate) top_slots: Vec<SlotCount>,
}

impl HotspotReport {
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn summary(&self) -> &IngestSummary {
        &self.summary
    }

    pub fn top_zones(&self) -> &[ZoneCount] {
        &self.top_zones
    }

    pub fn top_slots(&self) -> &[SlotCount] {
        &self.top_slots
    }
}
