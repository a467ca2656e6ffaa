pub mod analyzers;
pub mod output;
pub mod parser;
pub mod stats;

pub use analyzers::types::{HotspotReport, SlotCount, ZoneCount};
pub use analyzers::utility::DEFAULT_TOP_K;
pub use stats::{IngestSummary, TripAnalyzer};
