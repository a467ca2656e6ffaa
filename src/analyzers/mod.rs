//! Ranking queries and reports over the trip tallies.
//!
//! Rankings are computed from scratch on every call and returned as owned
//! rows, so callers never hold references into the analyzer's state.

pub mod ranking;
pub mod report;
pub mod types;
pub mod utility;
