use std::collections::HashMap;

use crate::analyzers::types::{SlotCount, ZoneCount};
use crate::analyzers::utility::clamp_k;
use crate::stats::HourlyCounts;

/// Ranks zones by trip count, descending, with ties ordered by zone name.
///
/// Returns at most `k` rows; a negative `k` returns nothing.
pub fn rank_zones(zone_counts: &HashMap<String, u64>, k: i64) -> Vec<ZoneCount> {
    let limit = clamp_k(k);
    if limit == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(&str, u64)> = zone_counts
        .iter()
        .map(|(zone, &count)| (zone.as_str(), count))
        .collect();

    // Zones are unique keys, so the order is total and an unstable sort is enough.
    entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.truncate(limit);

    entries
        .into_iter()
        .map(|(zone, count)| ZoneCount {
            zone: zone.to_owned(),
            count,
        })
        .collect()
}

/// Ranks non-empty (zone, hour) slots by trip count, descending.
///
/// Ties are ordered by zone name, then hour. Slots with no trips are never
/// returned, however large `k` is.
pub fn rank_slots(zone_hour_counts: &HashMap<String, HourlyCounts>, k: i64) -> Vec<SlotCount> {
    let limit = clamp_k(k);
    if limit == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(&str, u8, u64)> = zone_hour_counts
        .iter()
        .flat_map(|(zone, hours)| {
            (0u8..)
                .zip(hours.iter())
                .filter(|(_, count)| **count > 0)
                .map(move |(hour, &count)| (zone.as_str(), hour, count))
        })
        .collect();

    entries.sort_unstable_by(|a, b| {
        b.2.cmp(&a.2)
            .then_with(|| a.0.cmp(b.0))
            .then_with(|| a.1.cmp(&b.1))
    });
    entries.truncate(limit);

    entries
        .into_iter()
        .map(|(zone, hour, count)| SlotCount {
            zone: zone.to_owned(),
            hour,
            count,
        })
        .collect()
}
