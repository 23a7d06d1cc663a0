//! Nearest safe-zone ranking.

use std::cmp::Ordering;

use crate::models::{Coordinate, RankedSafeZone, SafeZoneRecord};
use crate::spatial::distance_km;

/// Number of safe zones returned for a risky location.
pub const DEFAULT_NEAREST_COUNT: usize = 3;

/// Return the `k` records closest to `query`, nearest first.
///
/// Every record is scored into a fresh vector; the pool itself is never
/// touched. Equal distances keep pool order (stable sort). The result has
/// `min(k, pool.len())` entries.
pub fn nearest(query: Coordinate, pool: &[SafeZoneRecord], k: usize) -> Vec<RankedSafeZone> {
    if k == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<RankedSafeZone> = pool
        .iter()
        .map(|record| RankedSafeZone::new(*record, distance_km(query, record.coordinate())))
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(k);
    ranked
}
