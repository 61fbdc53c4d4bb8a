//! Proximity queries over facility records.
//!
//! All distances are ellipsoidal (WGS84 geodesic) in metres. Queries are
//! linear scans: the datasets are a few thousand records at most and are
//! re-supplied on every request, so an index would not pay for itself.
//!
//! Records without a valid coordinate are skipped, never reported as errors.
//! Ties are broken by input order: the first record encountered wins.

use geo::{Distance, Geodesic, Point};
use tracing::trace;

use crate::domain::{Coordinate, Located};

/// Default number of candidates returned by [`k_nearest`].
pub const DEFAULT_K: usize = 20;

/// Geodesic distance between two coordinates, in metres.
pub fn geodesic_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    Geodesic.distance(to_point(a), to_point(b))
}

fn to_point(c: &Coordinate) -> Point<f64> {
    Point::new(c.lon(), c.lat())
}

/// Find the record closest to `reference`.
///
/// Returns `None` if `records` is empty or no record has a coordinate.
pub fn nearest<'a, T: Located>(records: &'a [T], reference: &Coordinate) -> Option<&'a T> {
    let mut best: Option<(&T, f64)> = None;
    let mut skipped = 0usize;

    for record in records {
        let Some(coord) = record.coordinate() else {
            skipped += 1;
            continue;
        };
        let d = geodesic_distance(reference, &coord);
        // Strict comparison keeps the first of equally distant records.
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((record, d));
        }
    }

    if skipped > 0 {
        trace!(skipped, "records without coordinate ignored");
    }

    best.map(|(record, _)| record)
}

/// Find up to `k` records closest to `reference`, nearest first.
///
/// If fewer than `k` records have a coordinate, all of them are returned.
/// Equally distant records keep their input order.
pub fn k_nearest<'a, T: Located>(records: &'a [T], reference: &Coordinate, k: usize) -> Vec<&'a T> {
    let mut scored: Vec<(&T, f64)> = records
        .iter()
        .filter_map(|r| {
            r.coordinate()
                .map(|c| (r, geodesic_distance(reference, &c)))
        })
        .collect();

    // sort_by is stable, which preserves input order among ties
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    scored.truncate(k);
    scored.into_iter().map(|(r, _)| r).collect()
}
