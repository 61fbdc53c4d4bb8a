//! Bus stop pairing.
//!
//! Picks a boarding stop near the origin and an alighting stop near the
//! destination that share a line, minimising total walking distance. Time
//! on the bus is treated as roughly constant across candidate pairs, so
//! only the access and egress walks are scored.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::{BusStop, Coordinate};
use crate::spatial::{geodesic_distance, k_nearest};

/// A chosen pair of stops and the line connecting them.
#[derive(Debug, Clone, PartialEq)]
pub struct BusPairing<'a> {
    /// Where to board, near the origin.
    pub board: &'a BusStop,
    /// Where to alight, near the destination.
    pub alight: &'a BusStop,
    /// A line serving both stops.
    pub line: String,
    /// Walk to the boarding stop plus walk from the alighting stop (metres).
    pub walking_m: f64,
}

/// Lines served by both stops, in line-identifier order.
pub fn common_lines<'a>(a: &'a BusStop, b: &'a BusStop) -> BTreeSet<&'a str> {
    a.lines
        .intersection(&b.lines)
        .map(String::as_str)
        .collect()
}

/// Select the best boarding/alighting stop pair between `start` and `end`.
///
/// Candidates are the `candidates` stops nearest each endpoint. A stop is
/// never paired with itself, and pairs that share no line are skipped. Among the rest the lowest walking distance
/// wins; ties go to the pair found first (boarding candidates nearest first,
/// then alighting candidates nearest first). When the winning pair shares
/// several lines the first in identifier order is reported.
///
/// Returns `None` when no candidate pair shares a line.
pub fn select_bus_pairing<'a>(
    start: &Coordinate,
    end: &Coordinate,
    stops: &'a [BusStop],
    candidates: usize,
) -> Option<BusPairing<'a>> {
    let near_start = k_nearest(stops, start, candidates);
    let near_end = k_nearest(stops, end, candidates);

    let mut best: Option<BusPairing<'a>> = None;

    for board in &near_start {
        // k_nearest only returns located stops
        let Some(board_at) = board.coordinate else {
            continue;
        };
        let walk_in = geodesic_distance(start, &board_at);

        for alight in &near_end {
            if std::ptr::eq(*board, *alight) {
                continue;
            }
            let Some(alight_at) = alight.coordinate else {
                continue;
            };
            let Some(line) = common_lines(board, alight).into_iter().next() else {
                continue;
            };

            let walking_m = walk_in + geodesic_distance(end, &alight_at);
            if best.as_ref().is_none_or(|b| walking_m < b.walking_m) {
                best = Some(BusPairing {
                    board,
                    alight,
                    line: line.to_string(),
                    walking_m,
                });
            }
        }
    }

    match &best {
        Some(p) => debug!(
            board = %p.board.id,
            alight = %p.alight.id,
            line = %p.line,
            walking_m = p.walking_m,
            "bus pairing selected"
        ),
        None => debug!(
            near_start = near_start.len(),
            near_end = near_end.len(),
            "no candidate stops share a line"
        ),
    }

    best
}
