use crate::lane::{Lane, LaneMap};
use arrayvec::ArrayVec;

/// Chooses the lane to receive the next green phase.
///
/// Lanes whose wait metric has reached `threshold` are overdue and always win
/// over lanes that are not; among the candidates the lane with the most
/// vehicles wins, with ties going to the earlier lane in [Lane::ALL].
pub fn select_next_lane(counts: &LaneMap<u32>, waits: &LaneMap<u32>, threshold: u32) -> Lane {
    let overdue: ArrayVec<Lane, 4> = overdue_lanes(waits, threshold).collect();
    if overdue.is_empty() {
        busiest(counts, Lane::ALL)
    } else {
        busiest(counts, overdue)
    }
}

/// The lanes whose wait metric has reached `threshold`, in fixed lane order.
pub fn overdue_lanes(waits: &LaneMap<u32>, threshold: u32) -> impl Iterator<Item = Lane> + '_ {
    waits
        .iter()
        .filter(move |(_, wait)| **wait >= threshold)
        .map(|(lane, _)| lane)
}

/// The candidate with the highest count, the first one winning ties.
fn busiest(counts: &LaneMap<u32>, candidates: impl IntoIterator<Item = Lane>) -> Lane {
    candidates
        .into_iter()
        .fold(None, |best: Option<Lane>, lane| match best {
            Some(best) if counts[best] >= counts[lane] => Some(best),
            _ => Some(lane),
        })
        .unwrap_or(Lane::North)
}
