use crate::config::TimingParams;
use crate::lane::LaneMap;

/// Shares the cycle budget between the lanes in proportion to their queues.
///
/// Each lane gets `round(count / total * budget)` seconds, clamped to the
/// configured green bounds. When no vehicles are waiting at all, every lane
/// gets the default green time instead.
pub fn allocate_green_times(counts: &LaneMap<u32>, timing: &TimingParams) -> LaneMap<u32> {
    let total = counts.total();
    if total == 0 {
        return LaneMap::splat(timing.green_bounds.clamp(timing.default_green));
    }

    let budget = timing.cycle_budget as f64;
    counts.map(|count| {
        let share = (count as f64 / total as f64 * budget).round() as u32;
        timing.green_bounds.clamp(share)
    })
}
