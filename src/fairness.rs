use crate::config::FairnessRule;
use crate::lane::{Lane, LaneMap};

/// How long each lane has gone without a green phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaitTracker {
    /// Seconds since each lane last held the green.
    waits: LaneMap<u32>,
    /// Consecutive selections each lane was passed over for.
    missed: LaneMap<u32>,
}

impl WaitTracker {
    /// Creates a tracker with every lane freshly served.
    pub fn new() -> Self {
        Default::default()
    }

    /// Accounts for a green phase of `duration` seconds given to `served`.
    pub fn end_phase(&mut self, served: Lane, duration: u32) {
        for (lane, wait) in self.waits.iter_mut() {
            *wait = if lane == served {
                0
            } else {
                wait.saturating_add(duration)
            };
        }
    }

    /// Accounts for `selected` being chosen over every other lane.
    pub fn record_selection(&mut self, selected: Lane) {
        for (lane, missed) in self.missed.iter_mut() {
            *missed = if lane == selected {
                0
            } else {
                missed.saturating_add(1)
            };
        }
    }

    /// Seconds since each lane last held the green.
    pub fn waits(&self) -> &LaneMap<u32> {
        &self.waits
    }

    /// Consecutive selections each lane was passed over for.
    pub fn missed_turns(&self) -> &LaneMap<u32> {
        &self.missed
    }

    /// The per-lane measure that `rule` compares against its threshold.
    pub fn metric(&self, rule: FairnessRule) -> &LaneMap<u32> {
        match rule {
            FairnessRule::WaitTime { .. } => &self.waits,
            FairnessRule::MissedTurns { .. } => &self.missed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn served_lane_resets() {
        let mut tracker = WaitTracker::new();
        tracker.end_phase(Lane::North, 14);
        tracker.end_phase(Lane::South, 8);
        assert_eq!(tracker.waits().into_array(), [8, 0, 22, 22]);
    }

    #[test]
    fn missed_turns_count_up() {
        let mut tracker = WaitTracker::new();
        tracker.record_selection(Lane::North);
        tracker.record_selection(Lane::North);
        tracker.record_selection(Lane::West);
        assert_eq!(tracker.missed_turns().into_array(), [1, 3, 3, 0]);
        assert_eq!(
            tracker.metric(FairnessRule::MissedTurns { threshold: 3 }),
            tracker.missed_turns()
        );
    }
}
