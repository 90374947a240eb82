use crate::flow::FlowOutcome;
use crate::lane::{Lane, LaneMap};
use serde::Serialize;

/// Running totals over the completed phases of a controller.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Metrics {
    /// The number of green phases completed.
    pub phases: u32,
    /// The number of seconds of green time served.
    pub seconds: u64,
    /// The number of vehicles that cleared the intersection.
    pub departed: u64,
    /// The number of vehicles that arrived at the intersection.
    pub arrived: u64,
    /// The green seconds served to each lane.
    pub green_seconds: LaneMap<u64>,
    /// The number of times each lane was given the green.
    pub selections: LaneMap<u32>,
    /// The longest wait of any lane seen at a phase change, in s.
    pub max_wait: u32,
    /// The largest total queue seen at a phase change.
    pub peak_queue: u64,
    /// The sum of the waits of the selected lanes at selection time, in s.
    #[serde(skip)]
    total_selected_wait: u64,
}

/// Everything recorded about one phase change.
pub struct PhaseRecord<'a> {
    /// The lane whose phase ended.
    pub ended: Lane,
    /// The length of the phase that ended, in s.
    pub duration: u32,
    /// The traffic that moved during the phase.
    pub flow: &'a FlowOutcome,
    /// The lane wait timers after the phase ended.
    pub waits: &'a LaneMap<u32>,
    /// The lane selected for the next phase.
    pub next: Lane,
    /// The time `next` had been waiting when it was selected, in s.
    pub next_wait: u32,
}

impl Metrics {
    /// Adds a completed phase to the totals.
    pub fn record(&mut self, phase: &PhaseRecord) {
        self.phases += 1;
        self.seconds += phase.duration as u64;
        self.departed += phase.flow.departed as u64;
        self.arrived += phase.flow.arrived.total();
        self.green_seconds[phase.ended] += phase.duration as u64;
        self.selections[phase.next] += 1;
        self.total_selected_wait += phase.next_wait as u64;
        self.max_wait = phase.waits.values().copied().fold(self.max_wait, u32::max);
        self.peak_queue = self.peak_queue.max(phase.flow.counts.total());
    }

    /// The mean time a lane had been waiting when it was given the green, in s.
    pub fn average_wait(&self) -> f64 {
        if self.phases == 0 {
            0.0
        } else {
            self.total_selected_wait as f64 / self.phases as f64
        }
    }

    /// The number of vehicles cleared per minute of simulated time.
    pub fn throughput_per_minute(&self) -> f64 {
        if self.seconds == 0 {
            0.0
        } else {
            self.departed as f64 * 60.0 / self.seconds as f64
        }
    }

    /// The fraction of green time each lane received.
    pub fn green_share(&self) -> LaneMap<f64> {
        let total = self.seconds;
        self.green_seconds.map(|secs| {
            if total == 0 {
                0.0
            } else {
                secs as f64 / total as f64
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn flow(counts: [u32; 4], departed: u32, arrived: [u32; 4]) -> FlowOutcome {
        FlowOutcome {
            counts: LaneMap::new(counts),
            departed,
            arrived: LaneMap::new(arrived),
        }
    }

    #[test]
    fn empty_metrics() {
        let metrics = Metrics::default();
        assert_eq!(metrics.average_wait(), 0.0);
        assert_eq!(metrics.throughput_per_minute(), 0.0);
        assert_eq!(metrics.green_share(), LaneMap::splat(0.0));
    }

    #[test]
    fn accumulates_phases() {
        let mut metrics = Metrics::default();
        let first = flow([3, 3, 2, 3], 2, [0, 0, 0, 2]);
        metrics.record(&PhaseRecord {
            ended: Lane::North,
            duration: 14,
            flow: &first,
            waits: &LaneMap::new([0, 14, 14, 14]),
            next: Lane::North,
            next_wait: 0,
        });
        let second = flow([1, 4, 2, 3], 2, [0, 1, 0, 0]);
        metrics.record(&PhaseRecord {
            ended: Lane::North,
            duration: 10,
            flow: &second,
            waits: &LaneMap::new([0, 24, 24, 24]),
            next: Lane::South,
            next_wait: 24,
        });

        assert_eq!(metrics.phases, 2);
        assert_eq!(metrics.seconds, 24);
        assert_eq!(metrics.departed, 4);
        assert_eq!(metrics.arrived, 3);
        assert_eq!(metrics.max_wait, 24);
        assert_eq!(metrics.peak_queue, 11);
        assert_eq!(metrics.selections.into_array(), [1, 1, 0, 0]);
        assert_approx_eq!(metrics.average_wait(), 12.0);
        assert_approx_eq!(metrics.throughput_per_minute(), 10.0);
        assert_approx_eq!(metrics.green_share()[Lane::North], 1.0);
    }
}
