use crate::config::FlowParams;
use crate::lane::{Lane, LaneMap};
use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Uniform};

/// The result of simulating the traffic of one green phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlowOutcome {
    /// The vehicle counts after the phase.
    pub counts: LaneMap<u32>,
    /// The number of vehicles that cleared the intersection from the green lane.
    pub departed: u32,
    /// The number of vehicles that joined each lane.
    pub arrived: LaneMap<u32>,
}

/// Simulates the vehicles moving during a green phase of the `active` lane.
///
/// The active lane loses between one and `max_departures` vehicles (never more
/// than it holds). Then every lane, the active one included, independently
/// receives between one and `max_arrivals` vehicles with probability
/// `arrival_probability`.
pub fn update_flow<R: Rng + ?Sized>(
    counts: &LaneMap<u32>,
    active: Lane,
    params: &FlowParams,
    rng: &mut R,
) -> FlowOutcome {
    let mut counts = *counts;

    let departed = match counts[active] {
        0 => 0,
        queued => Uniform::new_inclusive(1, params.max_departures.max(1))
            .sample(rng)
            .min(queued),
    };
    counts[active] -= departed;

    // An invalid probability means no arrivals
    let arrival = Bernoulli::new(params.arrival_probability).ok();
    let batch = Uniform::new_inclusive(1, params.max_arrivals.max(1));
    let arrived = LaneMap::from_fn(|_| {
        let arrives = match &arrival {
            Some(arrival) => arrival.sample(rng),
            None => false,
        };
        if arrives {
            batch.sample(rng)
        } else {
            0
        }
    });
    for (lane, count) in counts.iter_mut() {
        *count = count.saturating_add(arrived[lane]);
    }

    FlowOutcome {
        counts,
        departed,
        arrived,
    }
}
