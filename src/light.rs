use crate::lane::{Lane, LaneMap};
use serde::{Deserialize, Serialize};

/// The signal heads of a four-way intersection, one per approach.
#[derive(Clone, Debug)]
pub struct TrafficLight {
    heads: LaneMap<SignalHead>,
}

/// The signal shown to a single approach.
#[derive(Clone, Copy, Debug, Default)]
struct SignalHead {
    /// The current state.
    state: LightState,
}

/// The state of a signal head.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightState {
    #[default]
    Red,
    Green,
}

impl TrafficLight {
    /// Creates a light showing green to `active` and red to everything else.
    pub fn new(active: Lane) -> Self {
        let mut light = Self {
            heads: LaneMap::default(),
        };
        light.set_active(active);
        light
    }

    /// Gives the green to `active`, turning every other head red.
    pub fn set_active(&mut self, active: Lane) {
        for (lane, head) in self.heads.iter_mut() {
            let next = if lane == active {
                LightState::Green
            } else {
                LightState::Red
            };
            head.state = next;
        }
    }

    /// Gets the state shown to the given lane.
    pub fn state(&self, lane: Lane) -> LightState {
        self.heads[lane].state
    }

    /// Gets the lane currently shown green.
    pub fn active(&self) -> Lane {
        self.heads
            .iter()
            .find(|(_, head)| head.state == LightState::Green)
            .map(|(lane, _)| lane)
            .unwrap_or(Lane::North)
    }
}
