use crate::lane::LaneMap;
use crate::util::Interval;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Parameters of the green-time allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingParams {
    /// The bounds on any lane's green time, in s.
    pub green_bounds: Interval<u32>,
    /// The number of seconds shared out in proportion to each lane's queue.
    pub cycle_budget: u32,
    /// The green time given to every lane when no vehicles are waiting, in s.
    pub default_green: u32,
}

/// Parameters of the simulated vehicle flow.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowParams {
    /// The most vehicles that leave the green lane in one phase.
    pub max_departures: u32,
    /// The chance that a lane receives new vehicles in one phase.
    pub arrival_probability: f64,
    /// The most vehicles that arrive at one lane in one phase.
    pub max_arrivals: u32,
}

/// The rule deciding when a lane has waited too long and must be served next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum FairnessRule {
    /// A lane is overdue once it has waited `threshold` seconds.
    WaitTime { threshold: u32 },
    /// A lane is overdue once it has been passed over `threshold` times in a row.
    MissedTurns { threshold: u32 },
}

/// The complete configuration of a signal controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub timing: TimingParams,
    pub flow: FlowParams,
    pub fairness: FairnessRule,
    /// The vehicle counts the intersection starts from and resets to.
    pub initial_counts: LaneMap<u32>,
    /// The period of the countdown tick, in ms.
    pub tick_ms: u64,
}

/// A reason a [SignalConfig] was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("minimum green time must be at least one second")]
    ZeroMinimumGreen,
    #[error("green bounds are inverted: minimum {min}s exceeds maximum {max}s")]
    InvertedGreenBounds { min: u32, max: u32 },
    #[error("default green time {default}s lies outside {min}..={max}s")]
    DefaultGreenOutOfBounds { default: u32, min: u32, max: u32 },
    #[error("cycle budget must be positive")]
    ZeroCycleBudget,
    #[error("arrival probability {0} is not within 0..=1")]
    ArrivalProbability(f64),
    #[error("maximum departures and arrivals per phase must be positive")]
    ZeroFlowMaximum,
    #[error("fairness threshold must be positive")]
    ZeroFairnessThreshold,
    #[error("tick interval must be positive")]
    ZeroTickInterval,
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            green_bounds: Interval::new(3, 15),
            cycle_budget: 30,
            default_green: 5,
        }
    }
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            max_departures: 3,
            arrival_probability: 0.4,
            max_arrivals: 2,
        }
    }
}

impl FairnessRule {
    /// The threshold at which a lane becomes overdue.
    pub fn threshold(&self) -> u32 {
        match *self {
            FairnessRule::WaitTime { threshold } => threshold,
            FairnessRule::MissedTurns { threshold } => threshold,
        }
    }
}

impl Default for FairnessRule {
    fn default() -> Self {
        FairnessRule::WaitTime { threshold: 60 }
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            timing: TimingParams::default(),
            flow: FlowParams::default(),
            fairness: FairnessRule::default(),
            initial_counts: LaneMap::new([5, 3, 2, 1]),
            tick_ms: 1000,
        }
    }
}

impl SignalConfig {
    /// Checks that the configuration describes a controller that can run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Interval { min, max } = self.timing.green_bounds;
        if min == 0 {
            return Err(ConfigError::ZeroMinimumGreen);
        }
        if !self.timing.green_bounds.is_ordered() {
            return Err(ConfigError::InvertedGreenBounds { min, max });
        }
        let default = self.timing.default_green;
        if !self.timing.green_bounds.contains(default) {
            return Err(ConfigError::DefaultGreenOutOfBounds { default, min, max });
        }
        if self.timing.cycle_budget == 0 {
            return Err(ConfigError::ZeroCycleBudget);
        }
        let p = self.flow.arrival_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::ArrivalProbability(p));
        }
        if self.flow.max_departures == 0 || self.flow.max_arrivals == 0 {
            return Err(ConfigError::ZeroFlowMaximum);
        }
        if self.fairness.threshold() == 0 {
            return Err(ConfigError::ZeroFairnessThreshold);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    /// The period of the countdown tick.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
