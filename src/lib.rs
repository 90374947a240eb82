pub use allocator::allocate_green_times;
pub use config::{ConfigError, FairnessRule, FlowParams, SignalConfig, TimingParams};
pub use controller::{PhaseChange, RunState, SignalController, TickOutcome, View};
pub use fairness::WaitTracker;
pub use flow::{update_flow, FlowOutcome};
pub use lane::{Lane, LaneMap};
pub use light::{LightState, TrafficLight};
pub use metrics::Metrics;
pub use scheduler::{Scheduler, TaskId};
pub use selector::{overdue_lanes, select_next_lane};
pub use util::Interval;

mod allocator;
mod config;
mod controller;
mod fairness;
mod flow;
mod lane;
mod light;
mod metrics;
pub mod render;
mod scheduler;
mod selector;
mod util;
