use crate::allocator::allocate_green_times;
use crate::config::{ConfigError, SignalConfig};
use crate::fairness::WaitTracker;
use crate::flow::{update_flow, FlowOutcome};
use crate::lane::{Lane, LaneMap};
use crate::light::TrafficLight;
use crate::metrics::{Metrics, PhaseRecord};
use crate::scheduler::{Scheduler, TaskId};
use crate::selector::{overdue_lanes, select_next_lane};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Whether the countdown tick is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// The screens of the front end. Leaving [View::Simulation] stops the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Simulation,
    HowItWorks,
    Dashboard,
}

/// What happened on one tick of the countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The green phase continues with `remaining` seconds left.
    Countdown { lane: Lane, remaining: u32 },
    /// The green phase ended and another began.
    PhaseChange(PhaseChange),
}

/// The transition from one green phase to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseChange {
    /// The lane whose green ended.
    pub ended: Lane,
    /// The lane that now holds the green.
    pub next: Lane,
    /// The green time allocated to `next`, in s.
    pub duration: u32,
    /// Whether `next` was chosen because it was overdue.
    pub overdue: bool,
    /// The traffic that moved during the phase that ended.
    pub flow: FlowOutcome,
}

/// The signal controller of a four-way intersection.
///
/// Holds the green on one lane at a time, counting down once per tick. When the
/// countdown runs out it simulates the traffic that moved, picks the next lane
/// and allocates fresh green times.
pub struct SignalController<R = StdRng> {
    /// The configuration, validated on construction.
    config: SignalConfig,
    /// The random source for simulated traffic.
    rng: R,
    /// Whether the tick is running.
    run_state: RunState,
    /// The screen the front end is showing.
    view: View,
    /// The vehicles waiting in each lane.
    counts: LaneMap<u32>,
    /// The fairness state of the lanes.
    fairness: WaitTracker,
    /// The signal heads.
    light: TrafficLight,
    /// The green times allocated for the current cycle.
    green_times: LaneMap<u32>,
    /// The length of the current phase in s.
    phase_length: u32,
    /// The seconds left in the current phase.
    countdown: u32,
    /// The tick scheduler.
    scheduler: Scheduler,
    /// The tick task, while running.
    tick_task: Option<TaskId>,
    /// The number of ticks handled since the last reset.
    ticks: u64,
    /// Totals over completed phases.
    metrics: Metrics,
}

impl SignalController<StdRng> {
    /// Creates a controller with an unseeded random source.
    pub fn new(config: SignalConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a controller whose traffic is reproducible from `seed`.
    pub fn seeded(config: SignalConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SignalController<R> {
    /// Creates a controller drawing simulated traffic from `rng`.
    pub fn with_rng(config: SignalConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let counts = config.initial_counts;
        let green_times = allocate_green_times(&counts, &config.timing);
        let active = Lane::North;
        Ok(Self {
            rng,
            run_state: RunState::Idle,
            view: View::Home,
            counts,
            fairness: WaitTracker::new(),
            light: TrafficLight::new(active),
            green_times,
            phase_length: green_times[active],
            countdown: green_times[active],
            scheduler: Scheduler::new(),
            tick_task: None,
            ticks: 0,
            metrics: Metrics::default(),
            config,
        })
    }

    /// Starts the countdown tick, replacing any tick already running.
    pub fn start(&mut self, now: Instant) -> TaskId {
        if let Some(old) = self.tick_task.take() {
            self.scheduler.cancel(old);
        }
        let task = self.scheduler.schedule_every(self.config.tick_interval(), now);
        self.tick_task = Some(task);
        self.run_state = RunState::Running;
        info!("Started: {} green for {}s", self.active(), self.countdown);
        task
    }

    /// Stops the countdown tick. Pending ticks will not fire.
    pub fn stop(&mut self) {
        if let Some(task) = self.tick_task.take() {
            self.scheduler.cancel(task);
            info!("Stopped after {} ticks", self.ticks);
        }
        self.run_state = RunState::Idle;
    }

    /// Stops the tick and restores the initial intersection.
    pub fn reset(&mut self) {
        self.stop();
        self.counts = self.config.initial_counts;
        self.fairness = WaitTracker::new();
        self.green_times = allocate_green_times(&self.counts, &self.config.timing);
        self.light.set_active(Lane::North);
        self.phase_length = self.green_times[Lane::North];
        self.countdown = self.phase_length;
        self.ticks = 0;
        self.metrics = Metrics::default();
        info!("Reset to initial counts {:?}", self.counts.into_array());
    }

    /// Switches the front end to `view`, stopping the cycle if it leaves the simulation.
    pub fn navigate(&mut self, view: View) {
        if view != View::Simulation && self.is_running() {
            self.stop();
        }
        self.view = view;
    }

    /// Handles every tick that has come due by `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<TickOutcome> {
        let mut outcomes = vec![];
        while let Some(task) = self.scheduler.pop_due(now) {
            outcomes.extend(self.on_tick(task));
        }
        outcomes
    }

    /// Handles a tick from `task`. Ticks from anything but the current tick task are ignored.
    pub fn on_tick(&mut self, task: TaskId) -> Option<TickOutcome> {
        if self.tick_task != Some(task) || !self.scheduler.is_scheduled(task) {
            warn!("Ignoring tick from stale task {:?}", task);
            return None;
        }
        Some(self.tick())
    }

    /// The earliest time at which a tick is due, while running.
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    /// Advances the countdown by one second.
    fn tick(&mut self) -> TickOutcome {
        self.ticks += 1;
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            debug!("{} green, {}s left", self.active(), self.countdown);
            return TickOutcome::Countdown {
                lane: self.active(),
                remaining: self.countdown,
            };
        }
        TickOutcome::PhaseChange(self.advance_phase())
    }

    /// Ends the current green phase and begins the next one.
    fn advance_phase(&mut self) -> PhaseChange {
        let ended = self.active();
        let ended_length = self.phase_length;

        let flow = update_flow(&self.counts, ended, &self.config.flow, &mut self.rng);
        self.counts = flow.counts;
        self.fairness.end_phase(ended, ended_length);

        let rule = self.config.fairness;
        let metric = self.fairness.metric(rule);
        let overdue = overdue_lanes(metric, rule.threshold()).next().is_some();
        let next = select_next_lane(&self.counts, metric, rule.threshold());
        let next_wait = self.fairness.waits()[next];
        self.fairness.record_selection(next);

        self.green_times = allocate_green_times(&self.counts, &self.config.timing);
        self.light.set_active(next);
        self.phase_length = self.green_times[next];
        self.countdown = self.phase_length;

        self.metrics.record(&PhaseRecord {
            ended,
            duration: ended_length,
            flow: &flow,
            waits: self.fairness.waits(),
            next,
            next_wait,
        });

        info!(
            "Phase change: {} -> {} for {}s{} (counts {:?})",
            ended,
            next,
            self.phase_length,
            if overdue { ", overdue" } else { "" },
            self.counts.into_array()
        );

        PhaseChange {
            ended,
            next,
            duration: self.phase_length,
            overdue,
            flow,
        }
    }
}

impl<R> SignalController<R> {
    /// Gets the configuration.
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Gets whether the tick is running.
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Returns true while the tick is running.
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Gets the current view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Gets the vehicles waiting in each lane.
    pub fn counts(&self) -> &LaneMap<u32> {
        &self.counts
    }

    /// Gets the seconds since each lane last held the green.
    pub fn waits(&self) -> &LaneMap<u32> {
        self.fairness.waits()
    }

    /// Gets the consecutive selections each lane was passed over for.
    pub fn missed_turns(&self) -> &LaneMap<u32> {
        self.fairness.missed_turns()
    }

    /// Gets the lane holding the green.
    pub fn active(&self) -> Lane {
        self.light.active()
    }

    /// Gets the signal heads.
    pub fn light(&self) -> &TrafficLight {
        &self.light
    }

    /// Gets the green times allocated for the current cycle.
    pub fn green_times(&self) -> &LaneMap<u32> {
        &self.green_times
    }

    /// Gets the seconds left in the current phase.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Gets the length of the current phase in s.
    pub fn phase_length(&self) -> u32 {
        self.phase_length
    }

    /// Gets the number of ticks handled since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Gets the totals over completed phases.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
