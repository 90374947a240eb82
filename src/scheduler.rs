//! Explicit, cancellable periodic tasks driven by caller-supplied time.

use slotmap::{new_key_type, SlotMap};
use std::time::{Duration, Instant};

new_key_type! {
    /// Unique ID of a scheduled task.
    pub struct TaskId;
}

/// A set of periodic tasks.
///
/// Nothing runs on its own: the owner calls [Scheduler::pop_due] with the
/// current time and handles whichever task comes back. A cancelled task is
/// removed outright, so its ID can never be returned again.
#[derive(Default)]
pub struct Scheduler {
    tasks: SlotMap<TaskId, PeriodicTask>,
}

/// A task that fires once every `interval`.
struct PeriodicTask {
    interval: Duration,
    next_due: Instant,
}

impl Scheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Default::default()
    }

    /// Schedules a task that first fires one `interval` after `now`.
    pub fn schedule_every(&mut self, interval: Duration, now: Instant) -> TaskId {
        self.tasks.insert(PeriodicTask {
            interval,
            next_due: now + interval,
        })
    }

    /// Cancels a task. Returns false if it was not scheduled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.remove(id).is_some()
    }

    /// Returns true if the task is still scheduled.
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// The number of scheduled tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if no tasks are scheduled.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The earliest time at which any task is due.
    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.values().map(|task| task.next_due).min()
    }

    /// Takes the earliest task that is due at `now`, advancing it to its next period.
    pub fn pop_due(&mut self, now: Instant) -> Option<TaskId> {
        let (id, task) = self
            .tasks
            .iter_mut()
            .filter(|(_, task)| task.next_due <= now)
            .min_by_key(|(_, task)| task.next_due)?;
        task.next_due += task.interval;
        Some(id)
    }
}
