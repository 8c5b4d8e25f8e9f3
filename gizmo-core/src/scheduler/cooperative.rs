//! Cooperative scheduler on a simulated clock
//!
//! Runs [`PeriodicTask`]s in due-time order without threads or sleeping.
//! Time jumps straight to the next due task. Ties run in spawn order.

use heapless::Vec;

use super::tasks::PeriodicTask;

/// Scheduler errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// No free task slot
    Full,
}

/// One completed task iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunRecord {
    /// Name of the task that ran
    pub task: &'static str,
    /// Simulated time of the run
    pub at_ms: u64,
    /// Delay the task asked for
    pub next_in_ms: u32,
}

struct Slot<'a> {
    task: &'a mut dyn PeriodicTask,
    due_ms: u64,
}

/// Runs up to `N` tasks on a simulated millisecond clock
pub struct CooperativeScheduler<'a, const N: usize> {
    slots: Vec<Slot<'a>, N>,
    now_ms: u64,
}

impl<const N: usize> Default for CooperativeScheduler<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> CooperativeScheduler<'a, N> {
    /// Create an empty scheduler at time 0
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            now_ms: 0,
        }
    }

    /// Current simulated time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of spawned tasks
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no task has been spawned
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Add a task that first runs now
    pub fn spawn(&mut self, task: &'a mut dyn PeriodicTask) -> Result<(), SchedulerError> {
        self.spawn_at(task, self.now_ms)
    }

    /// Add a task that first runs at `first_run_ms`
    pub fn spawn_at(
        &mut self,
        task: &'a mut dyn PeriodicTask,
        first_run_ms: u64,
    ) -> Result<(), SchedulerError> {
        self.slots
            .push(Slot {
                task,
                due_ms: first_run_ms,
            })
            .map_err(|_| SchedulerError::Full)
    }

    /// Time at which the next task is due
    pub fn next_due_ms(&self) -> Option<u64> {
        self.slots.iter().map(|slot| slot.due_ms).min()
    }

    /// Run the task due first
    ///
    /// The clock never moves backwards: a task spawned in the past runs at
    /// the current time.
    pub fn run_next(&mut self) -> Option<RunRecord> {
        let slot = self.slots.iter_mut().min_by_key(|slot| slot.due_ms)?;

        self.now_ms = self.now_ms.max(slot.due_ms);
        let next_in_ms = slot.task.run(self.now_ms);
        slot.due_ms = self.now_ms + u64::from(next_in_ms);

        Some(RunRecord {
            task: slot.task.name(),
            at_ms: self.now_ms,
            next_in_ms,
        })
    }

    /// Run every task due at or before `end_ms`, then advance to `end_ms`
    ///
    /// Returns the number of task iterations executed.
    pub fn run_until(&mut self, end_ms: u64) -> usize {
        let mut runs = 0;
        while self.next_due_ms().is_some_and(|due| due <= end_ms) {
            if self.run_next().is_none() {
                break;
            }
            runs += 1;
        }
        self.now_ms = self.now_ms.max(end_ms);
        runs
    }
}
