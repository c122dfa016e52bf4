use std::time::Duration;

use crate::component::ComponentId;

/// Terminal state of one dispatch task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    /// The handler returned an error
    Failed(String),
    /// The handler panicked
    Panicked(String),
    /// The task was cancelled by the runtime before it finished
    Cancelled,
    /// The handler did not finish before its deadline; it keeps running detached
    TimedOut,
}

impl TaskOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskOutcome::Completed)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TaskOutcome::Failed(_) | TaskOutcome::Panicked(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskOutcome::Completed => "completed",
            TaskOutcome::Failed(_) => "failed",
            TaskOutcome::Panicked(_) => "panicked",
            TaskOutcome::Cancelled => "cancelled",
            TaskOutcome::TimedOut => "timed out",
        }
    }
}

/// Outcome of one component's task within a dispatch
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub component_id: ComponentId,
    pub component: String,
    pub outcome: TaskOutcome,
    /// Time from submission to the terminal state
    pub elapsed: Duration,
}

/// Aggregated outcomes of one fan-out.
///
/// Tasks that had not reached a terminal state when an interrupted dispatch
/// gave up have no record; see [`unfinished`](DispatchReport::unfinished).
#[derive(Debug, Clone)]
pub struct DispatchReport {
    event: &'static str,
    dispatched: usize,
    records: Vec<TaskRecord>,
    interrupted: bool,
    elapsed: Duration,
}

impl DispatchReport {
    pub(crate) fn new(event: &'static str, dispatched: usize) -> Self {
        Self {
            event,
            dispatched,
            records: Vec::with_capacity(dispatched),
            interrupted: false,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn record(&mut self, record: TaskRecord) {
        self.records.push(record);
    }

    pub(crate) fn mark_interrupted(&mut self) {
        self.interrupted = true;
    }

    pub(crate) fn finish(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn event(&self) -> &'static str {
        self.event
    }

    /// Number of tasks submitted, one per member of the snapshot
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    pub fn completed(&self) -> usize {
        self.count(TaskOutcome::is_completed)
    }

    /// Tasks whose handler returned an error or panicked
    pub fn failed(&self) -> usize {
        self.count(TaskOutcome::is_failure)
    }

    pub fn timed_out(&self) -> usize {
        self.count(|o| matches!(o, TaskOutcome::TimedOut))
    }

    pub fn cancelled(&self) -> usize {
        self.count(|o| matches!(o, TaskOutcome::Cancelled))
    }

    /// Tasks abandoned by an interrupted wait
    pub fn unfinished(&self) -> usize {
        self.dispatched - self.records.len()
    }

    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// True when every dispatched task completed normally
    pub fn is_clean(&self) -> bool {
        !self.interrupted && self.completed() == self.dispatched
    }

    pub fn outcome_for(&self, id: ComponentId) -> Option<&TaskOutcome> {
        self.records.iter().find(|r| r.component_id == id).map(|r| &r.outcome)
    }

    fn count(&self, pred: impl Fn(&TaskOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }
}
