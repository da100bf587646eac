use serde::Serialize;
use std::fmt;

/// Simulation clock and every duration derived from it.
pub type Time = u64;

/// Higher value wins in the priority queue.
pub type Priority = i64;

/// The queue a process is bound to for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum QueueLevel {
    RoundRobin = 1,
    Priority = 2,
    Fcfs = 3,
}

impl QueueLevel {
    pub const ALL: [QueueLevel; 3] = [QueueLevel::RoundRobin, QueueLevel::Priority, QueueLevel::Fcfs];

    /// Normalizes a raw level from the input. Anything that is not 1 or 2
    /// lands in the FCFS queue.
    pub fn from_raw(raw: i64) -> QueueLevel {
        match raw {
            1 => QueueLevel::RoundRobin,
            2 => QueueLevel::Priority,
            _ => QueueLevel::Fcfs,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }
}

impl From<QueueLevel> for u8 {
    fn from(level: QueueLevel) -> u8 {
        level.number()
    }
}

impl fmt::Display for QueueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.number(), f)
    }
}

/// One raw input tuple: `(arrival, burst, priority, queue_level)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSpec {
    pub arrival_time: Time,
    pub burst_time: Time,
    pub priority: Priority,
    pub queue_level: i64,
}

impl ProcessSpec {
    pub fn new(arrival_time: Time, burst_time: Time, priority: Priority, queue_level: i64) -> Self {
        ProcessSpec {
            arrival_time,
            burst_time,
            priority,
            queue_level,
        }
    }
}

/// A process record: fixed inputs plus the state the dispatchers write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub id: usize,
    pub arrival_time: Time,
    pub burst_time: Time,
    pub priority: Priority,
    pub level: QueueLevel,

    // scheduling state
    pub remaining_time: Time,
    pub start_time: Option<Time>,
    pub completion_time: Option<Time>,
}

impl Process {
    pub fn new(id: usize, arrival_time: Time, burst_time: Time, priority: Priority, level: QueueLevel) -> Process {
        Process {
            id,
            arrival_time,
            burst_time,
            priority,
            level,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
        }
    }

    /// Builds the record for the `id`-th input (1-based).
    pub fn from_spec(id: usize, spec: &ProcessSpec) -> Process {
        Process::new(
            id,
            spec.arrival_time,
            spec.burst_time,
            spec.priority,
            QueueLevel::from_raw(spec.queue_level),
        )
    }

    /// Records the first CPU touch. Later dispatches leave it alone.
    pub fn mark_started(&mut self, clock: Time) {
        if self.start_time.is_none() {
            self.start_time = Some(clock);
        }
    }

    /// Runs the process for `slice` units and returns the advanced clock.
    /// Completes the process when its remaining time hits zero.
    pub fn run_for(&mut self, clock: Time, slice: Time) -> Time {
        let slice = slice.min(self.remaining_time);
        self.remaining_time -= slice;
        let clock = clock + slice;
        if self.remaining_time == 0 && self.completion_time.is_none() {
            self.completion_time = Some(clock);
        }
        clock
    }

    pub fn is_done(&self) -> bool {
        self.completion_time.is_some()
    }
}

/// The per-process output tuple handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    pub id: usize,
    pub queue_level: QueueLevel,
    pub arrival_time: Time,
    pub burst_time: Time,
    pub priority: Priority,
    pub completion_time: Time,
    pub turnaround_time: Time,
    pub waiting_time: Time,
    pub response_time: Option<Time>,
}
