//! Multilevel queue CPU scheduler simulation.
//!
//! A fixed set of processes is split across three queues by level and the
//! queues run strictly in order on one shared clock:
//!
//! 1. Round Robin, arrival aware, with a fixed quantum
//! 2. Priority, non-preemptive, highest value first
//! 3. First-Come-First-Served
//!
//! [`simulate`] takes raw input tuples and returns per-process timings plus
//! aggregate statistics. Reading input and printing tables live in
//! [`utils`] and [`report`] for callers that want them.

pub mod error;
pub mod metrics;
pub mod process;
pub mod report;
pub mod schedulers;
pub mod sequencer;
pub mod utils;

pub use crate::error::SchedError;
pub use crate::metrics::{summarize, Report, Summary};
pub use crate::process::{Priority, Process, ProcessResult, ProcessSpec, QueueLevel, Time};
pub use crate::schedulers::{run_fcfs, run_priority, run_round_robin, QueueScheduler, DEFAULT_QUANTUM};
pub use crate::sequencer::{Schedule, Sequencer, SimConfig};

/// Builds records from `specs` (ids `1..=N` in input order), runs all three
/// queues and derives the metrics.
///
/// An empty workload, a record with a zero burst, or a workload whose
/// schedule could run the clock past `Time::MAX` is rejected before anything
/// runs.
pub fn simulate(specs: &[ProcessSpec], config: &SimConfig) -> Result<Report, SchedError> {
    if specs.is_empty() {
        return Err(SchedError::InvalidCount {
            found: "0".to_string(),
        });
    }

    let mut processes = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        let id = index + 1;
        if spec.burst_time == 0 {
            return Err(SchedError::malformed(id, "burst time must be positive, got 0"));
        }
        processes.push(Process::from_spec(id, spec));
    }

    if Sequencer::clock_horizon(&processes).is_none() {
        return Err(SchedError::ClockOverflow);
    }

    let schedule = Sequencer::from_config(config).run(processes);
    summarize(&schedule, config.track_response_time)
}
