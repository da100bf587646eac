//! Chains the three queue dispatchers on one clock.
//!
//! Queues run strictly in level order and never overlap: Queue 2 starts only
//! once every Queue 1 record has completed, whatever its own arrival times.
//! The clock returned by one stage is the starting clock of the next.

use std::num::NonZeroU64;

use log::{debug, info};

use crate::process::{Process, QueueLevel, Time};
use crate::schedulers::{Fcfs, Prio, QueueScheduler, RoundRobin, DEFAULT_QUANTUM};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Queue 1 time slice.
    pub quantum: NonZeroU64,
    /// When false, response times are left out of the results.
    pub track_response_time: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            quantum: DEFAULT_QUANTUM,
            track_response_time: true,
        }
    }
}

/// Completed records plus the clock seen at each handoff.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Every record, sorted by id.
    pub processes: Vec<Process>,
    /// `[start, after Q1, after Q2, after Q3]`.
    pub stage_clocks: [Time; 4],
}

impl Schedule {
    pub fn final_clock(&self) -> Time {
        self.stage_clocks[3]
    }
}

pub struct Sequencer {
    stages: [Box<dyn QueueScheduler>; 3],
}

impl Sequencer {
    pub fn new(quantum: NonZeroU64) -> Self {
        Sequencer {
            stages: [
                Box::new(RoundRobin::new(quantum)),
                Box::new(Prio),
                Box::new(Fcfs),
            ],
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Sequencer::new(config.quantum)
    }

    /// Moves each record into the queue named by its level.
    pub fn partition(processes: Vec<Process>) -> [Vec<Process>; 3] {
        let mut queues: [Vec<Process>; 3] = Default::default();
        for process in processes {
            queues[queue_index(process.level)].push(process);
        }
        queues
    }

    /// Upper bound on the final clock of any run over `processes`: the latest
    /// arrival plus the total burst. `None` if that does not fit in [`Time`].
    ///
    /// The clock only idles forward to an arrival and otherwise advances by
    /// burst time, so it never passes this bound.
    pub fn clock_horizon(processes: &[Process]) -> Option<Time> {
        let latest = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
        processes
            .iter()
            .try_fold(latest, |clock, p| clock.checked_add(p.burst_time))
    }

    /// Runs every queue to completion, starting the clock at zero.
    ///
    /// `processes` must have a [`clock_horizon`](Sequencer::clock_horizon);
    /// [`simulate`](crate::simulate) checks this before calling.
    pub fn run(&self, processes: Vec<Process>) -> Schedule {
        let mut queues = Sequencer::partition(processes);
        let mut stage_clocks: [Time; 4] = [0; 4];
        let mut clock: Time = 0;

        for (stage, dispatcher) in self.stages.iter().enumerate() {
            let level = dispatcher.level();
            let queue = &mut queues[queue_index(level)];
            debug!("{}: Q{} starts with {} process(es)", clock, level, queue.len());

            clock = dispatcher.dispatch(queue, clock);
            stage_clocks[stage + 1] = clock;
            debug!("{}: Q{} drained", clock, level);
        }

        let mut processes: Vec<Process> = queues.into_iter().flatten().collect();
        processes.sort_by_key(|p| p.id);
        debug_assert!(processes.iter().all(Process::is_done));
        info!("simulated {} process(es), final clock {}", processes.len(), clock);

        Schedule {
            processes,
            stage_clocks,
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Sequencer::new(DEFAULT_QUANTUM)
    }
}

fn queue_index(level: QueueLevel) -> usize {
    usize::from(level.number()) - 1
}
