//! Single-queue dispatchers.
//!
//! Each dispatcher takes exclusive ownership of one queue's records for the
//! duration of the call, mutates them in place and returns the clock value
//! at which the queue drained. An empty queue returns the input clock.
//!
//! Clock arithmetic is unchecked: callers keep the starting clock plus the
//! queue's latest arrival and total burst within [`Time`]. `simulate` does
//! this through `Sequencer::clock_horizon`.

use std::collections::VecDeque;
use std::num::NonZeroU64;

use log::{debug, trace};

use crate::process::{Process, QueueLevel, Time};

/// Default Round Robin time slice.
pub const DEFAULT_QUANTUM: NonZeroU64 = match NonZeroU64::new(4) {
    Some(q) => q,
    None => unreachable!(),
};

pub trait QueueScheduler {
    /// The queue this dispatcher serves.
    fn level(&self) -> QueueLevel;

    /// Runs every record in `queue` to completion starting at `clock`.
    fn dispatch(&self, queue: &mut [Process], clock: Time) -> Time;
}

pub struct RoundRobin {
    quantum: NonZeroU64,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroU64) -> Self {
        RoundRobin { quantum }
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        RoundRobin::new(DEFAULT_QUANTUM)
    }
}

impl QueueScheduler for RoundRobin {
    fn level(&self) -> QueueLevel {
        QueueLevel::RoundRobin
    }

    fn dispatch(&self, queue: &mut [Process], clock: Time) -> Time {
        run_round_robin(queue, clock, self.quantum)
    }
}

pub struct Prio;

impl QueueScheduler for Prio {
    fn level(&self) -> QueueLevel {
        QueueLevel::Priority
    }

    fn dispatch(&self, queue: &mut [Process], clock: Time) -> Time {
        run_priority(queue, clock)
    }
}

pub struct Fcfs;

impl QueueScheduler for Fcfs {
    fn level(&self) -> QueueLevel {
        QueueLevel::Fcfs
    }

    fn dispatch(&self, queue: &mut [Process], clock: Time) -> Time {
        run_fcfs(queue, clock)
    }
}

fn queue_string(queue: &[Process], indices: &VecDeque<usize>) -> String {
    indices
        .iter()
        .map(|&i| format!("P{}:{}", queue[i].id, queue[i].remaining_time))
        .collect::<Vec<_>>()
        .join(" ")
}

// moves every pending record that has arrived by `clock` to the back of `active`
fn admit(queue: &[Process], pending: &mut VecDeque<usize>, active: &mut VecDeque<usize>, clock: Time) {
    while let Some(&i) = pending.front() {
        if queue[i].arrival_time > clock {
            break;
        }
        pending.pop_front();
        active.push_back(i);
        debug!("{}: P{} admitted to RR (arrived {})", clock, queue[i].id, queue[i].arrival_time);
    }
}

/// Arrival-aware Round Robin.
///
/// Records that have not arrived yet wait in `pending` (stable-sorted by
/// arrival, so equal arrivals keep input order). Arrivals during a slice are
/// admitted before the preempted record goes to the back of the line. When
/// nothing is runnable the clock jumps to the next arrival.
pub fn run_round_robin(queue: &mut [Process], mut clock: Time, quantum: NonZeroU64) -> Time {
    let quantum = quantum.get();

    let mut order: Vec<usize> = (0..queue.len()).collect();
    order.sort_by_key(|&i| queue[i].arrival_time);
    let mut pending: VecDeque<usize> = order.into();
    let mut active: VecDeque<usize> = VecDeque::with_capacity(queue.len());

    loop {
        admit(queue, &mut pending, &mut active, clock);
        trace!(
            "{}: RR active ({}) pending ({})",
            clock,
            queue_string(queue, &active),
            queue_string(queue, &pending)
        );

        let Some(i) = active.pop_front() else {
            match pending.front() {
                Some(&next) => {
                    debug!("{}: RR idle until {}", clock, queue[next].arrival_time);
                    clock = queue[next].arrival_time;
                    continue;
                }
                None => break,
            }
        };

        let process = &mut queue[i];
        process.mark_started(clock);

        if process.remaining_time > quantum {
            let from = clock;
            clock = process.run_for(clock, quantum);
            debug!("{}: P{} sliced {}->{} remaining {}", from, process.id, from, clock, process.remaining_time);
            admit(queue, &mut pending, &mut active, clock);
            active.push_back(i);
        } else {
            let from = clock;
            clock = process.run_for(clock, process.remaining_time);
            debug!("{}: P{} ran {}->{} and completed", from, process.id, from, clock);
        }
    }

    clock
}

/// Non-preemptive, highest priority first. The order is fixed by one sort
/// up front (priority descending, then arrival ascending); readiness is not
/// re-evaluated against the clock.
pub fn run_priority(queue: &mut [Process], clock: Time) -> Time {
    queue.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.arrival_time.cmp(&b.arrival_time))
    });
    run_in_order(queue, clock, QueueLevel::Priority)
}

/// Non-preemptive, arrival order. Equal arrivals keep input order.
pub fn run_fcfs(queue: &mut [Process], clock: Time) -> Time {
    queue.sort_by_key(|p| p.arrival_time);
    run_in_order(queue, clock, QueueLevel::Fcfs)
}

fn run_in_order(queue: &mut [Process], mut clock: Time, level: QueueLevel) -> Time {
    trace!(
        "{}: Q{} order ({})",
        clock,
        level,
        queue.iter().map(|p| format!("P{}", p.id)).collect::<Vec<_>>().join(" ")
    );

    for process in queue.iter_mut() {
        if clock < process.arrival_time {
            debug!("{}: Q{} idle until {}", clock, level, process.arrival_time);
            clock = process.arrival_time;
        }
        process.mark_started(clock);
        let from = clock;
        clock = process.run_for(clock, process.remaining_time);
        debug!("{}: P{} ran {}->{} and completed", from, process.id, from, clock);
    }

    clock
}
