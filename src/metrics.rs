use serde::Serialize;

use crate::error::SchedError;
use crate::process::{Process, ProcessResult, Time};
use crate::sequencer::Schedule;

/// Aggregate statistics over one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub final_clock: Time,
    /// Saturates at `Time::MAX`.
    pub total_burst: Time,
    pub avg_turnaround_time: f64,
    pub avg_waiting_time: f64,
    pub avg_response_time: Option<f64>,
    /// Processes per unit time. `None` when the final clock is zero.
    pub throughput: Option<f64>,
    /// Percentage of the run the CPU was busy. `None` when the final clock is zero.
    pub cpu_utilization: Option<f64>,
}

/// Everything the caller gets back from a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub results: Vec<ProcessResult>,
    pub summary: Summary,
    pub stage_clocks: [Time; 4],
}

impl ProcessResult {
    /// Derives turnaround, waiting and response time from a completed record.
    /// Differences are floored at zero.
    pub fn from_process(process: &Process, track_response_time: bool) -> Result<ProcessResult, SchedError> {
        let completion_time = process
            .completion_time
            .ok_or(SchedError::Unfinished { id: process.id })?;

        let turnaround_time = completion_time.saturating_sub(process.arrival_time);
        let waiting_time = turnaround_time.saturating_sub(process.burst_time);
        let response_time = if track_response_time {
            process.start_time.map(|start| start.saturating_sub(process.arrival_time))
        } else {
            None
        };

        Ok(ProcessResult {
            id: process.id,
            queue_level: process.level,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            completion_time,
            turnaround_time,
            waiting_time,
            response_time,
        })
    }
}

// u128 totals: summed per-process times can exceed Time::MAX
fn mean(total: u128, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

impl Summary {
    pub fn from_results(results: &[ProcessResult], final_clock: Time, track_response_time: bool) -> Summary {
        let count = results.len();
        let total_burst: u128 = results.iter().map(|r| u128::from(r.burst_time)).sum();
        let total_turnaround: u128 = results.iter().map(|r| u128::from(r.turnaround_time)).sum();
        let total_waiting: u128 = results.iter().map(|r| u128::from(r.waiting_time)).sum();

        let avg_response_time = track_response_time.then(|| {
            let total: u128 = results.iter().filter_map(|r| r.response_time).map(u128::from).sum();
            mean(total, count)
        });

        let (throughput, cpu_utilization) = if final_clock > 0 {
            let clock = final_clock as f64;
            (
                Some(count as f64 / clock),
                Some(total_burst as f64 / clock * 100.0),
            )
        } else {
            (None, None)
        };

        Summary {
            count,
            final_clock,
            total_burst: Time::try_from(total_burst).unwrap_or(Time::MAX),
            avg_turnaround_time: mean(total_turnaround, count),
            avg_waiting_time: mean(total_waiting, count),
            avg_response_time,
            throughput,
            cpu_utilization,
        }
    }
}

/// Turns a finished schedule into per-process results and the aggregate summary.
pub fn summarize(schedule: &Schedule, track_response_time: bool) -> Result<Report, SchedError> {
    let results = schedule
        .processes
        .iter()
        .map(|p| ProcessResult::from_process(p, track_response_time))
        .collect::<Result<Vec<_>, _>>()?;
    let summary = Summary::from_results(&results, schedule.final_clock(), track_response_time);

    Ok(Report {
        results,
        summary,
        stage_clocks: schedule.stage_clocks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::QueueLevel;

    fn finished(id: usize, arrival: Time, burst: Time, start: Time, completion: Time) -> Process {
        let mut p = Process::new(id, arrival, burst, 0, QueueLevel::Fcfs);
        p.start_time = Some(start);
        p.completion_time = Some(completion);
        p.remaining_time = 0;
        p
    }

    #[test]
    fn derives_per_process_times() {
        let r = ProcessResult::from_process(&finished(1, 2, 3, 4, 9), true).unwrap();
        assert_eq!(r.turnaround_time, 7);
        assert_eq!(r.waiting_time, 4);
        assert_eq!(r.response_time, Some(2));
    }

    #[test]
    fn negative_differences_clamp_to_zero() {
        // inconsistent on purpose: completes before it arrives
        let r = ProcessResult::from_process(&finished(1, 10, 3, 5, 8), true).unwrap();
        assert_eq!(r.turnaround_time, 0);
        assert_eq!(r.waiting_time, 0);
        assert_eq!(r.response_time, Some(0));
    }

    #[test]
    fn response_is_dropped_when_not_tracked() {
        let r = ProcessResult::from_process(&finished(1, 0, 3, 1, 4), false).unwrap();
        assert_eq!(r.response_time, None);
        let summary = Summary::from_results(&[r], 4, false);
        assert_eq!(summary.avg_response_time, None);
    }

    #[test]
    fn unfinished_record_is_an_error() {
        let p = Process::new(7, 0, 3, 0, QueueLevel::Fcfs);
        let err = ProcessResult::from_process(&p, true).unwrap_err();
        assert!(matches!(err, SchedError::Unfinished { id: 7 }));
    }

    #[test]
    fn zero_clock_has_no_rates() {
        let summary = Summary::from_results(&[], 0, true);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg_turnaround_time, 0.0);
        assert_eq!(summary.avg_response_time, Some(0.0));
        assert_eq!(summary.throughput, None);
        assert_eq!(summary.cpu_utilization, None);
    }

    #[test]
    fn rates_use_final_clock() {
        let results = vec![
            ProcessResult::from_process(&finished(1, 0, 2, 0, 2), true).unwrap(),
            ProcessResult::from_process(&finished(2, 6, 2, 6, 8), true).unwrap(),
        ];
        let summary = Summary::from_results(&results, 8, true);
        assert_eq!(summary.total_burst, 4);
        assert_eq!(summary.throughput, Some(0.25));
        assert_eq!(summary.cpu_utilization, Some(50.0));
        assert_eq!(summary.avg_turnaround_time, 2.0);
        assert_eq!(summary.avg_waiting_time, 0.0);
    }

    #[test]
    fn large_totals_do_not_overflow() {
        let big = Time::MAX - 1;
        let results = vec![
            ProcessResult::from_process(&finished(1, 0, big, 0, big), true).unwrap(),
            ProcessResult::from_process(&finished(2, 0, big, 0, big), true).unwrap(),
        ];
        let summary = Summary::from_results(&results, big, true);
        assert_eq!(summary.total_burst, Time::MAX);
        assert_eq!(summary.avg_turnaround_time, big as f64);
        assert_eq!(summary.avg_waiting_time, 0.0);
    }

    #[test]
    fn recomputing_is_idempotent() {
        let p = finished(3, 1, 4, 2, 11);
        let first = ProcessResult::from_process(&p, true).unwrap();
        let second = ProcessResult::from_process(&p, true).unwrap();
        assert_eq!(first, second);
    }
}
