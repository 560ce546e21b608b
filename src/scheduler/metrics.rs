//! Per-process and summary performance metrics.
//!
//! Derived from a finished run: the engine's process tracking copies and
//! the timeline they produced.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion | Tick at which the last unit of work finished |
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - original burst |
//! | Response | first dispatch - arrival |
//! | Makespan | End of the timeline ("total execution time") |
//! | Utilization | busy ticks / makespan |
//! | Throughput | processes / makespan |

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedError};
use crate::models::{SimProcess, Timeline};

/// Metrics for a single process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process name.
    pub name: String,
    /// Arrival tick.
    pub arrival_time: i64,
    /// Original burst time.
    pub burst_time: i64,
    /// Tick at which the process finished.
    pub completion_time: i64,
    /// `completion_time - arrival_time`.
    pub turnaround_time: i64,
    /// `turnaround_time - burst_time`.
    pub waiting_time: i64,
    /// Ticks between arrival and first dispatch.
    pub response_time: i64,
}

impl ProcessMetrics {
    fn from_sim(process: &SimProcess<'_>) -> Result<Self> {
        let completion_time = process.completion_time.ok_or_else(|| {
            SchedError::invariant(0, format!("process '{}' never completed", process.name()))
        })?;
        let first_run = process.first_run.unwrap_or(completion_time);

        let arrival_time = process.arrival_time();
        let turnaround_time = completion_time - arrival_time;
        // Always the submitted burst; remaining_time is zero by now.
        let waiting_time = turnaround_time - process.original_burst;

        if waiting_time < 0 || first_run < arrival_time {
            return Err(SchedError::invariant(
                completion_time,
                format!(
                    "process '{}' ran before it arrived (waiting={waiting_time}, first run={first_run})",
                    process.name()
                ),
            ));
        }

        Ok(Self {
            name: process.name().to_string(),
            arrival_time,
            burst_time: process.original_burst,
            completion_time,
            turnaround_time,
            waiting_time,
            response_time: first_run - arrival_time,
        })
    }
}

/// Summary metrics for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Per-process metrics, in input order.
    pub processes: Vec<ProcessMetrics>,
    /// Mean waiting time.
    pub average_waiting_time: f64,
    /// Mean turnaround time.
    pub average_turnaround_time: f64,
    /// Mean response time.
    pub average_response_time: f64,
    /// End of the timeline.
    pub makespan: i64,
    /// Ticks with no process on the CPU.
    pub idle_time: i64,
    /// Fraction of the makespan the CPU was busy (0.0..=1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
}

impl ScheduleMetrics {
    /// Computes metrics from completed tracking copies and their timeline.
    ///
    /// Fails with an invariant violation if any process is unfinished or
    /// has a negative waiting time.
    pub fn calculate(processes: &[SimProcess<'_>], timeline: &Timeline) -> Result<Self> {
        let per_process = processes
            .iter()
            .map(ProcessMetrics::from_sim)
            .collect::<Result<Vec<_>>>()?;

        let makespan = timeline.makespan();
        let throughput = if makespan > 0 {
            per_process.len() as f64 / makespan as f64
        } else {
            0.0
        };

        Ok(Self {
            average_waiting_time: mean(per_process.iter().map(|m| m.waiting_time)),
            average_turnaround_time: mean(per_process.iter().map(|m| m.turnaround_time)),
            average_response_time: mean(per_process.iter().map(|m| m.response_time)),
            makespan,
            idle_time: timeline.idle_time(),
            cpu_utilization: timeline.utilization().unwrap_or(0.0),
            throughput,
            processes: per_process,
        })
    }

    /// Metrics for the named process.
    pub fn for_process(&self, name: &str) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|m| m.name == name)
    }
}

/// Arithmetic mean; 0.0 for an empty sequence.
fn mean(values: impl Iterator<Item = i64>) -> f64 {
    // i128 so that many long-running processes cannot overflow the sum
    let (sum, count) = values.fold((0i128, 0usize), |(s, c), v| (s + i128::from(v), c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn finished<'a>(p: &'a Process, index: usize, first_run: i64, completion: i64) -> SimProcess<'a> {
        let mut sp = SimProcess::new(p, index);
        sp.first_run = Some(first_run);
        sp.completion_time = Some(completion);
        sp.remaining_time = 0;
        sp
    }

    #[test]
    fn test_metrics_basic() {
        let procs = vec![Process::new("P1", 0, 5), Process::new("P2", 0, 2)];
        let sims = vec![finished(&procs[0], 0, 0, 5), finished(&procs[1], 1, 5, 7)];
        let mut timeline = Timeline::new();
        timeline.push_run("P1", 0, 5);
        timeline.push_run("P2", 5, 7);

        let m = ScheduleMetrics::calculate(&sims, &timeline).unwrap();
        let p2 = m.for_process("P2").unwrap();
        assert_eq!(p2.completion_time, 7);
        assert_eq!(p2.turnaround_time, 7);
        assert_eq!(p2.waiting_time, 5);
        assert_eq!(p2.response_time, 5);
        assert!((m.average_waiting_time - 2.5).abs() < 1e-10);
        assert!((m.average_turnaround_time - 6.0).abs() < 1e-10);
        assert_eq!(m.makespan, 7);
        assert_eq!(m.idle_time, 0);
        assert!((m.cpu_utilization - 1.0).abs() < 1e-10);
        assert!((m.throughput - 2.0 / 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_with_idle() {
        let procs = vec![Process::new("P1", 3, 2)];
        let sims = vec![finished(&procs[0], 0, 3, 5)];
        let mut timeline = Timeline::new();
        timeline.push_idle(0, 3);
        timeline.push_run("P1", 3, 5);

        let m = ScheduleMetrics::calculate(&sims, &timeline).unwrap();
        assert_eq!(m.processes[0].waiting_time, 0);
        assert_eq!(m.idle_time, 3);
        assert!((m.cpu_utilization - 0.4).abs() < 1e-10);
    }

    #[test]
    fn test_waiting_uses_original_burst() {
        let procs = vec![Process::new("P1", 0, 4)];
        let mut sim = finished(&procs[0], 0, 0, 6);
        // remaining_time is zero after a run; waiting must not depend on it
        sim.remaining_time = 0;
        let m = ScheduleMetrics::calculate(&[sim], &Timeline::new()).unwrap();
        assert_eq!(m.processes[0].waiting_time, 2);
        assert_eq!(m.processes[0].burst_time, 4);
    }

    #[test]
    fn test_unfinished_process_is_invariant_violation() {
        let procs = vec![Process::new("P1", 0, 4)];
        let sims = vec![SimProcess::new(&procs[0], 0)];
        let err = ScheduleMetrics::calculate(&sims, &Timeline::new()).unwrap_err();
        assert!(matches!(err, SchedError::InternalInvariantViolation { .. }));
    }

    #[test]
    fn test_negative_waiting_is_invariant_violation() {
        let procs = vec![Process::new("P1", 0, 4)];
        let sims = vec![finished(&procs[0], 0, 0, 3)];
        assert!(ScheduleMetrics::calculate(&sims, &Timeline::new()).is_err());
    }
}
