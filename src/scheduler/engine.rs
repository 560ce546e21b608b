//! Single-CPU time-stepping scheduler engine.
//!
//! # Algorithm
//!
//! 1. Admit every process whose arrival time has been reached.
//! 2. If nothing is ready, record an idle segment up to the next arrival.
//! 3. Otherwise pick the next process: ready-set policies rank by their
//!    [`RankingRule`]; Round Robin pops the head of its FIFO queue.
//! 4. Run it for one slice (to completion, up to the next arrival, or one
//!    quantum).
//! 5. Record the slice on the timeline; consecutive slices of the same
//!    process merge into one segment.
//! 6. Finished processes leave the ready set for good; an unfinished
//!    Round Robin process rejoins the queue tail after the processes that
//!    arrived during its slice.
//!
//! # Complexity
//! O(s * n) where s = number of slices and n = processes. Preemptive
//! policies take at most one slice per arrival plus one per completion,
//! so the cost never depends on burst length.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::ScheduleMetrics;
use crate::dispatching::rules::{select_best, RankingRule};
use crate::dispatching::{PolicyKind, SliceMode};
use crate::error::{Result, SchedError};
use crate::models::{Process, SimProcess, Timeline};
use crate::validation::validate_processes;

/// Quantum used when none is configured.
pub const DEFAULT_QUANTUM: i64 = 2;

fn default_quantum() -> i64 {
    DEFAULT_QUANTUM
}

/// Input container for a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Processes to schedule, in input order.
    pub processes: Vec<Process>,
    /// Dispatch policy.
    pub policy: PolicyKind,
    /// Round Robin quantum (ignored by other policies).
    #[serde(default = "default_quantum")]
    pub quantum: i64,
}

impl SimulationRequest {
    /// Creates a request with the default quantum.
    pub fn new(processes: Vec<Process>, policy: PolicyKind) -> Self {
        Self {
            processes,
            policy,
            quantum: DEFAULT_QUANTUM,
        }
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Parses a request from JSON.
    ///
    /// ```
    /// use u_cpusched::scheduler::SimulationRequest;
    ///
    /// let request = SimulationRequest::from_json(
    ///     r#"{"processes":[{"name":"P1","arrivalTime":0,"burstTime":3}],"policy":"rr","quantum":1}"#,
    /// ).unwrap();
    /// assert_eq!(request.quantum, 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SchedError::Parse(e.to_string()))
    }
}

/// Output of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Policy that produced this result.
    pub policy: PolicyKind,
    /// Quantum used, for Round Robin runs.
    pub quantum: Option<i64>,
    /// CPU occupancy over time, idle periods included.
    pub timeline: Timeline,
    /// Per-process and summary metrics.
    pub metrics: ScheduleMetrics,
}

/// Single-CPU scheduler for one of the six dispatch policies.
///
/// Stateless between calls: every [`simulate`](Self::simulate) builds its
/// own tracking state and discards it afterwards.
///
/// # Example
///
/// ```
/// use u_cpusched::dispatching::PolicyKind;
/// use u_cpusched::models::{Process, TimelineSegment};
/// use u_cpusched::scheduler::CpuScheduler;
///
/// let processes = vec![
///     Process::new("P1", 0, 5),
///     Process::new("P2", 0, 2),
///     Process::new("P3", 0, 4),
/// ];
/// let result = CpuScheduler::new(PolicyKind::SjfNonPreemptive)
///     .simulate(&processes)
///     .unwrap();
///
/// assert_eq!(result.timeline.segments()[0], TimelineSegment::new("P2", 0, 2));
/// assert_eq!(result.metrics.makespan, 11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuScheduler {
    policy: PolicyKind,
    quantum: i64,
}

impl CpuScheduler {
    /// Creates a scheduler with the default quantum.
    pub fn new(policy: PolicyKind) -> Self {
        Self {
            policy,
            quantum: DEFAULT_QUANTUM,
        }
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Configured policy.
    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    /// Configured quantum.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }

    /// Runs a request.
    pub fn run(request: &SimulationRequest) -> Result<SimulationResult> {
        Self::new(request.policy)
            .with_quantum(request.quantum)
            .simulate(&request.processes)
    }

    /// Simulates `processes` to completion.
    ///
    /// Input is validated first; nothing is simulated if validation fails.
    #[tracing::instrument(level = "debug", skip_all, fields(policy = %self.policy, processes = processes.len()))]
    pub fn simulate(&self, processes: &[Process]) -> Result<SimulationResult> {
        validate_processes(processes, self.policy, self.quantum)
            .map_err(SchedError::InvalidConfiguration)?;

        let mut run = Run::new(processes);
        match (self.policy.slice_mode(), self.policy.ranking_rule()) {
            (SliceMode::Quantum, _) => run.round_robin(self.quantum)?,
            (mode, Some(rule)) => run.ranked(rule, mode)?,
            (_, None) => {
                return Err(SchedError::invariant(
                    0,
                    format!("{} has neither a ranking rule nor a quantum", self.policy),
                ));
            }
        }

        let metrics = ScheduleMetrics::calculate(&run.processes, &run.timeline)?;
        debug!(
            makespan = metrics.makespan,
            segments = run.timeline.len(),
            avg_waiting = metrics.average_waiting_time,
            "simulation finished"
        );

        Ok(SimulationResult {
            policy: self.policy,
            quantum: self.policy.requires_quantum().then_some(self.quantum),
            timeline: run.timeline,
            metrics,
        })
    }
}

/// Simulates `processes` under `policy`.
///
/// `quantum` is only consulted for Round Robin.
pub fn simulate(processes: &[Process], policy: PolicyKind, quantum: i64) -> Result<SimulationResult> {
    CpuScheduler::new(policy)
        .with_quantum(quantum)
        .simulate(processes)
}

/// Runs every policy over the same process set, in [`PolicyKind::ALL`] order.
pub fn compare_policies(processes: &[Process], quantum: i64) -> Result<Vec<SimulationResult>> {
    PolicyKind::ALL
        .iter()
        .map(|&policy| simulate(processes, policy, quantum))
        .collect()
}

/// Mutable state of a single simulation run.
struct Run<'a> {
    processes: Vec<SimProcess<'a>>,
    /// Process indices sorted by (arrival, input index).
    arrival_order: Vec<usize>,
    /// Next entry of `arrival_order` to admit.
    next_arrival: usize,
    completed: usize,
    now: i64,
    timeline: Timeline,
}

impl<'a> Run<'a> {
    fn new(input: &'a [Process]) -> Self {
        let processes: Vec<SimProcess<'a>> = input
            .iter()
            .enumerate()
            .map(|(i, p)| SimProcess::new(p, i))
            .collect();

        let mut arrival_order: Vec<usize> = (0..processes.len()).collect();
        arrival_order.sort_by_key(|&i| (processes[i].arrival_time(), i));

        Self {
            processes,
            arrival_order,
            next_arrival: 0,
            completed: 0,
            now: 0,
            timeline: Timeline::new(),
        }
    }

    fn is_finished(&self) -> bool {
        self.completed == self.processes.len()
    }

    /// Moves every process that has arrived by `now` into `ready`,
    /// in arrival order.
    fn admit<E: Extend<usize>>(&mut self, ready: &mut E) {
        while let Some(&idx) = self.arrival_order.get(self.next_arrival) {
            if self.processes[idx].arrival_time() > self.now {
                break;
            }
            trace!(t = self.now, process = self.processes[idx].name(), "admitted");
            ready.extend(Some(idx));
            self.next_arrival += 1;
        }
    }

    /// Arrival time of the earliest process not yet admitted.
    fn next_pending_arrival(&self) -> Option<i64> {
        self.arrival_order
            .get(self.next_arrival)
            .map(|&idx| self.processes[idx].arrival_time())
    }

    /// Idles the CPU until the next pending arrival.
    fn idle_until_next_arrival(&mut self) -> Result<()> {
        let idx = *self.arrival_order.get(self.next_arrival).ok_or_else(|| {
            SchedError::invariant(
                self.now,
                "ready set is empty but no arrivals are pending",
            )
        })?;
        let arrival = self.processes[idx].arrival_time();
        trace!(from = self.now, to = arrival, "cpu idle");
        self.timeline.push_idle(self.now, arrival);
        self.now = self.now.max(arrival);
        Ok(())
    }

    /// Runs process `idx` for `ticks` and records it. Returns `true` if it
    /// finished.
    fn execute(&mut self, idx: usize, ticks: i64) -> bool {
        let start = self.now;
        let process = &mut self.processes[idx];
        let done = process.run_for(start, ticks);
        self.timeline.push_run(&process.process.name, start, start + ticks);
        self.now = start + ticks;

        if done {
            self.completed += 1;
            trace!(t = self.now, process = process.name(), "completed");
        }
        done
    }

    /// Ready-set policies: FCFS, SJF and Priority in either flavour.
    fn ranked(&mut self, rule: RankingRule, mode: SliceMode) -> Result<()> {
        let mut ready: Vec<usize> = Vec::with_capacity(self.processes.len());
        let mut running: Option<usize> = None;

        while !self.is_finished() {
            self.admit(&mut ready);
            if ready.is_empty() {
                self.idle_until_next_arrival()?;
                continue;
            }

            let chosen = select_best(rule, &ready, &self.processes).ok_or_else(|| {
                SchedError::invariant(self.now, "no candidate in a non-empty ready set")
            })?;

            if let Some(prev) = running {
                if prev != chosen && !self.processes[prev].is_complete() {
                    debug!(
                        t = self.now,
                        preempted = self.processes[prev].name(),
                        by = self.processes[chosen].name(),
                        "preemption"
                    );
                }
            }

            let remaining = self.processes[chosen].remaining_time;
            let slice = match (mode, self.next_pending_arrival()) {
                (SliceMode::UntilArrival, Some(arrival)) => remaining.min(arrival - self.now),
                _ => remaining,
            };
            trace!(t = self.now, process = self.processes[chosen].name(), slice, "dispatch");

            if self.execute(chosen, slice) {
                ready.retain(|&i| i != chosen);
            }
            running = Some(chosen);
        }
        Ok(())
    }

    /// Round Robin over a FIFO queue.
    fn round_robin(&mut self, quantum: i64) -> Result<()> {
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(self.processes.len());
        self.admit(&mut queue);

        while !self.is_finished() {
            let Some(idx) = queue.pop_front() else {
                self.idle_until_next_arrival()?;
                self.admit(&mut queue);
                continue;
            };

            let slice = quantum.min(self.processes[idx].remaining_time);
            trace!(t = self.now, process = self.processes[idx].name(), slice, "dispatch");
            let done = self.execute(idx, slice);

            // Arrivals inside the slice queue up ahead of the process being put back.
            self.admit(&mut queue);
            if !done {
                queue.push_back(idx);
            }
        }
        Ok(())
    }
}
