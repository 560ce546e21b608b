//! Process model.
//!
//! A process is a single CPU-bound unit of work: it becomes eligible at its
//! arrival time and needs `burst_time` units of CPU to finish.
//!
//! # Time Representation
//! All times are integral ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

use crate::validation::{coerce_field, coerce_priority};

/// A process submitted to the simulator.
///
/// Immutable once a simulation starts; the engine tracks progress in its
/// own [`SimProcess`] copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process name (e.g. `"P1"`).
    pub name: String,
    /// Tick at which the process becomes eligible for scheduling.
    #[serde(alias = "arrivalTime")]
    pub arrival_time: i64,
    /// Total CPU time required.
    #[serde(alias = "burstTime")]
    pub burst_time: i64,
    /// Scheduling priority (lower = more urgent).
    #[serde(default)]
    pub priority: i32,
}

impl Process {
    /// Creates a process with priority 0.
    pub fn new(name: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Builds a process from raw text fields, as typed into a form.
    ///
    /// Arrival and burst go through [`coerce_field`]: leading zeros are
    /// stripped and anything unparsable or negative becomes 0. Priority goes
    /// through [`coerce_priority`], which keeps negative values.
    pub fn from_fields(name: impl Into<String>, arrival: &str, burst: &str, priority: &str) -> Self {
        Self::new(name, coerce_field(arrival), coerce_field(burst))
            .with_priority(coerce_priority(priority))
    }
}

/// Engine-side tracking copy of a [`Process`].
///
/// Owned by exactly one simulation run and discarded afterwards.
#[derive(Debug, Clone)]
pub struct SimProcess<'a> {
    /// The input process.
    pub process: &'a Process,
    /// Position in the input list (insertion order, final tie-breaker).
    pub index: usize,
    /// CPU time still required.
    pub remaining_time: i64,
    /// Burst as submitted. Metrics are always derived from this.
    pub original_burst: i64,
    /// Tick at which the process was first dispatched.
    pub first_run: Option<i64>,
    /// Tick at which the process finished.
    pub completion_time: Option<i64>,
}

impl<'a> SimProcess<'a> {
    /// Creates a tracking copy for the process at `index`.
    pub fn new(process: &'a Process, index: usize) -> Self {
        Self {
            process,
            index,
            remaining_time: process.burst_time,
            original_burst: process.burst_time,
            first_run: None,
            completion_time: None,
        }
    }

    /// Process name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.process.name
    }

    /// Arrival tick.
    #[inline]
    pub fn arrival_time(&self) -> i64 {
        self.process.arrival_time
    }

    /// Whether all CPU work is done.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Consumes `ticks` of CPU starting at `now`.
    ///
    /// Records the first dispatch and, when the remaining time reaches zero,
    /// the completion time (`now + ticks`). Returns `true` on completion.
    pub fn run_for(&mut self, now: i64, ticks: i64) -> bool {
        self.first_run.get_or_insert(now);
        self.remaining_time -= ticks;
        if self.remaining_time <= 0 {
            self.remaining_time = 0;
            self.completion_time = Some(now + ticks);
            true
        } else {
            false
        }
    }
}
