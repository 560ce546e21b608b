//! Policy kinds and their slice semantics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchedError;

/// How long a dispatched process keeps the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceMode {
    /// Runs its whole remaining time in one go.
    ToCompletion,
    /// Re-evaluates the ready set at every tick. Since a ranking can only
    /// change when a process arrives, the engine runs the winner until the
    /// next arrival or its completion, whichever comes first.
    UntilArrival,
    /// Runs up to the quantum, then rotates to the queue tail.
    Quantum,
}

/// One of the six supported dispatch policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// First-Come-First-Served.
    Fcfs,
    /// Shortest-Job-First, non-preemptive.
    #[serde(alias = "sjf-np")]
    SjfNonPreemptive,
    /// Shortest-Job-First, preemptive (shortest remaining time first).
    #[serde(alias = "sjf-p", alias = "srtf")]
    SjfPreemptive,
    /// Priority, non-preemptive.
    #[serde(alias = "priority-np")]
    PriorityNonPreemptive,
    /// Priority, preemptive.
    #[serde(alias = "priority-p")]
    PriorityPreemptive,
    /// Round Robin with a fixed quantum.
    #[serde(alias = "rr")]
    RoundRobin,
}

impl PolicyKind {
    /// Every policy, in display order.
    pub const ALL: [PolicyKind; 6] = [
        PolicyKind::Fcfs,
        PolicyKind::SjfNonPreemptive,
        PolicyKind::SjfPreemptive,
        PolicyKind::PriorityNonPreemptive,
        PolicyKind::PriorityPreemptive,
        PolicyKind::RoundRobin,
    ];

    /// Human-readable policy name.
    pub fn label(&self) -> &'static str {
        match self {
            PolicyKind::Fcfs => "FCFS",
            PolicyKind::SjfNonPreemptive => "SJF (Non-Preemptive)",
            PolicyKind::SjfPreemptive => "SJF (Preemptive)",
            PolicyKind::PriorityNonPreemptive => "Priority (Non-Preemptive)",
            PolicyKind::PriorityPreemptive => "Priority (Preemptive)",
            PolicyKind::RoundRobin => "Round Robin",
        }
    }

    /// Slice semantics of this policy.
    pub fn slice_mode(&self) -> SliceMode {
        match self {
            PolicyKind::Fcfs
            | PolicyKind::SjfNonPreemptive
            | PolicyKind::PriorityNonPreemptive => SliceMode::ToCompletion,
            PolicyKind::SjfPreemptive | PolicyKind::PriorityPreemptive => SliceMode::UntilArrival,
            PolicyKind::RoundRobin => SliceMode::Quantum,
        }
    }

    /// Whether a running process can lose the CPU before finishing.
    pub fn is_preemptive(&self) -> bool {
        self.slice_mode() != SliceMode::ToCompletion
    }

    /// Whether the process priority field affects this policy.
    pub fn uses_priority(&self) -> bool {
        matches!(
            self,
            PolicyKind::PriorityNonPreemptive | PolicyKind::PriorityPreemptive
        )
    }

    /// Whether the quantum parameter is required.
    pub fn requires_quantum(&self) -> bool {
        *self == PolicyKind::RoundRobin
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PolicyKind {
    type Err = SchedError;

    /// Accepts display labels and short forms, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let kind = match normalized.as_str() {
            "fcfs" | "fifo" => PolicyKind::Fcfs,
            "sjf" | "sjf-np" | "sjf (non-preemptive)" => PolicyKind::SjfNonPreemptive,
            "sjf-p" | "srtf" | "sjf (preemptive)" => PolicyKind::SjfPreemptive,
            "priority" | "priority-np" | "priority (non-preemptive)" => {
                PolicyKind::PriorityNonPreemptive
            }
            "priority-p" | "priority (preemptive)" => PolicyKind::PriorityPreemptive,
            "rr" | "round-robin" | "round robin" => PolicyKind::RoundRobin,
            _ => {
                return Err(SchedError::Parse(format!("unknown scheduling policy '{s}'")));
            }
        };
        Ok(kind)
    }
}
