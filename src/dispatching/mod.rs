//! Dispatch policies and ready-set selection.
//!
//! The six supported policies form a closed set. Each one is described by
//! a ranking key (see [`rules`]) and a [`SliceMode`] that says how long the
//! selected process keeps the CPU.
//!
//! | Policy | Ranking key (ascending) | Slice |
//! |--------|-------------------------|-------|
//! | FCFS | arrival time | run to completion |
//! | SJF (Non-Preemptive) | remaining time | run to completion |
//! | SJF (Preemptive) | remaining time | until next arrival |
//! | Priority (Non-Preemptive) | priority value | run to completion |
//! | Priority (Preemptive) | priority value | until next arrival |
//! | Round Robin | none (FIFO rotation) | quantum |
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5

mod policy;
pub mod rules;

pub use policy::{PolicyKind, SliceMode};
pub use rules::{select_best, RuleScore};
