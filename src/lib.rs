//! Single-CPU process scheduling simulator.
//!
//! Given a small set of processes (arrival time, burst time, priority) and a
//! dispatch policy, produces a timeline of CPU occupancy and per-process
//! performance metrics. Every run is a pure function of its inputs.
//!
//! # Modules
//!
//! - **`models`**: `Process`, `SimProcess`, `TimelineSegment`, `Timeline`
//! - **`dispatching`**: The six policies and their ranking rules
//! - **`scheduler`**: `CpuScheduler` engine and `ScheduleMetrics`
//! - **`validation`**: Input checks and raw-field coercion
//! - **`workload`**: Seeded random process sets
//!
//! # Example
//!
//! ```
//! use u_cpusched::dispatching::PolicyKind;
//! use u_cpusched::models::Process;
//! use u_cpusched::scheduler::simulate;
//!
//! let processes = vec![
//!     Process::new("P1", 0, 4).with_priority(2),
//!     Process::new("P2", 1, 2).with_priority(1),
//! ];
//! let result = simulate(&processes, PolicyKind::PriorityPreemptive, 2).unwrap();
//! assert_eq!(result.timeline.len(), 3);
//! assert_eq!(result.metrics.for_process("P1").unwrap().completion_time, 6);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-9

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::{Result, SchedError};
