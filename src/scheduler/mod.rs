//! Scheduler engine and performance metrics.
//!
//! # Algorithm
//!
//! `CpuScheduler` steps a single simulated CPU through discrete time,
//! admitting arrivals, dispatching according to the active policy, and
//! recording every occupancy interval (idle included) on a `Timeline`.
//!
//! # Metrics
//!
//! `ScheduleMetrics` derives completion, turnaround, waiting and response
//! times per process, their averages, and CPU utilization.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

mod engine;
mod metrics;

pub use engine::{
    compare_policies, simulate, CpuScheduler, SimulationRequest, SimulationResult,
    DEFAULT_QUANTUM,
};
pub use metrics::{ProcessMetrics, ScheduleMetrics};
