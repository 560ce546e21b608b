//! Simulation domain models.
//!
//! Provides the input process description, the engine's tracking copy of
//! it, and the timeline produced by a run.
//!
//! | Type | Role |
//! |------|------|
//! | `Process` | Input: arrival, burst, priority |
//! | `SimProcess` | Engine-internal progress tracking |
//! | `TimelineSegment` | Output: one CPU occupancy interval |
//! | `Timeline` | Output: ordered, contiguous segments |

mod process;
mod timeline;

pub use process::{Process, SimProcess};
pub use timeline::{Timeline, TimelineSegment, IDLE};
