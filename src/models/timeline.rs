//! Timeline (solution) model.
//!
//! A timeline is the ordered record of who occupied the CPU and when.
//! Idle periods are explicit segments, not gaps, so the segments always
//! tile `[0, makespan)` without holes or overlaps.

use serde::{Deserialize, Serialize};

/// Name carried by idle segments.
pub const IDLE: &str = "Idle";

/// A half-open interval `[start, end)` of CPU occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    /// Occupying process, or [`IDLE`].
    pub process_name: String,
    /// Start tick (inclusive).
    pub start: i64,
    /// End tick (exclusive).
    pub end: i64,
}

impl TimelineSegment {
    /// Creates a segment.
    pub fn new(process_name: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            process_name: process_name.into(),
            start,
            end,
        }
    }

    /// Creates an idle segment.
    pub fn idle(start: i64, end: i64) -> Self {
        Self::new(IDLE, start, end)
    }

    /// Length in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether no process occupies the CPU during this segment.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.process_name == IDLE
    }
}

/// Ordered sequence of CPU-occupancy segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    segments: Vec<TimelineSegment>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `process_name` ran over `[start, end)`.
    ///
    /// Extends the last segment instead when it belongs to the same process
    /// and ends exactly at `start`. Empty intervals are ignored.
    pub fn push_run(&mut self, process_name: &str, start: i64, end: i64) {
        if end <= start {
            return;
        }
        if let Some(last) = self.segments.last_mut() {
            if !last.is_idle() && last.process_name == process_name && last.end == start {
                last.end = end;
                return;
            }
        }
        self.segments
            .push(TimelineSegment::new(process_name, start, end));
    }

    /// Records an idle interval `[start, end)`.
    pub fn push_idle(&mut self, start: i64, end: i64) {
        if end <= start {
            return;
        }
        if let Some(last) = self.segments.last_mut() {
            if last.is_idle() && last.end == start {
                last.end = end;
                return;
            }
        }
        self.segments.push(TimelineSegment::idle(start, end));
    }

    /// All segments in time order.
    pub fn segments(&self) -> &[TimelineSegment] {
        &self.segments
    }

    /// Iterates over segments in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimelineSegment> {
        self.segments.iter()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Tick at which the last segment ends (0 if empty).
    pub fn makespan(&self) -> i64 {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Total ticks during which some process ran.
    pub fn busy_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| !s.is_idle())
            .map(TimelineSegment::duration)
            .sum()
    }

    /// Total idle ticks.
    pub fn idle_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.is_idle())
            .map(TimelineSegment::duration)
            .sum()
    }

    /// Total ticks attributed to a single process.
    pub fn time_for(&self, process_name: &str) -> i64 {
        self.segments_for(process_name)
            .iter()
            .map(|s| s.duration())
            .sum()
    }

    /// All segments occupied by a given process.
    pub fn segments_for(&self, process_name: &str) -> Vec<&TimelineSegment> {
        self.segments
            .iter()
            .filter(|s| s.process_name == process_name)
            .collect()
    }

    /// CPU utilization: busy time / makespan.
    ///
    /// Returns `None` for an empty timeline.
    pub fn utilization(&self) -> Option<f64> {
        let horizon = self.makespan();
        if horizon <= 0 {
            return None;
        }
        Some(self.busy_time() as f64 / horizon as f64)
    }

    /// Whether segments start at 0, are non-empty, and abut one another.
    pub fn is_contiguous(&self) -> bool {
        let mut cursor = 0;
        for seg in &self.segments {
            if seg.start != cursor || seg.end <= seg.start {
                return false;
            }
            cursor = seg.end;
        }
        true
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineSegment;
    type IntoIter = std::slice::Iter<'a, TimelineSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        let mut t = Timeline::new();
        t.push_idle(0, 2);
        t.push_run("P1", 2, 5);
        t.push_run("P2", 5, 6);
        t.push_run("P1", 6, 8);
        t
    }

    #[test]
    fn test_timeline_makespan() {
        assert_eq!(sample_timeline().makespan(), 8);
        assert_eq!(Timeline::new().makespan(), 0);
    }

    #[test]
    fn test_push_run_coalesces() {
        let mut t = Timeline::new();
        t.push_run("P1", 0, 1);
        t.push_run("P1", 1, 2);
        t.push_run("P1", 2, 4);
        assert_eq!(t.len(), 1);
        assert_eq!(t.segments()[0], TimelineSegment::new("P1", 0, 4));
    }

    #[test]
    fn test_push_run_splits_on_change() {
        let t = sample_timeline();
        assert_eq!(t.len(), 4);
        assert_eq!(t.segments()[3], TimelineSegment::new("P1", 6, 8));
    }

    #[test]
    fn test_push_ignores_empty_interval() {
        let mut t = Timeline::new();
        t.push_run("P1", 3, 3);
        t.push_idle(4, 4);
        assert!(t.is_empty());
    }

    #[test]
    fn test_busy_and_idle_time() {
        let t = sample_timeline();
        assert_eq!(t.busy_time(), 6);
        assert_eq!(t.idle_time(), 2);
        assert_eq!(t.time_for("P1"), 5);
        assert_eq!(t.time_for("P2"), 1);
        assert_eq!(t.segments_for("P1").len(), 2);
    }

    #[test]
    fn test_utilization() {
        let t = sample_timeline();
        assert!((t.utilization().unwrap() - 0.75).abs() < 1e-10);
        assert!(Timeline::new().utilization().is_none());
    }

    #[test]
    fn test_is_contiguous() {
        assert!(sample_timeline().is_contiguous());

        let mut gap = Timeline::new();
        gap.push_run("P1", 0, 2);
        gap.push_run("P2", 3, 4);
        assert!(!gap.is_contiguous());
    }

    #[test]
    fn test_serialize_as_array() {
        let mut t = Timeline::new();
        t.push_run("P1", 0, 2);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"[{"process_name":"P1","start":0,"end":2}]"#);
    }
}
