//! Ranking rules used to pick the next process from the ready set.
//!
//! # Score Convention
//! **Lower score = dispatched first.** Ties on the score are broken by
//! earlier arrival time, then by position in the input list, so the
//! outcome never depends on the order the ready set happens to be in.

use std::cmp::Ordering;

use super::PolicyKind;
use crate::models::SimProcess;

/// Score returned by a ranking rule. Lower = higher precedence.
pub type RuleScore = i64;

/// Ranking key of a ready-set policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingRule {
    /// Earliest arrival first.
    ArrivalTime,
    /// Least remaining CPU time first.
    RemainingTime,
    /// Lowest priority value first.
    PriorityValue,
}

impl RankingRule {
    /// Scores a process at the current decision point.
    pub fn evaluate(&self, process: &SimProcess<'_>) -> RuleScore {
        match self {
            RankingRule::ArrivalTime => process.arrival_time(),
            RankingRule::RemainingTime => process.remaining_time,
            RankingRule::PriorityValue => i64::from(process.process.priority),
        }
    }

    /// Total order used for selection: score, then arrival, then input index.
    pub fn compare(&self, a: &SimProcess<'_>, b: &SimProcess<'_>) -> Ordering {
        self.evaluate(a)
            .cmp(&self.evaluate(b))
            .then_with(|| a.arrival_time().cmp(&b.arrival_time()))
            .then_with(|| a.index.cmp(&b.index))
    }
}

impl PolicyKind {
    /// Ranking rule for ready-set policies; `None` for Round Robin,
    /// which rotates a FIFO queue instead of ranking.
    pub fn ranking_rule(&self) -> Option<RankingRule> {
        match self {
            PolicyKind::Fcfs => Some(RankingRule::ArrivalTime),
            PolicyKind::SjfNonPreemptive | PolicyKind::SjfPreemptive => {
                Some(RankingRule::RemainingTime)
            }
            PolicyKind::PriorityNonPreemptive | PolicyKind::PriorityPreemptive => {
                Some(RankingRule::PriorityValue)
            }
            PolicyKind::RoundRobin => None,
        }
    }
}

/// Returns the entry of `ready` (indices into `processes`) that `rule`
/// ranks first, or `None` if `ready` is empty.
pub fn select_best(rule: RankingRule, ready: &[usize], processes: &[SimProcess<'_>]) -> Option<usize> {
    ready
        .iter()
        .copied()
        .min_by(|&a, &b| rule.compare(&processes[a], &processes[b]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn sample() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 5).with_priority(1),
            Process::new("P2", 0, 2).with_priority(3),
            Process::new("P3", 1, 2).with_priority(1),
        ]
    }

    fn track(procs: &[Process]) -> Vec<SimProcess<'_>> {
        procs
            .iter()
            .enumerate()
            .map(|(i, p)| SimProcess::new(p, i))
            .collect()
    }

    #[test]
    fn test_arrival_rule() {
        let procs = sample();
        let sims = track(&procs);
        // P1 and P2 both arrive at 0 → input order decides
        assert_eq!(select_best(RankingRule::ArrivalTime, &[2, 1, 0], &sims), Some(0));
    }

    #[test]
    fn test_remaining_rule_ties_by_arrival() {
        let procs = sample();
        let sims = track(&procs);
        // P2 and P3 both have 2 remaining; P2 arrived earlier
        assert_eq!(select_best(RankingRule::RemainingTime, &[2, 1, 0], &sims), Some(1));
    }

    #[test]
    fn test_remaining_rule_tracks_progress() {
        let procs = sample();
        let mut sims = track(&procs);
        sims[0].run_for(0, 4); // P1 now has 1 remaining
        assert_eq!(select_best(RankingRule::RemainingTime, &[0, 1, 2], &sims), Some(0));
    }

    #[test]
    fn test_priority_rule() {
        let procs = sample();
        let sims = track(&procs);
        // P1 and P3 share priority 1; P1 arrived first
        assert_eq!(select_best(RankingRule::PriorityValue, &[1, 2, 0], &sims), Some(0));
        assert_eq!(select_best(RankingRule::PriorityValue, &[1, 2], &sims), Some(2));
    }

    #[test]
    fn test_empty_ready_set() {
        let procs = sample();
        let sims = track(&procs);
        assert_eq!(select_best(RankingRule::ArrivalTime, &[], &sims), None);
    }

    #[test]
    fn test_policy_rules() {
        assert_eq!(PolicyKind::Fcfs.ranking_rule(), Some(RankingRule::ArrivalTime));
        assert_eq!(
            PolicyKind::SjfPreemptive.ranking_rule(),
            Some(RankingRule::RemainingTime)
        );
        assert_eq!(
            PolicyKind::PriorityNonPreemptive.ranking_rule(),
            Some(RankingRule::PriorityValue)
        );
        assert_eq!(PolicyKind::RoundRobin.ranking_rule(), None);
    }
}
