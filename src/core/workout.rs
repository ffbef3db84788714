//! In-memory log of finished sets
//!
//! Lives as long as the process. Nothing is written to disk.

use chrono::{DateTime, Utc};

use crate::types::SetSummary;

/// Everything needed to close a set, gathered by the controller
#[derive(Debug, Clone)]
pub struct SetRecord {
    pub reps: u64,
    pub active_seconds: u64,
    pub target_reps: Option<u32>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub ticks: u64,
    pub lost_ticks: u64,
}

/// Completed sets of this process
#[derive(Debug, Default)]
pub struct WorkoutLog {
    sets: Vec<SetSummary>,
}

impl WorkoutLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the next set will get
    pub fn next_set_number(&self) -> u32 {
        self.sets.len() as u32 + 1
    }

    /// Close a set, judging goal and personal best against earlier sets
    pub fn record(&mut self, record: SetRecord) -> SetSummary {
        let previous_best = self.best_reps();
        let summary = SetSummary {
            set_number: self.next_set_number(),
            reps: record.reps,
            duration_seconds: record.active_seconds,
            target_reps: record.target_reps,
            is_goal_achieved: record
                .target_reps
                .map(|target| record.reps >= u64::from(target))
                .unwrap_or(false),
            is_personal_best: record.reps > 0 && record.reps > previous_best,
            started_at: record.started_at,
            ended_at: record.ended_at,
            ticks: record.ticks,
            lost_ticks: record.lost_ticks,
        };
        self.sets.push(summary.clone());
        summary
    }

    pub fn sets(&self) -> &[SetSummary] {
        &self.sets
    }

    pub fn total_reps(&self) -> u64 {
        self.sets.iter().map(|s| s.reps).sum()
    }

    pub fn best_reps(&self) -> u64 {
        self.sets.iter().map(|s| s.reps).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(reps: u64, target: Option<u32>) -> SetRecord {
        let now = Utc::now();
        SetRecord {
            reps,
            active_seconds: 30,
            target_reps: target,
            started_at: now,
            ended_at: now,
            ticks: 900,
            lost_ticks: 12,
        }
    }

    #[test]
    fn test_set_numbers_start_at_one() {
        let mut log = WorkoutLog::new();
        assert_eq!(log.next_set_number(), 1);
        assert_eq!(log.record(record(5, None)).set_number, 1);
        assert_eq!(log.record(record(5, None)).set_number, 2);
    }

    #[test]
    fn test_goal_achieved() {
        let mut log = WorkoutLog::new();
        assert!(log.record(record(10, Some(10))).is_goal_achieved);
        assert!(!log.record(record(9, Some(10))).is_goal_achieved);
        assert!(!log.record(record(50, None)).is_goal_achieved);
    }

    #[test]
    fn test_personal_best_strictly_greater() {
        let mut log = WorkoutLog::new();
        assert!(!log.record(record(0, None)).is_personal_best);
        assert!(log.record(record(8, None)).is_personal_best);
        assert!(!log.record(record(8, None)).is_personal_best);
        assert!(!log.record(record(3, None)).is_personal_best);
        assert!(log.record(record(12, None)).is_personal_best);
        assert_eq!(log.best_reps(), 12);
        assert_eq!(log.total_reps(), 31);
        assert_eq!(log.len(), 5);
    }
}
