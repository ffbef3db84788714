//! Completed set records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One finished session, kept in memory for the process lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSummary {
    /// 1-based set number within this process
    pub set_number: u32,
    /// Repetitions counted
    pub reps: u64,
    /// Active time, paused time excluded
    pub duration_seconds: u64,
    pub target_reps: Option<u32>,
    pub is_goal_achieved: bool,
    pub is_personal_best: bool,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Ticks processed while running
    pub ticks: u64,
    /// Ticks with no distance
    pub lost_ticks: u64,
}

impl SetSummary {
    /// Share of ticks without a distance, 0.0 when no ticks
    pub fn lost_ratio(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.lost_ticks as f64 / self.ticks as f64
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let target = self
            .target_reps
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "set={} | reps={} | target={} | duration={}s | goal={} | best={} | lost={}/{}",
            self.set_number,
            self.reps,
            target,
            self.duration_seconds,
            self.is_goal_achieved,
            self.is_personal_best,
            self.lost_ticks,
            self.ticks,
        )
    }
}
