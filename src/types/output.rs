//! Per-tick output for terminal and bridge display

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{Phase, ReasonCode};

/// Result of feeding one tick through the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    pub timestamp: DateTime<Utc>,
    /// Distance in meters, absent when not tracked
    pub distance: Option<f64>,
    pub phase: Phase,
    pub count: u64,
    pub reason: ReasonCode,
    /// A repetition completed on this tick
    pub counted: bool,
}

impl TickOutput {
    pub fn new(distance: Option<f64>, phase: Phase, count: u64, reason: ReasonCode) -> Self {
        Self {
            timestamp: Utc::now(),
            distance,
            phase,
            count,
            reason,
            counted: reason == ReasonCode::R005_REPETITION_COUNTED,
        }
    }

    fn distance_str(&self) -> String {
        match self.distance {
            Some(d) => format!("{:.3}m", d),
            None => "--".to_string(),
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = format!(
            "{} d={} | phase={} | count={} | {}",
            self.phase.arrow(),
            self.distance_str(),
            self.phase,
            self.count,
            self.reason.code()
        );
        if self.counted {
            line.color(self.phase.color()).bold().to_string()
        } else {
            line.color(self.phase.color()).to_string()
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "d={} | phase={} | count={} | reason={}",
            self.distance_str(),
            self.phase,
            self.count,
            self.reason.code()
        )
    }
}
