//! Repetition phase definitions

use colored::Color;
use serde::{Deserialize, Serialize};

/// Half-cycle of a push-up as seen by the counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Rest position, arms extended
    #[default]
    Up,
    /// Crossed the near threshold, repetition in progress
    Down,
}

impl Phase {
    /// Whether a repetition is in progress
    pub fn is_going_down(&self) -> bool {
        matches!(self, Phase::Down)
    }

    /// Terminal color for display
    pub fn color(&self) -> Color {
        match self {
            Phase::Up => Color::Green,
            Phase::Down => Color::Yellow,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Phase::Up => "▲",
            Phase::Down => "▼",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Up => "UP",
            Phase::Down => "DOWN",
        };
        write!(f, "{}", name)
    }
}
