//! Reason codes for counter decisions
//! Same R-code layout as the rest of the project's logs

use serde::{Deserialize, Serialize};

/// Why the counter did (or did not) change on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R001: Sample validity
    // =========================================================================
    /// No distance this tick (tracking lost or not ready)
    R001_SAMPLE_UNAVAILABLE,
    /// Distance negative or not finite
    R001_SAMPLE_REJECTED,

    // =========================================================================
    // R002: Phase held
    // =========================================================================
    /// Up, distance not below near threshold
    R002_HOLDING_UP,
    /// Down, distance not above far threshold
    R002_HOLDING_DOWN,

    // =========================================================================
    // R005: Transitions
    // =========================================================================
    /// Up → Down, repetition started
    R005_TRANSITION_TO_DOWN,
    /// Down → Up, repetition counted
    R005_REPETITION_COUNTED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R001_SAMPLE_UNAVAILABLE => "R001_SAMPLE_UNAVAILABLE",
            Self::R001_SAMPLE_REJECTED => "R001_SAMPLE_REJECTED",
            Self::R002_HOLDING_UP => "R002_HOLDING_UP",
            Self::R002_HOLDING_DOWN => "R002_HOLDING_DOWN",
            Self::R005_TRANSITION_TO_DOWN => "R005_TRANSITION_TO_DOWN",
            Self::R005_REPETITION_COUNTED => "R005_REPETITION_COUNTED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R001_SAMPLE_UNAVAILABLE => "No distance this tick",
            Self::R001_SAMPLE_REJECTED => "Distance out of range, ignored",
            Self::R002_HOLDING_UP => "Holding up",
            Self::R002_HOLDING_DOWN => "Holding down",
            Self::R005_TRANSITION_TO_DOWN => "Going down",
            Self::R005_REPETITION_COUNTED => "Repetition counted",
        }
    }

    /// Whether the phase changed
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            Self::R005_TRANSITION_TO_DOWN | Self::R005_REPETITION_COUNTED
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
