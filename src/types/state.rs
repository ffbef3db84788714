//! Session lifecycle states

use serde::{Deserialize, Serialize};

/// Lifecycle of a tracking session as owned by the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// No session, no counter exists
    #[default]
    Idle,
    /// Ticks are fed to the counter
    Running,
    /// Counter kept, ticks are dropped
    Paused,
}

impl SessionState {
    /// A counter exists in this state
    pub fn is_active(&self) -> bool {
        !matches!(self, SessionState::Idle)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Idle => "IDLE",
            SessionState::Running => "RUNNING",
            SessionState::Paused => "PAUSED",
        };
        write!(f, "{}", name)
    }
}
