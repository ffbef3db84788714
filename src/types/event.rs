//! Notifications leaving the counter and the session

use serde::{Deserialize, Serialize};

use crate::types::{Phase, SetSummary, UnavailableReason};

/// Emitted exactly once per completed down→up cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEvent {
    pub new_count: u64,
}

/// Event pushed to host subscribers (WebSocket, CLI)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum BridgeEvent {
    #[serde(rename = "onPushupCount")]
    Count { count: u64 },

    #[serde(rename = "onPhaseChange")]
    PhaseChange { phase: Phase, is_going_down: bool },

    #[serde(rename = "onSessionStarted")]
    SessionStarted { set_number: u32 },

    #[serde(rename = "onSessionStopped")]
    SessionStopped { summary: SetSummary },

    #[serde(rename = "onTrackingFault")]
    TrackingFault { reason: UnavailableReason },
}

impl BridgeEvent {
    pub fn phase_change(phase: Phase) -> Self {
        BridgeEvent::PhaseChange {
            phase,
            is_going_down: phase.is_going_down(),
        }
    }
}

impl From<CountEvent> for BridgeEvent {
    fn from(event: CountEvent) -> Self {
        BridgeEvent::Count {
            count: event.new_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_event_wire_shape() {
        let event: BridgeEvent = CountEvent { new_count: 3 }.into();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "onPushupCount");
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn test_phase_change_wire_shape() {
        let json = serde_json::to_value(BridgeEvent::phase_change(Phase::Down)).unwrap();
        assert_eq!(json["event"], "onPhaseChange");
        assert_eq!(json["phase"], "DOWN");
        assert_eq!(json["is_going_down"], true);
    }
}
