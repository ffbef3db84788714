//! Tracker-side inputs: tagged tracker events and the counter's sample

use serde::{Deserialize, Serialize};

/// One observation per tick, as consumed by the counter
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DistanceSample {
    /// Face-to-camera distance in meters, `None` when not tracked this tick
    pub distance_meters: Option<f64>,
}

impl DistanceSample {
    pub fn at(distance_meters: f64) -> Self {
        Self {
            distance_meters: Some(distance_meters),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            distance_meters: None,
        }
    }
}

impl From<Option<f64>> for DistanceSample {
    fn from(distance_meters: Option<f64>) -> Self {
        Self { distance_meters }
    }
}

/// Why the tracker produced no distance this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Session still warming up
    NotReady,
    /// No face in view
    NoSubject,
    /// Camera held by another process
    CameraUnavailable,
    /// Device cannot run face tracking
    DeviceIncompatible,
    /// Camera permission denied
    PermissionDenied,
}

impl UnavailableReason {
    /// Fatal reasons end the session instead of skipping a tick
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            UnavailableReason::CameraUnavailable
                | UnavailableReason::DeviceIncompatible
                | UnavailableReason::PermissionDenied
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnavailableReason::NotReady => "not_ready",
            UnavailableReason::NoSubject => "no_subject",
            UnavailableReason::CameraUnavailable => "camera_unavailable",
            UnavailableReason::DeviceIncompatible => "device_incompatible",
            UnavailableReason::PermissionDenied => "permission_denied",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "not_ready" => Some(UnavailableReason::NotReady),
            "no_subject" => Some(UnavailableReason::NoSubject),
            "camera_unavailable" => Some(UnavailableReason::CameraUnavailable),
            "device_incompatible" => Some(UnavailableReason::DeviceIncompatible),
            "permission_denied" => Some(UnavailableReason::PermissionDenied),
            _ => None,
        }
    }
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What the face tracker reports for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// Face tracked, distance measured
    Tracking { distance_meters: f64 },
    /// Face not tracked this tick
    Lost,
    /// Tracker could not produce a frame
    Unavailable { reason: UnavailableReason },
}

impl TrackerEvent {
    /// Collapse to the counter's input
    pub fn to_sample(&self) -> DistanceSample {
        match self {
            TrackerEvent::Tracking { distance_meters } => DistanceSample::at(*distance_meters),
            TrackerEvent::Lost | TrackerEvent::Unavailable { .. } => DistanceSample::unavailable(),
        }
    }

    /// Reason that must end the session, if any
    pub fn fatal_reason(&self) -> Option<UnavailableReason> {
        match self {
            TrackerEvent::Unavailable { reason } if reason.is_fatal() => Some(*reason),
            _ => None,
        }
    }
}
