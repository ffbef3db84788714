//! Core types for repcount

mod state;
mod phase;
mod sample;
mod thresholds;
mod output;
mod reason;
mod event;
mod summary;

pub use state::SessionState;
pub use phase::Phase;
pub use sample::{DistanceSample, TrackerEvent, UnavailableReason};
pub use thresholds::{Thresholds, ThresholdPreset};
pub use output::TickOutput;
pub use reason::ReasonCode;
pub use event::{CountEvent, BridgeEvent};
pub use summary::SetSummary;
