//! Error types for the session and bridge layers.
//!
//! The repetition counter itself is total and never returns these.

use thiserror::Error;

use crate::types::{SessionState, UnavailableReason};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid thresholds: near={near} must be finite, >= 0 and below far={far}")]
    InvalidThresholds { near: f64, far: f64 },

    #[error("Pushup session not started")]
    NoSession,

    #[error("Pushup session already active")]
    SessionAlreadyActive,

    #[error("Cannot {action} a session that is {from}")]
    InvalidTransition { from: SessionState, action: &'static str },

    #[error("Tracking unavailable: {reason}")]
    TrackingUnavailable { reason: UnavailableReason },

    #[error("Invalid sample {line:?}: {message}")]
    InvalidSample { line: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable wire code, as reported to the host UI
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidThresholds { .. } => "INVALID_THRESHOLDS",
            Error::NoSession => "NO_SESSION",
            Error::SessionAlreadyActive => "SESSION_ACTIVE",
            Error::InvalidTransition { .. } => "INVALID_TRANSITION",
            Error::TrackingUnavailable { .. } => "TRACKING_UNAVAILABLE",
            Error::InvalidSample { .. } => "INVALID_SAMPLE",
            Error::Config(_) => "CONFIG",
            Error::Io(_) => "IO",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
