//! Layered configuration: defaults → file → environment → CLI flags.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::types::Thresholds;
use crate::{DEFAULT_ADDR, DEFAULT_EVENT_CAPACITY, WIDE_FAR_THRESHOLD, WIDE_NEAR_THRESHOLD};

/// Environment prefix, e.g. `REPCOUNT__THRESHOLDS__NEAR=0.3`
pub const ENV_PREFIX: &str = "REPCOUNT";

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hysteresis band
    pub thresholds: ThresholdConfig,

    /// Host bridge server
    pub server: ServerConfig,

    /// Session defaults
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Meters; below this a repetition starts
    pub near: f64,

    /// Meters; above this a repetition completes
    pub far: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub addr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Repetitions per set, used to judge the goal
    pub target_reps: Option<u32>,

    /// Bridge event channel capacity
    pub event_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig {
                near: WIDE_NEAR_THRESHOLD,
                far: WIDE_FAR_THRESHOLD,
            },
            server: ServerConfig {
                addr: DEFAULT_ADDR.to_string(),
            },
            session: SessionConfig {
                target_reps: None,
                event_capacity: DEFAULT_EVENT_CAPACITY,
            },
        }
    }
}

impl AppConfig {
    /// Load defaults, then an optional file, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validated band
    pub fn thresholds(&self) -> Result<Thresholds> {
        Thresholds::new(self.thresholds.near, self.thresholds.far)
    }
}
