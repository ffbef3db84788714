//! Hysteresis band for the repetition counter

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{NARROW_FAR_THRESHOLD, NARROW_NEAR_THRESHOLD, WIDE_FAR_THRESHOLD, WIDE_NEAR_THRESHOLD};

/// Near/far distance thresholds in meters, `0 <= near < far`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    near: f64,
    far: f64,
}

impl Thresholds {
    /// Validate and build a band
    pub fn new(near: f64, far: f64) -> Result<Self> {
        let valid = near.is_finite() && far.is_finite() && near >= 0.0 && near < far;
        if !valid {
            return Err(Error::InvalidThresholds { near, far });
        }
        Ok(Self { near, far })
    }

    /// Below this a repetition starts
    pub fn near(&self) -> f64 {
        self.near
    }

    /// Above this a repetition completes
    pub fn far(&self) -> f64 {
        self.far
    }
}

impl<'de> Deserialize<'de> for Thresholds {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            near: f64,
            far: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Thresholds::new(raw.near, raw.far).map_err(serde::de::Error::custom)
    }
}

/// Calibrated bands shipped with the original trackers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdPreset {
    /// 0.25 m / 0.35 m
    Wide,
    /// 0.35 m / 0.40 m
    Narrow,
}

impl ThresholdPreset {
    pub fn thresholds(&self) -> Thresholds {
        let (near, far) = match self {
            ThresholdPreset::Wide => (WIDE_NEAR_THRESHOLD, WIDE_FAR_THRESHOLD),
            ThresholdPreset::Narrow => (NARROW_NEAR_THRESHOLD, NARROW_FAR_THRESHOLD),
        };
        Self::band(near, far)
    }

    // Preset constants satisfy the band invariant.
    fn band(near: f64, far: f64) -> Thresholds {
        Thresholds { near, far }
    }
}
