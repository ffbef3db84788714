//! repcount: push-up repetition counter
//!
//! Tracker tick → DistanceSample → RepetitionCounter → SessionController → host bridge

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{Error, Result};

// =============================================================================
// THRESHOLD PRESETS [m] - calibrated on two front-camera trackers
// =============================================================================

/// Near threshold of the wide preset (phone flat on the floor)
pub const WIDE_NEAR_THRESHOLD: f64 = 0.25;

/// Far threshold of the wide preset
pub const WIDE_FAR_THRESHOLD: f64 = 0.35;

/// Near threshold of the narrow preset (phone propped higher)
pub const NARROW_NEAR_THRESHOLD: f64 = 0.35;

/// Far threshold of the narrow preset
pub const NARROW_FAR_THRESHOLD: f64 = 0.40;

// =============================================================================
// SESSION
// =============================================================================

/// Capacity of the bridge event channel before slow subscribers lag
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Default host bridge address
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Centimeters per meter, for the sample feed
pub const CM_PER_METER: f64 = 100.0;

/// Millimeters per meter, for the sample feed
pub const MM_PER_METER: f64 = 1000.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
