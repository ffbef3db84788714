//! Sample feed: one tracker tick per text line
//!
//! Grammar (case-insensitive):
//! - `0.42`, `0.42m`, `42cm`, `420mm` → tracking at that distance (meters)
//! - `lost`, `none`, `-` → face not tracked
//! - `unavailable`, `unavailable:<reason>` → tracker unavailable
//! - blank lines and `#` comments are skipped

use std::io::BufRead;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::types::{TrackerEvent, UnavailableReason};
use crate::{CM_PER_METER, MM_PER_METER};

lazy_static! {
    static ref RE_DISTANCE: Regex = Regex::new(
        r"(?i)^([+-]?(?:\d+(?:\.\d*)?|\.\d+))\s*(m|cm|mm)?$"
    ).unwrap();

    static ref RE_LOST: Regex = Regex::new(r"(?i)^(lost|none|-)$").unwrap();

    static ref RE_UNAVAILABLE: Regex = Regex::new(
        r"(?i)^unavailable(?:\s*:\s*([a-z_]+))?$"
    ).unwrap();
}

/// Parse one line, `Ok(None)` for blanks and comments
pub fn parse_sample_line(line: &str) -> Result<Option<TrackerEvent>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    if RE_LOST.is_match(trimmed) {
        return Ok(Some(TrackerEvent::Lost));
    }

    if let Some(caps) = RE_UNAVAILABLE.captures(trimmed) {
        let reason = match caps.get(1) {
            None => UnavailableReason::NotReady,
            Some(m) => UnavailableReason::from_name(&m.as_str().to_lowercase())
                .ok_or_else(|| invalid(trimmed, format!("unknown reason {:?}", m.as_str())))?,
        };
        return Ok(Some(TrackerEvent::Unavailable { reason }));
    }

    if let Some(caps) = RE_DISTANCE.captures(trimmed) {
        let value: f64 = caps[1]
            .parse()
            .map_err(|e: std::num::ParseFloatError| invalid(trimmed, e.to_string()))?;
        let unit = caps.get(2).map(|m| m.as_str().to_lowercase());
        let distance_meters = match unit.as_deref() {
            Some("cm") => value / CM_PER_METER,
            Some("mm") => value / MM_PER_METER,
            _ => value,
        };
        return Ok(Some(TrackerEvent::Tracking { distance_meters }));
    }

    Err(invalid(trimmed, "expected a distance, 'lost' or 'unavailable'".to_string()))
}

/// Parse a comma-separated list such as `0.5, 0.2, lost, 40cm`
pub fn parse_sample_list(list: &str) -> Result<Vec<TrackerEvent>> {
    let mut events = Vec::new();
    for item in list.split(',') {
        if item.trim().is_empty() {
            continue;
        }
        if let Some(event) = parse_sample_line(item)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Read every tick from a line source, failing on the first bad line
pub fn read_samples<R: BufRead>(reader: R) -> Result<Vec<TrackerEvent>> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_sample_line(&line) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            Err(Error::InvalidSample { line, message }) => {
                return Err(Error::InvalidSample {
                    line,
                    message: format!("line {}: {}", index + 1, message),
                })
            }
            Err(e) => return Err(e),
        }
    }
    Ok(events)
}

fn invalid(line: &str, message: String) -> Error {
    Error::InvalidSample {
        line: line.to_string(),
        message,
    }
}
