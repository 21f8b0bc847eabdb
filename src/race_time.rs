//! Race time parsing.
//!
//! Converts the time tokens found in result sheets (`1:05.50`, `58.30`,
//! `NT`, `DQ 3:49.50`, ...) into elapsed seconds rounded to hundredths.

use crate::constants::markers::{DID_NOT_FINISH, DQ, NO_TIME};
use thiserror::Error;

/// A time token that is neither a known marker nor a number
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unparseable race time '{token}'")]
pub struct TimeParseError {
    pub token: String,
}

/// Parse a race time token into seconds.
///
/// `Ok(None)` means no time was recorded (blank, `NT`, `DNF`, bare `DQ`).
/// A `DQ` prefix is dropped so disqualified swims keep their recorded time.
pub fn parse_race_time(token: &str) -> Result<Option<f64>, TimeParseError> {
    let trimmed = token.trim();
    if trimmed.is_empty() || trimmed == NO_TIME || trimmed == DQ || trimmed == DID_NOT_FINISH {
        return Ok(None);
    }

    let normalized = if trimmed.contains(DQ) {
        let stripped = trimmed.replace(DQ, "");
        let stripped = stripped.trim();
        if stripped.is_empty() {
            return Ok(None);
        }
        stripped.to_string()
    } else {
        trimmed.to_string()
    };

    let seconds = match normalized.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes = parse_component(minutes, token)?;
            let seconds = parse_component(seconds, token)?;
            minutes * 60.0 + seconds
        }
        None => parse_component(&normalized, token)?,
    };

    Ok(Some(round_hundredths(seconds)))
}

/// Round to two decimal places
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn parse_component(component: &str, token: &str) -> Result<f64, TimeParseError> {
    component
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| TimeParseError {
            token: token.to_string(),
        })
}
