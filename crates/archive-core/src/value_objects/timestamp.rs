//! Message timestamp - decimal seconds since the Unix epoch
//!
//! Export files store timestamps as strings such as `"1700000000.000200"`.
//! The fractional part disambiguates messages posted within the same second,
//! so the raw string is kept alongside the parsed value.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Datelike, Utc};

/// Earliest calendar year accepted for a message
pub const MIN_YEAR: i32 = 1970;
/// Latest calendar year accepted for a message
pub const MAX_YEAR: i32 = 2100;

/// Validated message timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    raw: String,
    seconds: f64,
}

impl Timestamp {
    /// Parse and validate a raw timestamp string
    pub fn parse(raw: &str) -> Result<Self, TimestampError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TimestampError::Missing);
        }

        let seconds: f64 = trimmed
            .parse()
            .map_err(|_| TimestampError::NotNumeric(trimmed.to_string()))?;
        if !seconds.is_finite() {
            return Err(TimestampError::NotNumeric(trimmed.to_string()));
        }
        if seconds <= 0.0 {
            return Err(TimestampError::NonPositive(trimmed.to_string()));
        }

        let datetime = to_datetime(seconds)
            .ok_or_else(|| TimestampError::OutOfRange(trimmed.to_string()))?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&datetime.year()) {
            return Err(TimestampError::OutOfRange(trimmed.to_string()));
        }

        Ok(Self {
            raw: trimmed.to_string(),
            seconds,
        })
    }

    /// The timestamp exactly as it appeared in the export
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Seconds since the Unix epoch
    #[inline]
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Convert to a UTC datetime
    pub fn to_datetime(&self) -> DateTime<Utc> {
        // Range was checked in `parse`
        to_datetime(self.seconds).unwrap_or_default()
    }

    /// Chronological comparison on the numeric value
    pub fn cmp_chronological(&self, other: &Self) -> Ordering {
        self.seconds.total_cmp(&other.seconds)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    let whole = seconds.trunc();
    if whole > i64::MAX as f64 {
        return None;
    }
    let nanos = ((seconds - whole) * 1e9) as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}

/// Reasons a timestamp fails validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("timestamp is missing")]
    Missing,

    #[error("timestamp is not a number: {0}")]
    NotNumeric(String),

    #[error("timestamp is not positive: {0}")]
    NonPositive(String),

    #[error("timestamp outside 1970-2100: {0}")]
    OutOfRange(String),
}
