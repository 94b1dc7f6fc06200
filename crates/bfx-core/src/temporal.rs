//! # Temporal Types — UTC-Only Timestamps
//!
//! `Timestamp` is a UTC instant truncated to seconds. Milestone times and
//! record audit fields all use it so that rendering is uniform
//! (`YYYY-MM-DDTHH:MM:SSZ`) regardless of how the backend formatted them.
//!
//! The backend is not consistent about offsets or fractional seconds, and
//! seeded records often carry a bare date, so deserialization is lenient:
//! any RFC 3339 string is accepted and normalized to UTC, and `YYYY-MM-DD`
//! reads as midnight UTC. [`Timestamp::parse()`] is the strict form for
//! input this crate controls.

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BfxError;

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse an RFC 3339 string, accepting only the `Z` suffix.
    ///
    /// # Errors
    ///
    /// Returns [`BfxError::Validation`] if the string is not RFC 3339 or
    /// carries an explicit offset.
    pub fn parse(s: &str) -> Result<Self, BfxError> {
        if !s.ends_with('Z') {
            return Err(BfxError::Validation(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        Self::parse_lenient(s)
    }

    /// Parse an RFC 3339 string with any offset, converting to UTC. A bare
    /// `YYYY-MM-DD` date is midnight UTC.
    pub fn parse_lenient(s: &str) -> Result<Self, BfxError> {
        let s = s.trim();
        match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc)))),
            Err(e) => {
                let midnight = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .ok_or_else(|| {
                        BfxError::Validation(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
                    })?;
                Ok(Self(Utc.from_utc_datetime(&midnight)))
            }
        }
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// Render as a calendar date (e.g., `2026-01-15`) for timeline labels.
    pub fn to_date_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_lenient(&raw).map_err(serde::de::Error::custom)
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
