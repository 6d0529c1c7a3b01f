//! Serde adapter for event instants.
//!
//! Writes local wall-clock ISO-8601 (`2025-01-15T09:00:00`, with a fraction
//! only when the instant has sub-second precision). Reads either
//! that form (seconds optional) or an RFC 3339 instant with an offset, which is
//! converted to local wall-clock time.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const READ_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(WRITE_FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn parse(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Local).naive_local());
    }
    READ_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| format!("invalid ISO-8601 instant: {raw:?}"))
}
