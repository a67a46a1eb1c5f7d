//! Lenient parsing of the local timestamps, dates and times of day that
//! schedule forms produce.
//!
//! Schedules are stored as timezone-naive local wall-clock values. Inputs
//! may or may not carry seconds, and some callers send full RFC 3339 strings
//! with an offset; in that case the offset is dropped and the wall-clock
//! part is kept.
//!
//! The `local_datetime`, `option_local_datetime` and `time_of_day` modules
//! are `#[serde(with = ...)]` adapters built on the same parsers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ConflictError, Result};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Output format for serialized timestamps.
pub const DATETIME_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Output format for serialized times of day.
pub const TIME_OUTPUT_FORMAT: &str = "%H:%M";

/// Parse a local datetime such as `2026-03-01T10:00`, `2026-03-01 10:00:00`
/// or `2026-03-01T10:00:00+09:00`.
///
/// # Errors
/// Returns `ConflictError::InvalidDateTime` if no accepted format matches.
pub fn parse_local_datetime(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_local())
        .map_err(|_| ConflictError::InvalidDateTime(input.to_string()))
}

/// Parse a time of day in `HH:MM` or `HH:MM:SS` form.
///
/// # Errors
/// Returns `ConflictError::InvalidTime` if the input is not a valid time.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime> {
    let trimmed = input.trim();

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ConflictError::InvalidTime(input.to_string()))
}

/// Parse a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
/// Returns `ConflictError::InvalidDate` if the input is not a valid date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| ConflictError::InvalidDate(input.to_string()))
}

/// Join a form's date field and time field into one local timestamp.
pub fn combine(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

pub mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(super::DATETIME_OUTPUT_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_local_datetime(&raw).map_err(serde::de::Error::custom)
    }
}

pub mod option_local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.collect_str(&dt.format(super::DATETIME_OUTPUT_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            // Forms submit an empty string when the end field is left blank.
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse_local_datetime(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(super::TIME_OUTPUT_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw).map_err(serde::de::Error::custom)
    }
}
