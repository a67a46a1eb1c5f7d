//! Half-open schedule intervals and effective-end normalization.
//!
//! A schedule occupies `[start, end)`. Entries saved without an end are
//! assumed to last [`DEFAULT_DURATION_HOURS`], the typical length of a
//! practice session.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Assumed length of a schedule entry that has no explicit end.
pub const DEFAULT_DURATION_HOURS: i64 = 2;

/// [`DEFAULT_DURATION_HOURS`] as a `Duration`.
pub fn default_duration() -> Duration {
    Duration::hours(DEFAULT_DURATION_HOURS)
}

/// Resolve the end instant used for overlap testing.
///
/// Returns `end` when present, otherwise `start + default_duration`. Saturates
/// at the representable datetime range instead of overflowing.
pub fn effective_end(
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    default_duration: Duration,
) -> NaiveDateTime {
    end.unwrap_or_else(|| {
        start
            .checked_add_signed(default_duration)
            .unwrap_or(if default_duration < Duration::zero() {
                NaiveDateTime::MIN
            } else {
                NaiveDateTime::MAX
            })
    })
}

/// Half-open intersection test: `[a_start, a_end)` and `[b_start, b_end)`
/// overlap iff `a_start < b_end && b_start < a_end`.
///
/// Touching ranges (one ends exactly when the other starts) do not overlap.
/// Inverted ranges are not rejected; they go through the same comparison.
pub fn overlaps<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && b_start < a_end
}

/// Length of the shared part of two overlapping ranges, in whole minutes.
///
/// Clamped at zero so that inverted inputs never report a negative overlap.
pub fn overlap_minutes(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> i64 {
    let shared_start = a_start.max(b_start);
    let shared_end = a_end.min(b_end);
    (shared_end - shared_start).num_minutes().max(0)
}

/// An existing schedule occurrence, identified within its collection by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleInterval<I = String> {
    pub id: I,
    #[serde(with = "crate::parse::local_datetime")]
    pub start: NaiveDateTime,
    #[serde(default, with = "crate::parse::option_local_datetime")]
    pub end: Option<NaiveDateTime>,
}

impl<I> ScheduleInterval<I> {
    pub fn new(id: I, start: NaiveDateTime, end: Option<NaiveDateTime>) -> Self {
        Self { id, start, end }
    }

    pub fn effective_end(&self, default_duration: Duration) -> NaiveDateTime {
        effective_end(self.start, self.end, default_duration)
    }
}

/// The interval being checked: a new schedule, or the edited form of an
/// existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateInterval {
    #[serde(with = "crate::parse::local_datetime")]
    pub start: NaiveDateTime,
    #[serde(default, with = "crate::parse::option_local_datetime")]
    pub end: Option<NaiveDateTime>,
}

impl CandidateInterval {
    pub fn new(start: NaiveDateTime, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    /// A candidate with no explicit end.
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self { start, end: None }
    }

    pub fn effective_end(&self, default_duration: Duration) -> NaiveDateTime {
        effective_end(self.start, self.end, default_duration)
    }
}
