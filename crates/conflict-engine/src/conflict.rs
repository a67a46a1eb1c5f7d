//! Detect existing schedules that overlap a candidate schedule.
//!
//! One linear pass over the existing list, in input order. Each interval is
//! normalized to its effective end before the half-open overlap test, so a
//! schedule without an end behaves exactly like one ending
//! `default_duration` after its start. Adjacent schedules are NOT conflicts.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::error::{ConflictError, Result};
use crate::interval::{self, overlap_minutes, overlaps, CandidateInterval, ScheduleInterval};

/// An existing interval that overlaps the candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict<'a, I> {
    #[serde(flatten)]
    pub interval: &'a ScheduleInterval<I>,
    #[serde(serialize_with = "crate::parse::local_datetime::serialize")]
    pub effective_end: NaiveDateTime,
    pub overlap_minutes: i64,
}

/// Overlap checker configured with the duration assumed for open-ended
/// schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictDetector {
    default_duration: Duration,
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self {
            default_duration: interval::default_duration(),
        }
    }
}

impl ConflictDetector {
    /// A detector using [`DEFAULT_DURATION_HOURS`](crate::interval::DEFAULT_DURATION_HOURS).
    pub fn new() -> Self {
        Self::default()
    }

    /// A detector with a custom default duration.
    ///
    /// # Errors
    /// Returns `ConflictError::InvalidDuration` if `default_duration` is not positive.
    pub fn with_default_duration(default_duration: Duration) -> Result<Self> {
        if default_duration <= Duration::zero() {
            return Err(ConflictError::InvalidDuration(format!(
                "default duration must be positive, got {} minutes",
                default_duration.num_minutes()
            )));
        }
        Ok(Self { default_duration })
    }

    /// A detector whose default duration is `hours` hours.
    ///
    /// # Errors
    /// Returns `ConflictError::InvalidDuration` if `hours` is not positive or
    /// does not fit in a `Duration`.
    pub fn with_default_duration_hours(hours: i64) -> Result<Self> {
        let duration = Duration::try_hours(hours).ok_or_else(|| {
            ConflictError::InvalidDuration(format!("{hours} hours is out of range"))
        })?;
        Self::with_default_duration(duration)
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    pub fn effective_end(&self, start: NaiveDateTime, end: Option<NaiveDateTime>) -> NaiveDateTime {
        interval::effective_end(start, end, self.default_duration)
    }

    /// Return every interval in `existing` that overlaps `candidate`, skipping
    /// the one whose id equals `exclude_id`.
    ///
    /// The result keeps the relative order of `existing`.
    pub fn detect<'a, I: PartialEq>(
        &self,
        candidate: &CandidateInterval,
        existing: &'a [ScheduleInterval<I>],
        exclude_id: Option<&I>,
    ) -> Vec<&'a ScheduleInterval<I>> {
        self.detect_with_overlap(candidate, existing, exclude_id)
            .into_iter()
            .map(|conflict| conflict.interval)
            .collect()
    }

    /// Same as [`ConflictDetector::detect`], with each match carrying its
    /// effective end and the overlap length in minutes.
    pub fn detect_with_overlap<'a, I: PartialEq>(
        &self,
        candidate: &CandidateInterval,
        existing: &'a [ScheduleInterval<I>],
        exclude_id: Option<&I>,
    ) -> Vec<Conflict<'a, I>> {
        let candidate_end = candidate.effective_end(self.default_duration);
        let mut conflicts = Vec::new();

        for other in existing {
            if exclude_id.is_some_and(|id| *id == other.id) {
                log::trace!("skipping excluded schedule starting {}", other.start);
                continue;
            }

            let other_end = other.effective_end(self.default_duration);
            if overlaps(candidate.start, candidate_end, other.start, other_end) {
                conflicts.push(Conflict {
                    interval: other,
                    effective_end: other_end,
                    overlap_minutes: overlap_minutes(
                        candidate.start,
                        candidate_end,
                        other.start,
                        other_end,
                    ),
                });
            }
        }

        log::debug!(
            "candidate {}..{} checked against {} schedules: {} conflicts",
            candidate.start,
            candidate_end,
            existing.len(),
            conflicts.len()
        );

        conflicts
    }
}

/// Detect conflicts with a detector using the default two-hour duration.
///
/// See [`ConflictDetector::detect`].
pub fn detect_conflicts<'a, I: PartialEq>(
    candidate: &CandidateInterval,
    existing: &'a [ScheduleInterval<I>],
    exclude_id: Option<&I>,
) -> Vec<&'a ScheduleInterval<I>> {
    ConflictDetector::default().detect(candidate, existing, exclude_id)
}
