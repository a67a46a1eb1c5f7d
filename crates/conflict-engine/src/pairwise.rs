//! Pairwise conflict report across a group's schedules.
//!
//! Every unordered pair is compared once, in input order. A pair is tagged
//! with each [`ConflictType`] that applies and reported when it overlaps in
//! time or books the same location on the same day. Sharing a day alone is
//! not reported.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::conflict::ConflictDetector;
use crate::interval::{overlap_minutes, overlaps};

/// A group schedule as shown on the group calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSchedule<I = String> {
    pub id: I,
    pub title: String,
    #[serde(with = "crate::parse::local_datetime")]
    pub starts_at: NaiveDateTime,
    #[serde(
        default,
        with = "crate::parse::option_local_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub ends_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl<I> GroupSchedule<I> {
    pub fn date(&self) -> NaiveDate {
        self.starts_at.date()
    }

    /// Location normalized for comparison; `None` when missing or blank.
    fn location_key(&self) -> Option<String> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
            .map(str::to_lowercase)
    }
}

/// Why two schedules were flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    TimeOverlap,
    SameDay,
    SameLocation,
}

/// Two schedules that collide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleConflict<'a, I> {
    pub schedule_a: &'a GroupSchedule<I>,
    pub schedule_b: &'a GroupSchedule<I>,
    /// Ordered `TimeOverlap`, `SameDay`, `SameLocation`.
    pub conflict_types: Vec<ConflictType>,
    /// Zero when the pair does not overlap in time.
    pub overlap_minutes: i64,
}

impl<I> ScheduleConflict<'_, I> {
    pub fn has(&self, kind: ConflictType) -> bool {
        self.conflict_types.contains(&kind)
    }
}

impl ConflictDetector {
    /// Compare every pair of `schedules` and return the colliding ones.
    ///
    /// Pairs come out ordered by the index of their first schedule, then their
    /// second.
    pub fn find_schedule_conflicts<'a, I>(
        &self,
        schedules: &'a [GroupSchedule<I>],
    ) -> Vec<ScheduleConflict<'a, I>> {
        let mut conflicts = Vec::new();

        for (i, a) in schedules.iter().enumerate() {
            let a_end = self.effective_end(a.starts_at, a.ends_at);
            let a_location = a.location_key();

            for b in &schedules[i + 1..] {
                let b_end = self.effective_end(b.starts_at, b.ends_at);
                let mut conflict_types = Vec::new();

                let time_overlap = overlaps(a.starts_at, a_end, b.starts_at, b_end);
                if time_overlap {
                    conflict_types.push(ConflictType::TimeOverlap);
                }

                let same_day = a.date() == b.date();
                if same_day {
                    conflict_types.push(ConflictType::SameDay);
                }

                let same_location =
                    same_day && a_location.is_some() && a_location == b.location_key();
                if same_location {
                    conflict_types.push(ConflictType::SameLocation);
                }

                if time_overlap || same_location {
                    conflicts.push(ScheduleConflict {
                        schedule_a: a,
                        schedule_b: b,
                        conflict_types,
                        overlap_minutes: if time_overlap {
                            overlap_minutes(a.starts_at, a_end, b.starts_at, b_end)
                        } else {
                            0
                        },
                    });
                }
            }
        }

        log::debug!(
            "compared {} group schedules: {} conflicting pairs",
            schedules.len(),
            conflicts.len()
        );

        conflicts
    }
}

/// Pairwise check with the default two-hour duration.
///
/// See [`ConflictDetector::find_schedule_conflicts`].
pub fn find_schedule_conflicts<I>(schedules: &[GroupSchedule<I>]) -> Vec<ScheduleConflict<'_, I>> {
    ConflictDetector::default().find_schedule_conflicts(schedules)
}
