//! Member personal-schedule conflicts.
//!
//! Members record personal commitments (work, school, appointments...) that
//! either fall on a single date or repeat weekly on one weekday. Before a
//! group session is booked, its time window on a given date is checked
//! against those commitments.
//!
//! Times are wall-clock times within one day and use the same half-open rule
//! as [`crate::conflict`]: a commitment ending at 19:00 does not collide with
//! a session starting at 19:00.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ConflictError, Result};
use crate::interval::overlaps;

/// Start of the usual group practice window.
pub const PRACTICE_WINDOW_START: NaiveTime = match NaiveTime::from_hms_opt(19, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};

/// End of the usual group practice window.
pub const PRACTICE_WINDOW_END: NaiveTime = match NaiveTime::from_hms_opt(22, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalScheduleType {
    Work,
    School,
    Appointment,
    Travel,
    Family,
    #[default]
    Other,
}

/// One personal commitment of a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalScheduleEntry {
    pub id: String,
    pub member_name: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: PersonalScheduleType,
    pub date: NaiveDate,
    #[serde(with = "crate::parse::time_of_day")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::parse::time_of_day")]
    pub end_time: NaiveTime,
    /// Weekday the entry repeats on. `None` for one-off entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_day: Option<Weekday>,
}

impl PersonalScheduleEntry {
    pub fn is_recurring(&self) -> bool {
        self.recurring_day.is_some()
    }

    /// Whether the entry is in effect on `date`.
    ///
    /// Weekly entries match on weekday alone, regardless of their anchor date.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        match self.recurring_day {
            Some(day) => date.weekday() == day,
            None => self.date == date,
        }
    }
}

/// A member commitment colliding with a group session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberConflict<'a> {
    pub member_name: String,
    pub entry: &'a PersonalScheduleEntry,
    pub conflict_date: NaiveDate,
    pub overlap_minutes: i64,
}

/// Aggregate counts over a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PersonalScheduleSummary {
    pub total_schedules: usize,
    pub members_with_schedules: usize,
    pub recurring_count: usize,
}

/// Find entries that collide with a session on `date` from `start` to `end`.
///
/// Sorted by overlap length, longest first; equal overlaps keep input order.
/// An empty or reversed session window collides with nothing, and entries
/// whose own end is not after their start are ignored.
pub fn check_member_conflicts(
    entries: &[PersonalScheduleEntry],
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> Vec<MemberConflict<'_>> {
    if start >= end {
        log::debug!("session window {}..{} is empty, nothing to check", start, end);
        return Vec::new();
    }

    let mut conflicts: Vec<MemberConflict<'_>> = entries
        .iter()
        .filter(|entry| entry.start_time < entry.end_time)
        .filter(|entry| entry.applies_on(date))
        .filter(|entry| overlaps(start, end, entry.start_time, entry.end_time))
        .map(|entry| {
            let shared_start = start.max(entry.start_time);
            let shared_end = end.min(entry.end_time);
            MemberConflict {
                member_name: entry.member_name.trim().to_string(),
                entry,
                conflict_date: date,
                overlap_minutes: (shared_end - shared_start).num_minutes().max(0),
            }
        })
        .collect();

    // Stable sort keeps input order among ties.
    conflicts.sort_by(|a, b| b.overlap_minutes.cmp(&a.overlap_minutes));

    log::debug!(
        "session on {} {}..{}: {} member conflicts",
        date,
        start,
        end,
        conflicts.len()
    );

    conflicts
}

/// Check `date` against `window`, or the 19:00–22:00 practice window when
/// `window` is `None`.
///
/// # Errors
/// Returns `ConflictError::InvalidWindow` if the window does not end after it starts.
pub fn conflicts_for_date(
    entries: &[PersonalScheduleEntry],
    date: NaiveDate,
    window: Option<(NaiveTime, NaiveTime)>,
) -> Result<Vec<MemberConflict<'_>>> {
    let (start, end) = window.unwrap_or((PRACTICE_WINDOW_START, PRACTICE_WINDOW_END));
    if start >= end {
        return Err(ConflictError::InvalidWindow(format!(
            "end {} must be after start {}",
            end.format("%H:%M"),
            start.format("%H:%M")
        )));
    }
    Ok(check_member_conflicts(entries, date, start, end))
}

/// Entries belonging to `member_name`, compared after trimming.
pub fn entries_for_member<'a>(
    entries: &'a [PersonalScheduleEntry],
    member_name: &str,
) -> Vec<&'a PersonalScheduleEntry> {
    let wanted = member_name.trim();
    entries
        .iter()
        .filter(|entry| entry.member_name.trim() == wanted)
        .collect()
}

pub fn summarize(entries: &[PersonalScheduleEntry]) -> PersonalScheduleSummary {
    let members: BTreeSet<&str> = entries
        .iter()
        .map(|entry| entry.member_name.trim())
        .collect();

    PersonalScheduleSummary {
        total_schedules: entries.len(),
        members_with_schedules: members.len(),
        recurring_count: entries.iter().filter(|e| e.is_recurring()).count(),
    }
}
