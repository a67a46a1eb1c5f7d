//! Tests for member personal-schedule conflicts.

use chrono::{NaiveDate, NaiveTime, Weekday};
use conflict_engine::{
    check_member_conflicts, conflicts_for_date, entries_for_member, summarize, ConflictError,
    PersonalScheduleEntry, PersonalScheduleSummary, PersonalScheduleType,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn entry(member: &str, on: &str, start: &str, end: &str) -> PersonalScheduleEntry {
    PersonalScheduleEntry {
        id: format!("{member}-{on}-{start}"),
        member_name: member.to_string(),
        title: "Appointment".to_string(),
        kind: PersonalScheduleType::Appointment,
        date: date(on),
        start_time: time(start),
        end_time: time(end),
        recurring_day: None,
    }
}

fn weekly(member: &str, on: &str, day: Weekday, start: &str, end: &str) -> PersonalScheduleEntry {
    PersonalScheduleEntry {
        recurring_day: Some(day),
        ..entry(member, on, start, end)
    }
}

#[test]
fn overlapping_entry_reported() {
    let entries = vec![entry("Hong", "2026-03-02", "10:00", "12:00")];

    let conflicts = check_member_conflicts(&entries, date("2026-03-02"), time("11:00"), time("14:00"));

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].member_name, "Hong");
    assert_eq!(conflicts[0].conflict_date, date("2026-03-02"));
    assert_eq!(conflicts[0].overlap_minutes, 60);
}

#[test]
fn non_overlapping_entry_ignored() {
    let entries = vec![entry("Hong", "2026-03-02", "08:00", "09:00")];

    assert!(check_member_conflicts(&entries, date("2026-03-02"), time("10:00"), time("12:00")).is_empty());
}

#[test]
fn touching_entry_ignored() {
    let entries = vec![entry("Hong", "2026-03-02", "17:00", "19:00")];

    assert!(conflicts_for_date(&entries, date("2026-03-02"), None)
        .unwrap()
        .is_empty());
}

#[test]
fn other_date_ignored() {
    let entries = vec![entry("Hong", "2026-03-01", "10:00", "12:00")];

    assert!(check_member_conflicts(&entries, date("2026-03-02"), time("10:00"), time("12:00")).is_empty());
}

#[test]
fn sorted_by_overlap_descending() {
    let entries = vec![
        entry("Hong", "2026-03-02", "10:00", "11:00"),
        entry("Kim", "2026-03-02", "09:00", "14:00"),
    ];

    let conflicts = check_member_conflicts(&entries, date("2026-03-02"), time("10:30"), time("14:00"));

    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0].member_name, "Kim");
    assert_eq!(conflicts[0].overlap_minutes, 210);
    assert_eq!(conflicts[1].member_name, "Hong");
    assert_eq!(conflicts[1].overlap_minutes, 30);
}

#[test]
fn ties_keep_input_order() {
    let entries = vec![
        entry("First", "2026-03-02", "19:00", "20:00"),
        entry("Second", "2026-03-02", "21:00", "22:00"),
    ];

    let names: Vec<String> = conflicts_for_date(&entries, date("2026-03-02"), None)
        .unwrap()
        .into_iter()
        .map(|c| c.member_name)
        .collect();

    assert_eq!(names, vec!["First", "Second"]);
}

#[test]
fn weekly_entry_matches_same_weekday() {
    // 2026-03-02 and 2026-03-09 are Mondays.
    let entries = vec![weekly("Hong", "2026-03-02", Weekday::Mon, "19:00", "22:00")];

    let conflicts = check_member_conflicts(&entries, date("2026-03-09"), time("19:00"), time("22:00"));

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].member_name, "Hong");
    assert_eq!(conflicts[0].conflict_date, date("2026-03-09"));
}

#[test]
fn weekly_entry_skips_other_weekdays() {
    // 2026-03-04 is a Wednesday.
    let entries = vec![weekly("Hong", "2026-03-02", Weekday::Mon, "19:00", "22:00")];

    assert!(check_member_conflicts(&entries, date("2026-03-04"), time("19:00"), time("22:00")).is_empty());
}

#[test]
fn default_window_is_evening_practice() {
    let entries = vec![entry("Hong", "2026-03-02", "20:00", "21:00")];

    let conflicts = conflicts_for_date(&entries, date("2026-03-02"), None).unwrap();

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_minutes, 60);
}

#[test]
fn custom_window() {
    let entries = vec![entry("Hong", "2026-03-02", "14:00", "15:00")];

    let conflicts = conflicts_for_date(
        &entries,
        date("2026-03-02"),
        Some((time("14:30"), time("16:00"))),
    )
    .unwrap();

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_minutes, 30);
}

#[test]
fn reversed_window_collides_with_nothing() {
    let entries = vec![entry("Hong", "2026-03-09", "18:00", "23:00")];

    let conflicts = check_member_conflicts(&entries, date("2026-03-09"), time("22:00"), time("19:00"));

    assert!(conflicts.is_empty(), "22:00-19:00 is not a session window");
}

#[test]
fn empty_window_collides_with_nothing() {
    let entries = vec![entry("Hong", "2026-03-09", "18:00", "23:00")];

    assert!(check_member_conflicts(&entries, date("2026-03-09"), time("19:00"), time("19:00")).is_empty());
}

#[test]
fn reversed_entry_is_ignored() {
    let entries = vec![
        entry("Broken", "2026-03-09", "23:00", "18:00"),
        entry("Kim", "2026-03-09", "20:00", "21:00"),
    ];

    let conflicts = conflicts_for_date(&entries, date("2026-03-09"), None).unwrap();

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].member_name, "Kim");
    assert!(conflicts.iter().all(|c| c.overlap_minutes > 0));
}

#[test]
fn conflicts_for_date_rejects_reversed_window() {
    let entries = vec![entry("Hong", "2026-03-09", "18:00", "23:00")];

    let result = conflicts_for_date(
        &entries,
        date("2026-03-09"),
        Some((time("22:00"), time("19:00"))),
    );

    assert!(matches!(result, Err(ConflictError::InvalidWindow(_))));
}

#[test]
fn conflicts_for_date_rejects_empty_window() {
    let result = conflicts_for_date(&[], date("2026-03-09"), Some((time("19:00"), time("19:00"))));

    assert!(matches!(result, Err(ConflictError::InvalidWindow(_))));
}

#[test]
fn member_name_trimmed_in_results_and_lookup() {
    let entries = vec![
        entry("  Hong ", "2026-03-02", "19:00", "20:00"),
        entry("Hong", "2026-03-03", "19:00", "20:00"),
        entry("Kim", "2026-03-02", "19:00", "20:00"),
    ];

    let conflicts = conflicts_for_date(&entries, date("2026-03-02"), None).unwrap();
    assert_eq!(conflicts[0].member_name, "Hong");

    assert_eq!(entries_for_member(&entries, "Hong").len(), 2);
    assert_eq!(entries_for_member(&entries, "Nobody").len(), 0);
}

#[test]
fn summary_counts() {
    assert_eq!(summarize(&[]), PersonalScheduleSummary::default());

    let entries = vec![
        weekly("Hong", "2026-03-02", Weekday::Mon, "19:00", "20:00"),
        entry("Hong", "2026-03-03", "19:00", "20:00"),
        weekly("Kim ", "2026-03-04", Weekday::Wed, "19:00", "20:00"),
    ];

    assert_eq!(
        summarize(&entries),
        PersonalScheduleSummary {
            total_schedules: 3,
            members_with_schedules: 2,
            recurring_count: 2,
        }
    );
}

#[test]
fn entry_deserializes_from_json() {
    let json = r#"{
        "id": "p1",
        "member_name": "Hong",
        "title": "Part-time job",
        "type": "work",
        "date": "2026-03-02",
        "start_time": "18:00",
        "end_time": "21:30",
        "recurring_day": "Mon"
    }"#;

    let parsed: PersonalScheduleEntry = serde_json::from_str(json).unwrap();

    assert_eq!(parsed.kind, PersonalScheduleType::Work);
    assert_eq!(parsed.end_time, time("21:30"));
    assert_eq!(parsed.recurring_day, Some(Weekday::Mon));
    assert!(parsed.applies_on(date("2026-03-16")));
}
