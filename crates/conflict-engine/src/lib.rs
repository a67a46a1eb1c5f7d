//! # conflict-engine
//!
//! Half-open interval conflict detection for group rehearsal schedules.
//!
//! Given a candidate schedule and the schedules already booked for a group,
//! the engine reports which existing entries overlap the candidate. Entries
//! without an end are assumed to last two hours. Back-to-back entries never
//! conflict.
//!
//! ## Modules
//!
//! - [`interval`] — Interval model, effective-end normalization, overlap test
//! - [`conflict`] — Candidate-vs-existing conflict detection
//! - [`pairwise`] — Pairwise conflicts across a group's schedules
//! - [`personal`] — Group session vs. member personal commitments
//! - [`parse`] — Lenient local timestamp parsing and serde adapters
//! - [`error`] — Error types

pub mod conflict;
pub mod error;
pub mod interval;
pub mod pairwise;
pub mod parse;
pub mod personal;

pub use conflict::{detect_conflicts, Conflict, ConflictDetector};
pub use error::ConflictError;
pub use interval::{effective_end, CandidateInterval, ScheduleInterval, DEFAULT_DURATION_HOURS};
pub use pairwise::{find_schedule_conflicts, ConflictType, GroupSchedule, ScheduleConflict};
pub use parse::{combine, parse_date, parse_local_datetime, parse_time_of_day};
pub use personal::{
    check_member_conflicts, conflicts_for_date, entries_for_member, summarize, MemberConflict,
    PersonalScheduleEntry, PersonalScheduleSummary, PersonalScheduleType,
};
