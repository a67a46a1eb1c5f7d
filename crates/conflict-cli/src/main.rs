//! `conflicts` CLI — check rehearsal schedules for time conflicts from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Which existing schedules collide with a new 19:00-21:00 session?
//! conflicts check --start 2026-03-02T19:00 --end 2026-03-02T21:00 -i schedules.json
//!
//! # Re-check schedule "s1" while editing it, with no end (2h assumed)
//! conflicts check --start 2026-03-02T19:30 --exclude s1 -i schedules.json
//!
//! # Block in scripts: exit status 2 when anything collides
//! cat schedules.json | conflicts check --start 2026-03-02T19:00 --fail-on-conflict
//!
//! # Pairwise report across a group's calendar
//! conflicts pairs -i group.json -o report.json
//!
//! # Members whose personal commitments clash with the evening practice
//! conflicts members --date 2026-03-09 -i personal.json
//! ```
//!
//! Set `RUST_LOG=debug` to see detection summaries on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use conflict_engine::{
    parse_date, parse_local_datetime, parse_time_of_day, CandidateInterval, ConflictDetector,
    GroupSchedule, PersonalScheduleEntry, ScheduleInterval,
};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::process;

/// Exit status used by `check --fail-on-conflict` when conflicts are found.
const CONFLICT_EXIT_CODE: i32 = 2;

#[derive(Parser)]
#[command(
    name = "conflicts",
    version,
    about = "Detect overlapping rehearsal schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a candidate schedule against a JSON list of existing schedules
    Check {
        /// Candidate start (e.g. 2026-03-02T19:00)
        #[arg(long)]
        start: String,
        /// Candidate end; defaults to start + default duration
        #[arg(long)]
        end: Option<String>,
        /// Id of the schedule being edited, skipped during the check
        #[arg(long)]
        exclude: Option<String>,
        /// Duration assumed for schedules without an end
        #[arg(long, default_value_t = conflict_engine::DEFAULT_DURATION_HOURS)]
        default_duration_hours: i64,
        /// Exit with status 2 when any conflict is found
        #[arg(long)]
        fail_on_conflict: bool,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report every conflicting pair in a JSON list of group schedules
    Pairs {
        /// Duration assumed for schedules without an end
        #[arg(long, default_value_t = conflict_engine::DEFAULT_DURATION_HOURS)]
        default_duration_hours: i64,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check a session date against members' personal schedules
    Members {
        /// Session date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Session start time (HH:MM); defaults to the 19:00-22:00 practice window
        #[arg(long, requires = "end")]
        start: Option<String>,
        /// Session end time (HH:MM)
        #[arg(long, requires = "start")]
        end: Option<String>,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            start,
            end,
            exclude,
            default_duration_hours,
            fail_on_conflict,
            input,
            output,
        } => {
            let detector = ConflictDetector::with_default_duration_hours(default_duration_hours)
                .context("Invalid --default-duration-hours")?;
            let candidate = CandidateInterval::new(
                parse_local_datetime(&start).context("Invalid --start")?,
                end.as_deref()
                    .map(parse_local_datetime)
                    .transpose()
                    .context("Invalid --end")?,
            );

            let json = read_input(input.as_deref())?;
            let existing: Vec<ScheduleInterval> =
                serde_json::from_str(&json).context("Failed to parse schedule list")?;

            let conflicts = detector.detect_with_overlap(&candidate, &existing, exclude.as_ref());
            log::info!(
                "{} of {} schedules conflict with the candidate",
                conflicts.len(),
                existing.len()
            );
            write_json(output.as_deref(), &conflicts)?;

            if fail_on_conflict && !conflicts.is_empty() {
                io::stdout().flush().context("Failed to flush stdout")?;
                process::exit(CONFLICT_EXIT_CODE);
            }
        }
        Commands::Pairs {
            default_duration_hours,
            input,
            output,
        } => {
            let detector = ConflictDetector::with_default_duration_hours(default_duration_hours)
                .context("Invalid --default-duration-hours")?;
            let json = read_input(input.as_deref())?;
            let schedules: Vec<GroupSchedule> =
                serde_json::from_str(&json).context("Failed to parse group schedules")?;

            let conflicts = detector.find_schedule_conflicts(&schedules);
            write_json(output.as_deref(), &conflicts)?;
        }
        Commands::Members {
            date,
            start,
            end,
            input,
            output,
        } => {
            let date = parse_date(&date).context("Invalid --date")?;
            let window = match (start, end) {
                (Some(start), Some(end)) => Some((
                    parse_time_of_day(&start).context("Invalid --start")?,
                    parse_time_of_day(&end).context("Invalid --end")?,
                )),
                _ => None,
            };

            let json = read_input(input.as_deref())?;
            let entries: Vec<PersonalScheduleEntry> =
                serde_json::from_str(&json).context("Failed to parse personal schedules")?;

            let conflicts = conflict_engine::conflicts_for_date(&entries, date, window)
                .context("Invalid --start/--end")?;
            write_json(output.as_deref(), &conflicts)?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize + ?Sized>(path: Option<&str>, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    content.push('\n');

    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
