/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Recurrence pattern validation.
//!
//! [`validate`] never fails: every problem it finds is returned as a
//! [`ValidationError`] record so a caller can show them all at once and decide
//! whether to block generation.
//!
//! Two classes of problem are reported:
//!
//! 1. **Per-entry** – missing day / start / end, an unknown day name, a
//!    malformed time, or an end time that is not after the start time.
//!    Reported in input order, positions are 1-based.
//! 2. **Same-day overlap** – two entries on the same weekday whose half-open
//!    ranges `[start, end)` intersect.  Touching ranges (`09:00–10:00` and
//!    `10:00–11:00`) do not overlap.
//!
//! An empty schedule is valid at this layer; the generator rejects it
//! separately.

use std::fmt;

use chrono::Weekday;
use serde::Serialize;
use tracing::debug;

use crate::metrics::time::time_to_minutes;
use crate::schedule::{parse_weekday, weekday_name, WeeklyScheduleEntry};

// ── ValidationError ───────────────────────────────────────────────────────────

/// One structural problem in a weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    MissingDay { position: usize },
    MissingStartTime { position: usize },
    MissingEndTime { position: usize },

    /// The day field is present but names no weekday.
    UnknownDay { position: usize, value: String },

    /// A time field is present but is not `HH:MM`.
    InvalidTime { position: usize, value: String },

    /// Both times parse but `end <= start`.
    EndNotAfterStart { position: usize },

    /// Entries `first < second` share `day` and their ranges intersect.
    Overlap {
        first: usize,
        second: usize,
        day: Weekday,
    },
}

impl ValidationError {
    /// The (first) entry position this error refers to.
    pub fn position(&self) -> usize {
        match self {
            ValidationError::MissingDay { position }
            | ValidationError::MissingStartTime { position }
            | ValidationError::MissingEndTime { position }
            | ValidationError::UnknownDay { position, .. }
            | ValidationError::InvalidTime { position, .. }
            | ValidationError::EndNotAfterStart { position } => *position,
            ValidationError::Overlap { first, .. } => *first,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ValidationError::Overlap { .. })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingDay { position } => {
                write!(f, "entry {position}: day is required")
            }
            ValidationError::MissingStartTime { position } => {
                write!(f, "entry {position}: start time is required")
            }
            ValidationError::MissingEndTime { position } => {
                write!(f, "entry {position}: end time is required")
            }
            ValidationError::UnknownDay { position, value } => {
                write!(f, "entry {position}: '{value}' is not a day of the week")
            }
            ValidationError::InvalidTime { position, value } => {
                write!(f, "entry {position}: '{value}' is not a valid HH:MM time")
            }
            ValidationError::EndNotAfterStart { position } => {
                write!(f, "entry {position}: end time must be after start time")
            }
            ValidationError::Overlap { first, second, day } => write!(
                f,
                "entries {first} and {second} overlap on {}",
                weekday_name(*day)
            ),
        }
    }
}

// ── validate ──────────────────────────────────────────────────────────────────

/// A fully valid entry's range, kept for the pairwise overlap pass.
struct TimedRange {
    position: usize,
    day: Weekday,
    start: u32,
    end: u32,
}

impl TimedRange {
    fn overlaps(&self, other: &TimedRange) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

/// Check `schedule` for missing fields, inverted ranges and same-day
/// overlaps.  Returns an empty vector when the schedule is fully valid.
pub fn validate(schedule: &[WeeklyScheduleEntry]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut ranges = Vec::with_capacity(schedule.len());

    for (idx, entry) in schedule.iter().enumerate() {
        let position = idx + 1;

        let day = match entry.day() {
            None => {
                errors.push(ValidationError::MissingDay { position });
                None
            }
            Some(name) => {
                let day = parse_weekday(name);
                if day.is_none() {
                    errors.push(ValidationError::UnknownDay {
                        position,
                        value: name.to_string(),
                    });
                }
                day
            }
        };

        let start = match entry.start_time() {
            None => {
                errors.push(ValidationError::MissingStartTime { position });
                None
            }
            Some(t) => parse_time(t, position, &mut errors),
        };

        let end = match entry.end_time() {
            None => {
                errors.push(ValidationError::MissingEndTime { position });
                None
            }
            Some(t) => parse_time(t, position, &mut errors),
        };

        let (Some(start), Some(end)) = (start, end) else {
            continue;
        };

        if end <= start {
            errors.push(ValidationError::EndNotAfterStart { position });
            continue;
        }

        if let Some(day) = day {
            ranges.push(TimedRange {
                position,
                day,
                start,
                end,
            });
        }
    }

    for (i, a) in ranges.iter().enumerate() {
        for b in &ranges[i + 1..] {
            if a.overlaps(b) {
                errors.push(ValidationError::Overlap {
                    first: a.position,
                    second: b.position,
                    day: a.day,
                });
            }
        }
    }

    debug!(
        entries = schedule.len(),
        errors = errors.len(),
        "validated weekly schedule"
    );

    errors
}

fn parse_time(value: &str, position: usize, errors: &mut Vec<ValidationError>) -> Option<u32> {
    match time_to_minutes(value) {
        Ok(minutes) => Some(minutes),
        Err(_) => {
            errors.push(ValidationError::InvalidTime {
                position,
                value: value.to_string(),
            });
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
