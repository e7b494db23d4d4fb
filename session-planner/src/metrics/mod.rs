/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Duration and course-load metrics.
//!
//! Schedule lengths are whole minutes.  The caller's total-hours budget is
//! kept exact: counts are the ceiling of the true quotient, with a small
//! tolerance so binary float noise (1.1 h is 66.00000000000001 min) cannot
//! add a session, while any real sub-minute remainder still does.

pub mod time;

use tracing::debug;

use crate::error::ScheduleError;
use crate::schedule::{usable_entries_lenient, UsableEntry, WeeklyScheduleEntry};
use time::MINUTES_PER_HOUR;

/// Quotients within this distance above an integer count as that integer.
const CEIL_TOLERANCE: f64 = 1e-9;

/// `ceil(numerator / denominator)`, ignoring float noise just above a whole
/// number.  Saturates at `u64::MAX`.
fn ceil_ratio(numerator: f64, denominator: f64) -> u64 {
    (numerator / denominator - CEIL_TOLERANCE).ceil().max(0.0) as u64
}

/// Reject budgets that cannot be scheduled.
///
/// # Errors
/// [`ScheduleError::InvalidTotalHours`] for negative, NaN or infinite input.
pub fn check_total_hours(total_hours: f64) -> Result<f64, ScheduleError> {
    if !total_hours.is_finite() || total_hours < 0.0 {
        return Err(ScheduleError::InvalidTotalHours(total_hours));
    }
    Ok(total_hours)
}

/// Sessions of `session_minutes` needed to cover `total_hours`:
/// `ceil(total_hours * 60 / session_minutes)`.
///
/// # Errors
/// * [`ScheduleError::InvalidDuration`] – `session_minutes` is zero.
/// * [`ScheduleError::InvalidTotalHours`] – negative or non-finite budget.
pub fn session_count(total_hours: f64, session_minutes: u32) -> Result<u64, ScheduleError> {
    if session_minutes == 0 {
        return Err(ScheduleError::InvalidDuration { session_minutes });
    }
    let total_hours = check_total_hours(total_hours)?;
    Ok(ceil_ratio(
        total_hours * f64::from(MINUTES_PER_HOUR),
        f64::from(session_minutes),
    ))
}

/// Sum of the entries' session lengths, in minutes.
pub fn weekly_minutes(entries: &[UsableEntry]) -> u64 {
    entries
        .iter()
        .map(|e| u64::from(e.duration_minutes()))
        .sum()
}

/// Sum of the entries' session lengths, in hours.
pub fn weekly_hours(entries: &[UsableEntry]) -> f64 {
    weekly_minutes(entries) as f64 / f64::from(MINUTES_PER_HOUR)
}

/// Render a minute count using the coarsest unit that represents it exactly.
///
/// | minutes | output |
/// |---|---|
/// | 0 | `0 min` |
/// | 45 | `45 min` |
/// | 60 | `1 hour` |
/// | 90 | `1h 30m` |
/// | 120 | `2 hours` |
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / MINUTES_PER_HOUR;
    let rest = minutes % MINUTES_PER_HOUR;

    match (hours, rest) {
        (0, m) => format!("{m} min"),
        (1, 0) => "1 hour".to_string(),
        (h, 0) => format!("{h} hours"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Number of weeks needed to cover `total_hours` with `schedule`'s weekly
/// load: `ceil(total / weekly)`.
///
/// Only usable entries count towards the weekly load; malformed entries are
/// ignored rather than reported (use the validator for that).  Returns `0`
/// when nothing usable remains, when the budget is invalid, or when it is
/// zero.
pub fn course_duration_weeks(total_hours: f64, schedule: &[WeeklyScheduleEntry]) -> u64 {
    let entries = usable_entries_lenient(schedule);
    let weekly = weekly_minutes(&entries);

    if weekly == 0 {
        debug!("course_duration_weeks: no usable weekly load");
        return 0;
    }

    match check_total_hours(total_hours) {
        Ok(total) => ceil_ratio(total * f64::from(MINUTES_PER_HOUR), weekly as f64),
        Err(e) => {
            debug!(error = %e, "course_duration_weeks: invalid budget");
            0
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
