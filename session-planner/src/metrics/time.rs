/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pure time-of-day arithmetic: `"HH:MM"` ⇄ minutes since midnight.
//!
//! These are free functions rather than methods so they can be used and tested
//! independently of the schedule types.

use crate::error::ScheduleError;

pub const MINUTES_PER_HOUR: u32 = 60;

/// Minutes in one civil day; every valid time-of-day is below this.
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Parse `"HH:MM"` into minutes since midnight.
///
/// Exactly two colon-separated fields of one or two ASCII digits each are
/// accepted (`"9:05"` and `"09:05"` are equivalent).  Signs, whitespace,
/// seconds and out-of-range values (hour ≥ 24, minute ≥ 60) are rejected with
/// [`ScheduleError::InvalidTimeFormat`].
pub fn time_to_minutes(time: &str) -> Result<u32, ScheduleError> {
    let invalid = || ScheduleError::InvalidTimeFormat(time.to_string());

    let mut fields = time.split(':');
    let (Some(hour), Some(minute), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(invalid());
    };

    let hour = parse_field(hour).ok_or_else(invalid)?;
    let minute = parse_field(minute).ok_or_else(invalid)?;

    if hour >= 24 || minute >= MINUTES_PER_HOUR {
        return Err(invalid());
    }

    Ok(hour * MINUTES_PER_HOUR + minute)
}

fn parse_field(field: &str) -> Option<u32> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Render minutes since midnight as zero-padded `"HH:MM"`.
///
/// Values of a full day or more are rendered as-is (`1440` → `"24:00"`), which
/// the slot generator relies on never producing.
pub fn minutes_to_time(minutes: u32) -> String {
    format!(
        "{:02}:{:02}",
        minutes / MINUTES_PER_HOUR,
        minutes % MINUTES_PER_HOUR
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
