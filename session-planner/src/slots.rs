/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Candidate time-of-day slots for pickers.

use serde::Deserialize;

use crate::error::ScheduleError;
use crate::metrics::time::{minutes_to_time, MINUTES_PER_HOUR};

pub const DEFAULT_SLOT_START_HOUR: u32 = 8;
pub const DEFAULT_SLOT_END_HOUR: u32 = 22;
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 30;

/// Parameters of a slot enumeration.  Defaults to 08:00–22:00 every 30
/// minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimeSlotConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    pub interval_minutes: u32,
}

impl Default for TimeSlotConfig {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_SLOT_START_HOUR,
            end_hour: DEFAULT_SLOT_END_HOUR,
            interval_minutes: DEFAULT_SLOT_INTERVAL_MINUTES,
        }
    }
}

impl TimeSlotConfig {
    pub fn generate(&self) -> Result<Vec<String>, ScheduleError> {
        generate_time_slots(self.start_hour, self.end_hour, self.interval_minutes)
    }
}

/// Enumerate `"HH:MM"` slots from `start_hour:00` up to, but excluding,
/// `end_hour:00`, every `interval_minutes`.
///
/// `start_hour >= end_hour` yields an empty list.
///
/// # Errors
/// [`ScheduleError::InvalidSlotParameters`] when `interval_minutes` is zero or
/// `end_hour` is past 24.
pub fn generate_time_slots(
    start_hour: u32,
    end_hour: u32,
    interval_minutes: u32,
) -> Result<Vec<String>, ScheduleError> {
    if interval_minutes == 0 || end_hour > 24 {
        return Err(ScheduleError::InvalidSlotParameters {
            start_hour,
            end_hour,
            interval_minutes,
        });
    }

    let from = start_hour.saturating_mul(MINUTES_PER_HOUR);
    let to = end_hour * MINUTES_PER_HOUR;

    Ok((from..to)
        .step_by(interval_minutes as usize)
        .map(minutes_to_time)
        .collect())
}

/// Slots for [`TimeSlotConfig::default`].
pub fn generate_default_time_slots() -> Vec<String> {
    TimeSlotConfig::default().generate().unwrap_or_default()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
