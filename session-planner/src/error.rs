/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for caller contract violations.
//!
//! Two failure layers exist in the planner and they are modelled differently:
//!
//! * Structural problems in a weekly pattern (missing fields, inverted
//!   ranges, overlaps) are *data*: they are collected as
//!   [`ValidationError`](crate::validator::ValidationError) records so that a
//!   caller can display all of them at once.
//! * Contract violations (bad session length, malformed time strings, an
//!   unusable schedule handed to the generator) are returned as
//!   [`ScheduleError`] so a caller can tell "bad input" apart from "valid
//!   input, unreachable target".
//!
//! | Variant | Raised by |
//! |---|---|
//! | `NoValidSchedule` | [`SessionGenerator::generate`](crate::generator::SessionGenerator::generate) |
//! | `InvalidDuration` / `InvalidTotalHours` | generator |
//! | `InvalidTimeFormat` | [`time_to_minutes`](crate::metrics::time::time_to_minutes), generator |
//! | `UnknownWeekday` | generator |
//! | `InvalidSlotParameters` | [`generate_time_slots`](crate::slots::generate_time_slots) |
//!
//! None of these are retryable: every failure is a pure function of the input.

use thiserror::Error;

/// Top-level error type for the planner's fallible entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// After discarding incomplete or zero-length entries nothing usable was
    /// left to generate occurrences from.
    #[error("no usable schedule entries: every entry is missing a day or time, or has no positive duration")]
    NoValidSchedule,

    /// The per-session length was zero.
    #[error("session duration must be positive (got {session_minutes} minutes)")]
    InvalidDuration { session_minutes: u32 },

    /// The total duration budget was negative, NaN or infinite.
    #[error("total hours must be a finite, non-negative number (got {0})")]
    InvalidTotalHours(f64),

    /// A time-of-day string was not `HH:MM` with hour < 24 and minute < 60.
    #[error("invalid time '{0}': expected HH:MM with hour < 24 and minute < 60")]
    InvalidTimeFormat(String),

    /// A day name did not match any day of the week.
    #[error("unknown day of week: '{0}'")]
    UnknownWeekday(String),

    /// The slot generator was asked for a zero interval or an end hour past
    /// midnight.
    #[error(
        "invalid time-slot parameters: start_hour={start_hour}, end_hour={end_hour}, \
         interval_minutes={interval_minutes} (interval must be positive, end_hour at most 24)"
    )]
    InvalidSlotParameters {
        start_hour: u32,
        end_hour: u32,
        interval_minutes: u32,
    },
}
