/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Session planner – recurring-session scheduling calculator
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── schedule    – entries, occurrences, calculation result, weekday helpers
//! ├── validator   – structural + same-day overlap checks (errors as data)
//! ├── generator   – week-cursor occurrence generation with a safety horizon
//! ├── metrics/    – minute arithmetic, formatted durations, course weeks
//! ├── slots       – candidate HH:MM slots for pickers
//! ├── config/     – YAML course plan files
//! └── error       – ScheduleError (caller contract violations)
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod schedule;
pub mod slots;
pub mod validator;

pub use error::ScheduleError;
pub use generator::{generate, SessionGenerator};
pub use metrics::time::time_to_minutes;
pub use metrics::{course_duration_weeks, format_duration};
pub use schedule::{SessionCalculation, SessionOccurrence, WeeklySchedule, WeeklyScheduleEntry};
pub use slots::generate_time_slots;
pub use validator::{validate, ValidationError};
