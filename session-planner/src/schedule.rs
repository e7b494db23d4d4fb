/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core data structures for the session planner.
//!
//! Two sides of the pipeline are modelled by distinct types:
//!
//! ```text
//! caller ──(WeeklyScheduleEntry)──►  UsableEntry  ──(generator)──►  SessionOccurrence
//!            ↑ raw, may be incomplete    ↑ parsed, positive duration     ↑ dated, numbered
//! ```
//!
//! # Ownership model
//! Everything here is a value object.  A [`SessionCalculation`] is built fresh
//! by each `generate()` call and handed to the caller, who renders or persists
//! it; nothing is cached or shared between calls.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::metrics::time::{minutes_to_time, time_to_minutes};

// ── Weekday canonicalisation ──────────────────────────────────────────────────

/// Parse a day name into a [`Weekday`].
///
/// Matching is case-insensitive and accepts both full names (`"monday"`) and
/// three-letter abbreviations (`"Mon"`).  Surrounding whitespace is ignored.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    name.trim().parse::<Weekday>().ok()
}

/// Canonical day number: `0` = Sunday … `6` = Saturday.
pub fn day_number(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Full English name of `weekday`, used in validation messages.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Number of days from a `from` weekday forward to the next `to` weekday
/// (`0` when they are the same day).
pub fn days_ahead(from: Weekday, to: Weekday) -> u32 {
    (to.num_days_from_sunday() + 7 - from.num_days_from_sunday()) % 7
}

// ── WeeklyScheduleEntry (input) ───────────────────────────────────────────────

/// One recurring weekly commitment as supplied by a caller.
///
/// All three fields are optional so that incomplete form input (or a partly
/// filled plan file) can still reach the validator, which reports each gap
/// individually.  Blank strings count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyScheduleEntry {
    /// Day name, e.g. `"monday"`.
    #[serde(default)]
    pub day: Option<String>,

    /// Start of the session, `"HH:MM"` 24-hour.
    #[serde(default)]
    pub start_time: Option<String>,

    /// End of the session, `"HH:MM"` 24-hour.
    #[serde(default)]
    pub end_time: Option<String>,
}

/// An ordered list of weekly entries.  Entries may share a day.
pub type WeeklySchedule = Vec<WeeklyScheduleEntry>;

impl WeeklyScheduleEntry {
    /// Build a fully populated entry.
    pub fn new(
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            day: Some(day.into()),
            start_time: Some(start_time.into()),
            end_time: Some(end_time.into()),
        }
    }

    /// The day name, or `None` when absent or blank.
    pub fn day(&self) -> Option<&str> {
        present(&self.day)
    }

    /// The start time string, or `None` when absent or blank.
    pub fn start_time(&self) -> Option<&str> {
        present(&self.start_time)
    }

    /// The end time string, or `None` when absent or blank.
    pub fn end_time(&self) -> Option<&str> {
        present(&self.end_time)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

// ── UsableEntry (parsed working copy) ─────────────────────────────────────────

/// A schedule entry with every field present, parsed, and a positive
/// duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsableEntry {
    pub weekday: Weekday,
    pub start_minutes: u32,
    pub end_minutes: u32,
    /// `start_minutes` as a wall-clock time, attached to each occurrence date.
    pub starts_at: NaiveTime,
}

impl UsableEntry {
    /// Parse `entry`.
    ///
    /// * `Ok(None)` – the entry is incomplete or has `end <= start`; it is
    ///   simply not usable.
    /// * `Err(..)` – a present field is malformed (unknown day name or a time
    ///   that is not `HH:MM`).
    pub fn from_entry(entry: &WeeklyScheduleEntry) -> Result<Option<Self>, ScheduleError> {
        let (Some(day), Some(start), Some(end)) = (entry.day(), entry.start_time(), entry.end_time())
        else {
            return Ok(None);
        };

        let weekday =
            parse_weekday(day).ok_or_else(|| ScheduleError::UnknownWeekday(day.to_string()))?;
        let start_minutes = time_to_minutes(start)?;
        let end_minutes = time_to_minutes(end)?;

        if end_minutes <= start_minutes {
            return Ok(None);
        }

        let starts_at = NaiveTime::from_hms_opt(start_minutes / 60, start_minutes % 60, 0)
            .ok_or_else(|| ScheduleError::InvalidTimeFormat(start.to_string()))?;

        Ok(Some(Self {
            weekday,
            start_minutes,
            end_minutes,
            starts_at,
        }))
    }

    /// Length of one session of this entry, in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes - self.start_minutes
    }

    pub fn day_of_week(&self) -> u8 {
        day_number(self.weekday)
    }

    /// Instantiate this entry on `date`.
    ///
    /// The caller is responsible for `date` actually falling on
    /// `self.weekday`.
    pub fn occurrence(&self, session_number: u64, date: NaiveDate) -> SessionOccurrence {
        debug_assert_eq!(date.weekday(), self.weekday);
        SessionOccurrence {
            session_number,
            date: date.and_time(self.starts_at),
            start_time: minutes_to_time(self.start_minutes),
            end_time: minutes_to_time(self.end_minutes),
            day_of_week: self.day_of_week(),
        }
    }
}

/// Strictly collect the usable entries of `schedule`, in input order.
///
/// Incomplete and zero-length entries are skipped; malformed fields are an
/// error.
pub fn usable_entries(schedule: &[WeeklyScheduleEntry]) -> Result<Vec<UsableEntry>, ScheduleError> {
    let mut out = Vec::with_capacity(schedule.len());
    for entry in schedule {
        if let Some(usable) = UsableEntry::from_entry(entry)? {
            out.push(usable);
        }
    }
    Ok(out)
}

/// Like [`usable_entries`] but treats malformed entries as unusable instead
/// of failing.  Used by the infallible metrics helpers.
pub fn usable_entries_lenient(schedule: &[WeeklyScheduleEntry]) -> Vec<UsableEntry> {
    schedule
        .iter()
        .filter_map(|entry| UsableEntry::from_entry(entry).ok().flatten())
        .collect()
}

// ── SessionOccurrence (output) ────────────────────────────────────────────────

/// A single instantiated class meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionOccurrence {
    /// 1-based ordinal in emission order.
    pub session_number: u64,

    /// Calendar date of the meeting at its start time.
    pub date: NaiveDateTime,

    pub start_time: String,
    pub end_time: String,

    /// `0` = Sunday … `6` = Saturday.
    pub day_of_week: u8,
}

// ── SessionCalculation (output) ───────────────────────────────────────────────

/// Result of one generator run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionCalculation {
    /// `ceil(total minutes / session minutes)`.
    pub total_sessions: u64,

    /// Date of the last occurrence, or the start date when none were emitted.
    pub calculated_end_date: NaiveDate,

    /// Occurrences in emission order.  Shorter than `total_sessions` only when
    /// `truncated` is set.
    pub session_dates: Vec<SessionOccurrence>,

    /// Sum of the usable entries' durations, in hours.
    pub weekly_hours: f64,

    /// Set when the generation horizon was reached before `total_sessions`
    /// occurrences were emitted.
    pub truncated: bool,
}

impl SessionCalculation {
    /// Number of requested sessions that were not emitted because of
    /// truncation.
    pub fn missing_sessions(&self) -> u64 {
        self.total_sessions
            .saturating_sub(self.session_dates.len() as u64)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── weekday helpers ───────────────────────────────────────────────────────

    #[test]
    fn parse_weekday_is_case_insensitive() {
        assert_eq!(parse_weekday("monday"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("MONDAY"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("Friday"), Some(Weekday::Fri));
        assert_eq!(parse_weekday("  sunday "), Some(Weekday::Sun));
    }

    #[test]
    fn parse_weekday_accepts_abbreviations() {
        assert_eq!(parse_weekday("tue"), Some(Weekday::Tue));
        assert_eq!(parse_weekday("Sat"), Some(Weekday::Sat));
    }

    #[test]
    fn parse_weekday_rejects_unknown_names() {
        assert_eq!(parse_weekday("funday"), None);
        assert_eq!(parse_weekday(""), None);
    }

    #[test]
    fn day_number_starts_at_sunday() {
        assert_eq!(day_number(Weekday::Sun), 0);
        assert_eq!(day_number(Weekday::Mon), 1);
        assert_eq!(day_number(Weekday::Sat), 6);
    }

    #[test]
    fn days_ahead_wraps_around_the_week() {
        assert_eq!(days_ahead(Weekday::Mon, Weekday::Mon), 0);
        assert_eq!(days_ahead(Weekday::Mon, Weekday::Wed), 2);
        assert_eq!(days_ahead(Weekday::Wed, Weekday::Mon), 5);
        assert_eq!(days_ahead(Weekday::Sat, Weekday::Sun), 1);
    }

    // ── WeeklyScheduleEntry ───────────────────────────────────────────────────

    #[test]
    fn blank_fields_count_as_missing() {
        let entry = WeeklyScheduleEntry {
            day: Some("  ".into()),
            start_time: Some(String::new()),
            end_time: None,
        };
        assert_eq!(entry.day(), None);
        assert_eq!(entry.start_time(), None);
        assert_eq!(entry.end_time(), None);
    }

    // ── UsableEntry ───────────────────────────────────────────────────────────

    #[test]
    fn complete_entry_is_usable() {
        let entry = WeeklyScheduleEntry::new("Monday", "09:00", "10:30");
        let usable = UsableEntry::from_entry(&entry).unwrap().unwrap();
        assert_eq!(usable.weekday, Weekday::Mon);
        assert_eq!(usable.start_minutes, 540);
        assert_eq!(usable.end_minutes, 630);
        assert_eq!(usable.duration_minutes(), 90);
        assert_eq!(usable.day_of_week(), 1);
    }

    #[test]
    fn incomplete_entry_is_not_usable() {
        let entry = WeeklyScheduleEntry {
            day: Some("monday".into()),
            start_time: Some("09:00".into()),
            end_time: None,
        };
        assert_eq!(UsableEntry::from_entry(&entry).unwrap(), None);
    }

    #[test]
    fn inverted_range_is_not_usable() {
        let entry = WeeklyScheduleEntry::new("monday", "10:00", "10:00");
        assert_eq!(UsableEntry::from_entry(&entry).unwrap(), None);
    }

    #[test]
    fn unknown_day_is_an_error() {
        let entry = WeeklyScheduleEntry::new("someday", "09:00", "10:00");
        assert_eq!(
            UsableEntry::from_entry(&entry),
            Err(ScheduleError::UnknownWeekday("someday".into()))
        );
    }

    #[test]
    fn malformed_time_is_an_error() {
        let entry = WeeklyScheduleEntry::new("monday", "9am", "10:00");
        assert!(matches!(
            UsableEntry::from_entry(&entry),
            Err(ScheduleError::InvalidTimeFormat(_))
        ));
    }

    #[test]
    fn lenient_collection_skips_malformed_entries() {
        let schedule = vec![
            WeeklyScheduleEntry::new("monday", "09:00", "10:00"),
            WeeklyScheduleEntry::new("someday", "09:00", "10:00"),
            WeeklyScheduleEntry::new("tuesday", "25:00", "26:00"),
        ];
        assert!(usable_entries(&schedule).is_err());
        assert_eq!(usable_entries_lenient(&schedule).len(), 1);
    }

    #[test]
    fn occurrence_copies_entry_times_onto_date() {
        let entry = WeeklyScheduleEntry::new("monday", "9:05", "10:00");
        let usable = UsableEntry::from_entry(&entry).unwrap().unwrap();
        let occ = usable.occurrence(3, date(2024, 1, 8));
        assert_eq!(occ.session_number, 3);
        assert_eq!(occ.date, date(2024, 1, 8).and_hms_opt(9, 5, 0).unwrap());
        assert_eq!(occ.start_time, "09:05");
        assert_eq!(occ.end_time, "10:00");
        assert_eq!(occ.day_of_week, 1);
    }

    // ── SessionCalculation ────────────────────────────────────────────────────

    #[test]
    fn missing_sessions_counts_the_truncated_tail() {
        let calc = SessionCalculation {
            total_sessions: 5,
            calculated_end_date: date(2024, 1, 1),
            session_dates: Vec::new(),
            weekly_hours: 1.0,
            truncated: true,
        };
        assert_eq!(calc.missing_sessions(), 5);
    }
}
