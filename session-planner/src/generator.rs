/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Occurrence generation.
//!
//! [`SessionGenerator`] expands a weekly pattern and a total-hours budget into
//! an ordered list of dated [`SessionOccurrence`]s.
//!
//! # Algorithm (week cursor)
//! Usable entries are ordered by weekday, counted from `start_date`'s weekday
//! (the canonical Sunday-first order rotated to begin on the start day), and
//! same-day entries by start time.  For week `w = 0, 1, …` each entry in that
//! order lands on `start_date + days_ahead(entry) + 7·w`.  Generation stops the moment
//! `total_sessions` occurrences exist, even in the middle of a week.
//!
//! Stepping a day cursor forward from `start_date` and emitting every entry
//! whose weekday matches yields exactly the same sequence; the week cursor
//! just skips the empty days.
//!
//! # Horizon
//! No occurrence is dated `horizon_days` or more after `start_date` (730 days
//! by default).  Hitting the horizon is not an error: the partial result is
//! returned with [`SessionCalculation::truncated`] set.
//!
//! # Example
//! ```rust
//! use chrono::NaiveDate;
//! use session_planner::generator::SessionGenerator;
//! use session_planner::schedule::WeeklyScheduleEntry;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(); // a Monday
//! let schedule = vec![WeeklyScheduleEntry::new("monday", "09:00", "10:00")];
//!
//! let calc = SessionGenerator::new()
//!     .generate(2.0, 60, start, &schedule)
//!     .unwrap();
//!
//! assert_eq!(calc.total_sessions, 2);
//! assert_eq!(calc.calculated_end_date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
//! ```

use chrono::{Datelike, Days, NaiveDate};
use tracing::{debug, info, warn};

use crate::error::ScheduleError;
use crate::metrics::{session_count, weekly_hours};
use crate::schedule::{
    days_ahead, usable_entries, SessionCalculation, SessionOccurrence, UsableEntry,
    WeeklyScheduleEntry,
};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default generation horizon: two years of calendar days.
pub const DEFAULT_HORIZON_DAYS: u32 = 730;

/// Upper bound on the up-front reservation for the occurrence list.
const MAX_PREALLOCATED_OCCURRENCES: u64 = 4096;

// ── SessionGenerator ──────────────────────────────────────────────────────────

/// Stateless occurrence generator.
///
/// Only the horizon is configured up front; all per-run state lives inside
/// [`generate`](Self::generate), so one generator can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionGenerator {
    horizon_days: u32,
}

impl SessionGenerator {
    /// Create a generator with the default 730-day horizon.
    pub fn new() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    /// Create a generator with a custom horizon (in days).
    pub fn with_horizon_days(horizon_days: u32) -> Self {
        Self { horizon_days }
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Generate the occurrences needed to cover `total_hours` in sessions of
    /// `session_minutes`, starting on `start_date`.
    ///
    /// # Errors
    /// * [`ScheduleError::InvalidDuration`] – `session_minutes` is zero.
    /// * [`ScheduleError::InvalidTotalHours`] – negative or non-finite budget.
    /// * [`ScheduleError::UnknownWeekday`] / [`ScheduleError::InvalidTimeFormat`]
    ///   – a present entry field is malformed.
    /// * [`ScheduleError::NoValidSchedule`] – no usable entries remain once
    ///   incomplete and zero-length entries are discarded.
    pub fn generate(
        &self,
        total_hours: f64,
        session_minutes: u32,
        start_date: NaiveDate,
        schedule: &[WeeklyScheduleEntry],
    ) -> Result<SessionCalculation, ScheduleError> {
        // ── Preconditions ─────────────────────────────────────────────────────
        let total_sessions = session_count(total_hours, session_minutes)?;

        let mut entries = usable_entries(schedule)?;
        if entries.is_empty() {
            warn!(
                entries = schedule.len(),
                "no usable schedule entries, refusing to generate"
            );
            return Err(ScheduleError::NoValidSchedule);
        }
        if entries.len() < schedule.len() {
            debug!(
                discarded = schedule.len() - entries.len(),
                "discarded incomplete or zero-length entries"
            );
        }

        let weekly_hours = weekly_hours(&entries);

        // ── Canonical processing order ────────────────────────────────────────
        let first_day = start_date.weekday();
        entries.sort_by_key(|e| (days_ahead(first_day, e.weekday), e.start_minutes));

        info!(
            %start_date,
            total_hours,
            session_minutes,
            total_sessions,
            usable_entries = entries.len(),
            weekly_hours,
            horizon_days = self.horizon_days,
            "=== SessionGenerator::generate() ==="
        );

        // ── Emission ──────────────────────────────────────────────────────────
        let session_dates = self.emit(&entries, start_date, total_sessions);

        let truncated = (session_dates.len() as u64) < total_sessions;
        if truncated {
            warn!(
                emitted = session_dates.len(),
                total_sessions,
                horizon_days = self.horizon_days,
                "generation horizon reached before all sessions were scheduled"
            );
        }

        let calculated_end_date = session_dates
            .last()
            .map(|occ| occ.date.date())
            .unwrap_or(start_date);

        info!(
            emitted = session_dates.len(),
            %calculated_end_date,
            truncated,
            "=== Generation complete ==="
        );

        Ok(SessionCalculation {
            total_sessions,
            calculated_end_date,
            session_dates,
            weekly_hours,
            truncated,
        })
    }

    /// Walk weeks from `start_date` until `total_sessions` occurrences exist or
    /// the horizon is reached.  `entries` must already be in processing order.
    fn emit(
        &self,
        entries: &[UsableEntry],
        start_date: NaiveDate,
        total_sessions: u64,
    ) -> Vec<SessionOccurrence> {
        let first_day = start_date.weekday();
        let horizon = start_date
            .checked_add_days(Days::new(u64::from(self.horizon_days)))
            .unwrap_or(NaiveDate::MAX);

        let mut out = Vec::with_capacity(self.capacity_hint(entries.len(), total_sessions));

        let mut week: u64 = 0;
        'weeks: loop {
            for entry in entries {
                if out.len() as u64 >= total_sessions {
                    break 'weeks;
                }

                let offset = u64::from(days_ahead(first_day, entry.weekday)) + 7 * week;
                let date = match start_date.checked_add_days(Days::new(offset)) {
                    Some(date) if date < horizon => date,
                    // Entries are in ascending date order within a week, so
                    // every later entry is past the horizon as well.
                    _ => break 'weeks,
                };

                let occ = entry.occurrence(out.len() as u64 + 1, date);
                debug!(
                    session = occ.session_number,
                    date = %occ.date,
                    day_of_week = occ.day_of_week,
                    "occurrence"
                );
                out.push(occ);
            }
            week += 1;
        }

        out
    }

    /// Up-front reservation for the occurrence list: no more than the
    /// request, the horizon's worth of weeks, or a fixed ceiling.
    fn capacity_hint(&self, per_week: usize, total_sessions: u64) -> usize {
        let max_weeks = u64::from(self.horizon_days) / 7 + 1;
        total_sessions
            .min((per_week as u64).saturating_mul(max_weeks))
            .min(MAX_PREALLOCATED_OCCURRENCES) as usize
    }
}

impl Default for SessionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// [`SessionGenerator::generate`] with the default horizon.
pub fn generate(
    total_hours: f64,
    session_minutes: u32,
    start_date: NaiveDate,
    schedule: &[WeeklyScheduleEntry],
) -> Result<SessionCalculation, ScheduleError> {
    SessionGenerator::new().generate(total_hours, session_minutes, start_date, schedule)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Weekday};

    // ── Test helpers ──────────────────────────────────────────────────────────

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    fn entry(day: &str, start: &str, end: &str) -> WeeklyScheduleEntry {
        WeeklyScheduleEntry::new(day, start, end)
    }

    /// 2024-01-01 is a Monday.
    fn monday() -> NaiveDate {
        date(2024, 1, 1)
    }

    fn weekday_from_number(n: u8) -> Weekday {
        match n {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    // ── reference example ─────────────────────────────────────────────────────

    #[test]
    fn two_hours_of_one_hour_monday_sessions() {
        let schedule = vec![entry("monday", "09:00", "10:00")];
        let calc = generate(2.0, 60, monday(), &schedule).unwrap();

        assert_eq!(calc.total_sessions, 2);
        assert_eq!(calc.session_dates.len(), 2);
        assert_eq!(calc.session_dates[0].date, at(2024, 1, 1, 9, 0));
        assert_eq!(calc.session_dates[1].date, at(2024, 1, 8, 9, 0));
        assert!((calc.weekly_hours - 1.0).abs() < 1e-9);
        assert_eq!(calc.calculated_end_date, date(2024, 1, 8));
        assert!(!calc.truncated);
    }

    #[test]
    fn occurrence_fields_are_copied_from_entry() {
        let schedule = vec![entry("Wednesday", "18:30", "20:00")];
        let calc = generate(1.5, 90, monday(), &schedule).unwrap();
        let occ = &calc.session_dates[0];
        assert_eq!(occ.session_number, 1);
        assert_eq!(occ.date, at(2024, 1, 3, 18, 30));
        assert_eq!(occ.start_time, "18:30");
        assert_eq!(occ.end_time, "20:00");
        assert_eq!(occ.day_of_week, 3);
    }

    // ── session count ─────────────────────────────────────────────────────────

    #[test]
    fn total_sessions_rounds_up() {
        let schedule = vec![entry("monday", "09:00", "10:30")];
        // 10 h = 600 min in 90-minute sessions → 6.67 → 7
        let calc = generate(10.0, 90, monday(), &schedule).unwrap();
        assert_eq!(calc.total_sessions, 7);
        assert_eq!(calc.session_dates.len(), 7);
    }

    #[test]
    fn sub_minute_remainder_needs_another_session() {
        let schedule = vec![entry("monday", "09:00", "10:00")];
        // 1.0075 h = 60.45 min: one 60-minute session leaves 0.45 min uncovered
        let calc = generate(1.0075, 60, monday(), &schedule).unwrap();
        assert_eq!(calc.total_sessions, 2);
        assert_eq!(calc.session_dates.len(), 2);
        assert_eq!(calc.calculated_end_date, date(2024, 1, 8));

        // 0.001 h = 0.06 min is still a non-empty budget
        let calc = generate(0.001, 60, monday(), &schedule).unwrap();
        assert_eq!(calc.total_sessions, 1);
        assert_eq!(calc.session_dates[0].date, at(2024, 1, 1, 9, 0));
    }

    #[test]
    fn float_noise_does_not_add_a_session() {
        let schedule = vec![entry("monday", "09:00", "10:00")];
        // 1.1 h * 60 = 66.00000000000001 in f64; 66 min needs exactly 2
        let calc = generate(1.1, 60, monday(), &schedule).unwrap();
        assert_eq!(calc.total_sessions, 2);
        let calc = generate(1.1, 66, monday(), &schedule).unwrap();
        assert_eq!(calc.total_sessions, 1);
    }

    #[test]
    fn zero_hours_yields_no_sessions() {
        let schedule = vec![entry("friday", "09:00", "10:00")];
        let calc = generate(0.0, 60, monday(), &schedule).unwrap();
        assert_eq!(calc.total_sessions, 0);
        assert!(calc.session_dates.is_empty());
        assert_eq!(calc.calculated_end_date, monday());
        assert!(!calc.truncated);
    }

    #[test]
    fn stops_mid_week() {
        let schedule = vec![
            entry("monday", "09:00", "10:00"),
            entry("wednesday", "09:00", "10:00"),
            entry("friday", "09:00", "10:00"),
        ];
        let calc = generate(4.0, 60, monday(), &schedule).unwrap();
        let dates: Vec<NaiveDate> = calc.session_dates.iter().map(|o| o.date.date()).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 1, 3), date(2024, 1, 5), date(2024, 1, 8)]
        );
        assert_eq!(calc.calculated_end_date, date(2024, 1, 8));
    }

    // ── ordering ──────────────────────────────────────────────────────────────

    #[test]
    fn start_mid_week_wraps_to_following_days() {
        // Start on Wednesday 2024-01-03: Monday's first slot is 2024-01-08
        let schedule = vec![
            entry("monday", "09:00", "10:00"),
            entry("friday", "09:00", "10:00"),
        ];
        let calc = generate(3.0, 60, date(2024, 1, 3), &schedule).unwrap();
        let dates: Vec<NaiveDate> = calc.session_dates.iter().map(|o| o.date.date()).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 5), date(2024, 1, 8), date(2024, 1, 12)]
        );
    }

    #[test]
    fn same_day_entries_are_emitted_by_start_time() {
        let schedule = vec![
            entry("monday", "14:00", "15:00"),
            entry("monday", "09:00", "10:00"),
        ];
        let calc = generate(3.0, 60, monday(), &schedule).unwrap();
        let stamps: Vec<NaiveDateTime> = calc.session_dates.iter().map(|o| o.date).collect();
        assert_eq!(
            stamps,
            vec![
                at(2024, 1, 1, 9, 0),
                at(2024, 1, 1, 14, 0),
                at(2024, 1, 8, 9, 0)
            ]
        );
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = vec![
            entry("friday", "09:00", "10:00"),
            entry("tuesday", "11:00", "12:00"),
            entry("sunday", "08:00", "09:00"),
        ];
        let mut b = a.clone();
        b.reverse();
        let start = date(2024, 3, 14);
        assert_eq!(
            generate(20.0, 60, start, &a).unwrap(),
            generate(20.0, 60, start, &b).unwrap()
        );
    }

    #[test]
    fn dates_are_ordered_and_numbers_strictly_increase() {
        let schedule = vec![
            entry("saturday", "10:00", "12:00"),
            entry("tuesday", "18:00", "19:30"),
            entry("sunday", "09:00", "10:00"),
            entry("tuesday", "07:00", "08:00"),
        ];
        let calc = generate(50.0, 45, date(2024, 2, 29), &schedule).unwrap();
        assert!(!calc.session_dates.is_empty());
        for (i, occ) in calc.session_dates.iter().enumerate() {
            assert_eq!(occ.session_number, i as u64 + 1);
        }
        for pair in calc.session_dates.windows(2) {
            assert!(
                pair[0].date <= pair[1].date,
                "{} should not come after {}",
                pair[0].date,
                pair[1].date
            );
        }
    }

    #[test]
    fn every_occurrence_falls_on_its_recorded_weekday() {
        let schedule = vec![
            entry("sunday", "09:00", "10:00"),
            entry("thursday", "13:00", "14:00"),
            entry("sat", "16:00", "17:00"),
        ];
        let calc = generate(30.0, 60, date(2023, 12, 27), &schedule).unwrap();
        for occ in &calc.session_dates {
            assert_eq!(occ.date.weekday(), weekday_from_number(occ.day_of_week));
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let schedule = vec![
            entry("monday", "09:00", "10:00"),
            entry("thursday", "17:00", "18:30"),
        ];
        let start = date(2024, 5, 2);
        let first = generate(25.0, 50, start, &schedule).unwrap();
        let second = generate(25.0, 50, start, &schedule).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn matches_day_by_day_enumeration() {
        let schedule = vec![
            entry("tuesday", "10:00", "11:00"),
            entry("friday", "08:00", "09:00"),
            entry("tuesday", "08:00", "09:00"),
        ];
        let start = date(2024, 6, 6);
        let calc = generate(17.0, 60, start, &schedule).unwrap();

        let mut entries = usable_entries(&schedule).unwrap();
        entries.sort_by_key(|e| e.start_minutes);
        let mut expected = Vec::new();
        let mut cursor = start;
        while expected.len() < 17 {
            for e in entries.iter().filter(|e| e.weekday == cursor.weekday()) {
                if expected.len() < 17 {
                    expected.push(cursor.and_time(e.starts_at));
                }
            }
            cursor = cursor.succ_opt().unwrap();
        }

        let got: Vec<NaiveDateTime> = calc.session_dates.iter().map(|o| o.date).collect();
        assert_eq!(got, expected);
    }

    // ── weekly hours ──────────────────────────────────────────────────────────

    #[test]
    fn weekly_hours_counts_only_usable_entries() {
        let schedule = vec![
            entry("monday", "09:00", "10:30"),
            entry("tuesday", "12:00", "11:00"), // inverted → discarded
            WeeklyScheduleEntry {
                day: Some("friday".into()),
                start_time: None,
                end_time: Some("12:00".into()),
            },
        ];
        let calc = generate(3.0, 90, monday(), &schedule).unwrap();
        assert!((calc.weekly_hours - 1.5).abs() < 1e-9);
        assert_eq!(calc.session_dates.len(), 2);
    }

    // ── horizon / truncation ──────────────────────────────────────────────────

    #[test]
    fn default_horizon_truncates_after_two_years() {
        // One session a week for 200 weeks cannot fit in 730 days
        let schedule = vec![entry("monday", "09:00", "10:00")];
        let calc = generate(200.0, 60, monday(), &schedule).unwrap();
        assert!(calc.truncated);
        // Mondays at day offsets 0, 7, …, 728 → 105 occurrences
        assert_eq!(calc.session_dates.len(), 105);
        assert_eq!(calc.missing_sessions(), 95);
        let last = calc.session_dates.last().unwrap().date.date();
        assert!(last < monday() + Days::new(730));
        assert_eq!(calc.calculated_end_date, last);
    }

    #[test]
    fn custom_horizon_is_exclusive() {
        let schedule = vec![entry("monday", "09:00", "10:00")];
        // Horizon of 7 days: only the start Monday fits, 2024-01-08 does not
        let calc = SessionGenerator::with_horizon_days(7)
            .generate(5.0, 60, monday(), &schedule)
            .unwrap();
        assert_eq!(calc.session_dates.len(), 1);
        assert!(calc.truncated);
        assert_eq!(calc.total_sessions, 5);
    }

    #[test]
    fn reservation_is_capped_for_unbounded_horizons() {
        let gen = SessionGenerator::with_horizon_days(u32::MAX);
        assert_eq!(gen.capacity_hint(3, u64::MAX), 4096);
        // Small requests reserve exactly what they need
        assert_eq!(gen.capacity_hint(3, 10), 10);
        // A short horizon bounds the reservation below the request
        assert_eq!(SessionGenerator::with_horizon_days(7).capacity_hint(2, 100), 4);
    }

    #[test]
    fn zero_horizon_emits_nothing() {
        let schedule = vec![entry("monday", "09:00", "10:00")];
        let calc = SessionGenerator::with_horizon_days(0)
            .generate(1.0, 60, monday(), &schedule)
            .unwrap();
        assert!(calc.session_dates.is_empty());
        assert!(calc.truncated);
        assert_eq!(calc.calculated_end_date, monday());
    }

    // ── contract violations ───────────────────────────────────────────────────

    #[test]
    fn zero_session_length_is_rejected() {
        let schedule = vec![entry("monday", "09:00", "10:00")];
        assert_eq!(
            generate(2.0, 0, monday(), &schedule),
            Err(ScheduleError::InvalidDuration { session_minutes: 0 })
        );
    }

    #[test]
    fn negative_budget_is_rejected() {
        let schedule = vec![entry("monday", "09:00", "10:00")];
        assert!(matches!(
            generate(-1.0, 60, monday(), &schedule),
            Err(ScheduleError::InvalidTotalHours(_))
        ));
    }

    #[test]
    fn empty_schedule_is_rejected() {
        assert_eq!(
            generate(2.0, 60, monday(), &[]),
            Err(ScheduleError::NoValidSchedule)
        );
    }

    #[test]
    fn fully_incomplete_schedule_is_rejected() {
        let schedule = vec![
            WeeklyScheduleEntry::default(),
            entry("monday", "10:00", "09:00"),
        ];
        assert_eq!(
            generate(2.0, 60, monday(), &schedule),
            Err(ScheduleError::NoValidSchedule)
        );
    }

    #[test]
    fn malformed_fields_are_rejected() {
        assert_eq!(
            generate(2.0, 60, monday(), &[entry("blursday", "09:00", "10:00")]),
            Err(ScheduleError::UnknownWeekday("blursday".into()))
        );
        assert_eq!(
            generate(2.0, 60, monday(), &[entry("monday", "09:00", "24:00")]),
            Err(ScheduleError::InvalidTimeFormat("24:00".into()))
        );
    }
}
