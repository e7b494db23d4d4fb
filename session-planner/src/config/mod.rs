//! Course plan loading.
//!
//! A course plan bundles every input the planner needs into one YAML file:
//! ```yaml
//! course:
//!   total_hours: 40
//!   session_minutes: 90
//!   start_date: 2024-01-01
//! schedule:
//!   - day: monday
//!     start_time: "09:00"
//!     end_time: "10:30"
//!   - day: thursday
//!     start_time: "18:00"
//!     end_time: "19:30"
//! slots:              # optional, defaults to 08:00–22:00 every 30 min
//!   start_hour: 8
//!   end_hour: 22
//!   interval_minutes: 30
//! generator:          # optional
//!   horizon_days: 730
//! ```
//!
//! Schedule entry fields are all optional so that an incomplete plan still
//! loads and its gaps are reported by the validator rather than by serde.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::ScheduleError;
use crate::generator::{SessionGenerator, DEFAULT_HORIZON_DAYS};
use crate::metrics::course_duration_weeks;
use crate::schedule::{SessionCalculation, WeeklySchedule};
use crate::slots::TimeSlotConfig;
use crate::validator::{validate, ValidationError};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
///
/// This is kept private – callers work with [`CoursePlan`] instead.
#[derive(Debug, Deserialize)]
struct CoursePlanFile {
    course: CourseSection,
    #[serde(default)]
    schedule: WeeklySchedule,
    #[serde(default)]
    slots: TimeSlotConfig,
    #[serde(default)]
    generator: GeneratorSection,
}

#[derive(Debug, Deserialize)]
struct CourseSection {
    total_hours: f64,
    #[serde(default = "default_session_minutes")]
    session_minutes: u32,
    start_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct GeneratorSection {
    #[serde(default = "default_horizon_days")]
    horizon_days: u32,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

/// Serde default for `session_minutes`: one-hour sessions.
fn default_session_minutes() -> u32 {
    60
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

// ── Public data structures ────────────────────────────────────────────────────

/// A fully loaded course plan.
#[derive(Debug, Clone, PartialEq)]
pub struct CoursePlan {
    /// Total required duration of the course, in hours.
    pub total_hours: f64,
    /// Length of one session, in minutes.
    pub session_minutes: u32,
    pub start_date: NaiveDate,
    pub schedule: WeeklySchedule,
    pub slots: TimeSlotConfig,
    /// Generation horizon in days, see [`SessionGenerator::with_horizon_days`].
    pub horizon_days: u32,
}

impl CoursePlan {
    /// Parse the course plan at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if the YAML is
    /// structurally invalid (missing `course` section, unparseable date, …).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading course plan from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open course plan file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse course plan: {}", path.display()))
    }

    /// Parse a course plan from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: CoursePlanFile =
            serde_yaml::from_str(content).context("Invalid course plan YAML")?;

        let plan = CoursePlan {
            total_hours: file.course.total_hours,
            session_minutes: file.course.session_minutes,
            start_date: file.course.start_date,
            schedule: file.schedule,
            slots: file.slots,
            horizon_days: file.generator.horizon_days,
        };

        if plan.schedule.is_empty() {
            warn!("Course plan has no weekly schedule entries");
        }

        info!(
            total_hours = plan.total_hours,
            session_minutes = plan.session_minutes,
            start_date = %plan.start_date,
            entries = plan.schedule.len(),
            "Loaded course plan"
        );
        for (idx, entry) in plan.schedule.iter().enumerate() {
            debug!(
                "  Entry {}: {} {}–{}",
                idx + 1,
                entry.day().unwrap_or("?"),
                entry.start_time().unwrap_or("?"),
                entry.end_time().unwrap_or("?"),
            );
        }

        Ok(plan)
    }

    /// Generator configured with this plan's horizon.
    pub fn generator(&self) -> SessionGenerator {
        SessionGenerator::with_horizon_days(self.horizon_days)
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validate(&self.schedule)
    }

    /// Run the generator over this plan.
    pub fn calculate(&self) -> Result<SessionCalculation, ScheduleError> {
        self.generator().generate(
            self.total_hours,
            self.session_minutes,
            self.start_date,
            &self.schedule,
        )
    }

    pub fn course_duration_weeks(&self) -> u64 {
        course_duration_weeks(self.total_hours, &self.schedule)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
