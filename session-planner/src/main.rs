/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use session_planner::config::CoursePlan;
use session_planner::metrics::format_duration;
use session_planner::schedule::SessionCalculation;
use session_planner::slots::{
    generate_time_slots, DEFAULT_SLOT_END_HOUR, DEFAULT_SLOT_INTERVAL_MINUTES,
    DEFAULT_SLOT_START_HOUR,
};
use session_planner::validator::ValidationError;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Recurring-session scheduling calculator.
///
/// Example:
///   session-planner generate --plan demos/course_plan.yaml
#[derive(Debug, Parser)]
#[command(
    name = "session-planner",
    about = "Recurring-session scheduling calculator",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a course plan's weekly schedule for missing fields and overlaps.
    Validate {
        /// Path to the YAML course plan.
        #[arg(short = 'p', long = "plan")]
        plan: PathBuf,
    },

    /// Enumerate every session of a course plan.
    Generate {
        /// Path to the YAML course plan.
        #[arg(short = 'p', long = "plan")]
        plan: PathBuf,

        /// Print the calculation as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Generate even if the schedule has validation errors.
        #[arg(long = "skip-validation", default_value_t = false)]
        skip_validation: bool,
    },

    /// Print how many weeks a course plan takes at its weekly load.
    Weeks {
        /// Path to the YAML course plan.
        #[arg(short = 'p', long = "plan")]
        plan: PathBuf,
    },

    /// List candidate HH:MM time slots.
    Slots {
        #[arg(short = 's', long = "start-hour", default_value_t = DEFAULT_SLOT_START_HOUR)]
        start_hour: u32,

        /// Exclusive upper bound.
        #[arg(short = 'e', long = "end-hour", default_value_t = DEFAULT_SLOT_END_HOUR)]
        end_hour: u32,

        #[arg(short = 'i', long = "interval", default_value_t = DEFAULT_SLOT_INTERVAL_MINUTES)]
        interval_minutes: u32,
    },

    /// Render a minute count the way the planner displays durations.
    FormatDuration { minutes: u32 },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr so stdout carries only results.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    }
}

/// Execute one subcommand.  `Ok(false)` means the command ran but found
/// problems (validation errors) and the process should exit non-zero.
fn run(command: Command) -> Result<bool> {
    match command {
        Command::Validate { plan } => {
            let plan = load_plan(&plan)?;
            let errors = plan.validate();
            print_validation(&errors);
            Ok(errors.is_empty())
        }

        Command::Generate {
            plan,
            json,
            skip_validation,
        } => {
            let plan = load_plan(&plan)?;

            let errors = plan.validate();
            if !errors.is_empty() {
                print_validation(&errors);
                if !skip_validation {
                    return Ok(false);
                }
                warn!(
                    count = errors.len(),
                    "generating despite validation errors (--skip-validation)"
                );
            }

            let calc = plan.calculate().context("Session generation failed")?;

            if json {
                let out = serde_json::to_string_pretty(&calc)
                    .context("Failed to serialise calculation")?;
                println!("{out}");
            } else {
                print_calculation(&calc, plan.course_duration_weeks());
            }
            Ok(true)
        }

        Command::Weeks { plan } => {
            let plan = load_plan(&plan)?;
            let weeks = plan.course_duration_weeks();
            if weeks == 0 {
                warn!("schedule has no usable weekly load");
            }
            println!("{weeks}");
            Ok(true)
        }

        Command::Slots {
            start_hour,
            end_hour,
            interval_minutes,
        } => {
            info!(start_hour, end_hour, interval_minutes, "Generating time slots");
            for slot in generate_time_slots(start_hour, end_hour, interval_minutes)? {
                println!("{slot}");
            }
            Ok(true)
        }

        Command::FormatDuration { minutes } => {
            println!("{}", format_duration(minutes));
            Ok(true)
        }
    }
}

fn load_plan(path: &Path) -> Result<CoursePlan> {
    CoursePlan::load_from_file(path)
        .with_context(|| format!("Failed to load course plan: {}", path.display()))
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_validation(errors: &[ValidationError]) {
    if errors.is_empty() {
        println!("Schedule is valid.");
        return;
    }
    println!("Schedule has {} problem(s):", errors.len());
    for e in errors {
        println!("  - {e}");
    }
}

fn print_calculation(calc: &SessionCalculation, weeks: u64) {
    println!("Total sessions : {}", calc.total_sessions);
    println!(
        "Weekly load    : {}",
        format_duration((calc.weekly_hours * 60.0).round() as u32)
    );
    println!("Course weeks   : {weeks}");
    println!("End date       : {}", calc.calculated_end_date);
    println!();
    println!("{:>5}  {:<16}  {:<5}  {:<5}", "#", "Date", "Start", "End");
    for occ in &calc.session_dates {
        println!(
            "{:>5}  {:<16}  {:<5}  {:<5}",
            occ.session_number,
            occ.date.format("%Y-%m-%d %a").to_string(),
            occ.start_time,
            occ.end_time,
        );
    }

    if calc.truncated {
        println!();
        println!(
            "Truncated: {} of {} sessions fall beyond the generation horizon.",
            calc.missing_sessions(),
            calc.total_sessions
        );
    }
}
