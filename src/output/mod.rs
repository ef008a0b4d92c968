//! Output formatting for habitual.
//!
//! Every formatter comes in a pretty (colored, human-readable) and a JSON
//! flavor; the functions here pick one based on [`OutputFormat`].

mod json;
mod pretty;

use chrono::NaiveDate;

use crate::cli::args::OutputFormat;
use crate::error::HabitError;
use crate::features::notifications::{NewNotification, Notification};
use crate::features::stats::HabitReport;
use crate::habits::{CompletionOutcome, Habit};

pub use json::*;
pub use pretty::*;

/// Format a list of habits.
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_habits(habits: &[Habit], format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_habits_pretty(habits)),
        OutputFormat::Json => format_list_json("habits", habits),
    }
}

/// Format a newly created habit.
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_habit(habit: &Habit, format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_habit_pretty(habit)),
        OutputFormat::Json => to_json(habit),
    }
}

/// Format the result of `done` / `undo`.
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_outcome(
    outcome: &CompletionOutcome,
    undo: bool,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_outcome_pretty(outcome, undo)),
        OutputFormat::Json => to_json(outcome),
    }
}

/// Format one habit's report.
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_report(
    report: &HabitReport,
    recent: &[usize],
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_report_pretty(report, recent, today)),
        OutputFormat::Json => to_json(report),
    }
}

/// Format the all-habits dashboard.
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_dashboard(
    reports: &[HabitReport],
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_dashboard_pretty(reports, today)),
        OutputFormat::Json => format_dashboard_json(reports, today),
    }
}

/// Format stored notifications grouped by date bucket.
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_notifications(
    notifications: &[Notification],
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_notifications_pretty(notifications, today)),
        OutputFormat::Json => format_notifications_json(notifications, today),
    }
}

/// Format pending reminders.
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_reminders(
    reminders: &[NewNotification],
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_reminders_pretty(reminders)),
        OutputFormat::Json => format_list_json("reminders", reminders),
    }
}
