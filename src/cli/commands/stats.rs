//! Statistics command implementation.
//!
//! Handles the stats dashboard, single-habit reports, and heatmaps.

use chrono::{Days, NaiveDate};
use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::OutputFormat;
use crate::error::HabitError;
use crate::features::stats::{daily_series, render_heatmap, HabitReport, MAX_HEATMAP_WEEKS};
use crate::habits::HabitTracker;
use crate::output::{format_dashboard, format_report, to_json};

/// Days shown in the single-habit sparkline.
const RECENT_DAYS: usize = 14;

/// Show one habit's report, or the dashboard when no habit is given.
///
/// # Errors
///
/// Returns an error if the window is not positive, the habit is unknown,
/// or the store fails.
pub fn stats(
    ctx: &Context,
    habit: Option<&str>,
    window: Option<i64>,
) -> Result<String, HabitError> {
    let habits = ctx.habit_store();
    let notifications = ctx.notification_store();
    let tracker = HabitTracker::from_config(&habits, &notifications, &ctx.config)
        .with_window_days(window.unwrap_or(ctx.config.stats.window_days));
    let today = ctx.today();

    match habit {
        None => {
            let reports = tracker.dashboard(today)?;
            format_dashboard(&reports, today, ctx.format)
        }
        Some(key) => {
            let (habit, record) = tracker.history(key)?;
            let report = HabitReport::build(&habit, &record, today, tracker.window_days())?;
            let recent = daily_series(&record, today, RECENT_DAYS);
            format_report(&report, &recent, today, ctx.format)
        }
    }
}

/// Render a habit's completion calendar.
///
/// # Errors
///
/// Returns `HabitError::InvalidArgument` if `weeks` is outside
/// `1..=MAX_HEATMAP_WEEKS`, or an error if the habit is unknown or the store
/// fails.
pub fn heatmap(ctx: &Context, habit: &str, weeks: Option<usize>) -> Result<String, HabitError> {
    let weeks = weeks.unwrap_or(ctx.config.stats.heatmap_weeks);
    if !(1..=MAX_HEATMAP_WEEKS).contains(&weeks) {
        return Err(HabitError::invalid_argument(format!(
            "weeks must be between 1 and {MAX_HEATMAP_WEEKS}, got {weeks}"
        )));
    }

    let habits = ctx.habit_store();
    let notifications = ctx.notification_store();
    let tracker = HabitTracker::from_config(&habits, &notifications, &ctx.config);

    let (habit, record) = tracker.history(habit)?;
    let today = ctx.today();

    match ctx.format {
        OutputFormat::Json => {
            let span = weeks
                .checked_mul(7)
                .and_then(|days| u64::try_from(days - 1).ok())
                .ok_or_else(|| HabitError::invalid_argument(format!("{weeks} weeks is too wide")))?;
            let start = today
                .checked_sub_days(Days::new(span))
                .unwrap_or(NaiveDate::MIN);
            let completed: Vec<_> = record.range(start..=today).collect();
            to_json(&json!({
                "habit": habit.name,
                "from": start,
                "to": today,
                "completed": completed,
            }))
        }
        OutputFormat::Pretty => Ok(format!(
            "{}\n\n{}",
            habit.name.bold(),
            render_heatmap(&record, today, weeks)
        )),
    }
}
