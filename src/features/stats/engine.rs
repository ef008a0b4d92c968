//! Streak and rolling-progress computation.
//!
//! Every function here is pure: the caller supplies the completion record
//! and the reference "today", and nothing reads the system clock. Results
//! are recomputed on each call and never cached or persisted.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::HabitError;
use crate::habits::CompletionRecord;

/// Default width of the rolling progress window.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Derived view of a habit's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    /// Consecutive completed days ending today or yesterday
    pub current_streak: usize,
    /// Share of the trailing window that was completed, 0-100
    pub rolling_progress_percent: u8,
}

fn previous_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(1))
}

/// Number of consecutive completed days ending at `today` or, if today is
/// not done yet, at yesterday.
///
/// Missing today does not break the streak because the day is not over.
/// Missing both today and yesterday does.
#[must_use]
pub fn compute_current_streak(completed: &CompletionRecord, today: NaiveDate) -> usize {
    let anchor = if completed.contains(today) {
        Some(today)
    } else {
        previous_day(today)
    };

    let Some(anchor) = anchor.filter(|day| completed.contains(*day)) else {
        return 0;
    };

    let mut streak = 1;
    let mut cursor = anchor;
    while let Some(day) = previous_day(cursor) {
        if !completed.contains(day) {
            break;
        }
        streak += 1;
        cursor = day;
    }

    streak
}

/// Length of the longest run of consecutive days anywhere in the record.
#[must_use]
pub fn compute_longest_streak(completed: &CompletionRecord) -> usize {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for date in completed.iter() {
        run = match prev {
            Some(p) if previous_day(date) == Some(p) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }

    longest
}

/// First day of the inclusive window of `window_days` days ending at `today`.
fn window_start(today: NaiveDate, window_days: i64) -> Result<NaiveDate, HabitError> {
    if window_days <= 0 {
        return Err(HabitError::invalid_argument(format!(
            "window_days must be positive, got {window_days}"
        )));
    }

    let span = window_days.unsigned_abs() - 1;
    Ok(today.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN))
}

/// Count of completed days in `[today - (window_days - 1), today]`.
///
/// # Errors
///
/// Returns `HabitError::InvalidArgument` if `window_days` is not positive.
pub fn completions_in_window(
    completed: &CompletionRecord,
    today: NaiveDate,
    window_days: i64,
) -> Result<usize, HabitError> {
    let start = window_start(today, window_days)?;
    Ok(completed.range(start..=today).count())
}

/// Percentage of days in the trailing window that were completed, rounded
/// half-up to the nearest integer.
///
/// # Errors
///
/// Returns `HabitError::InvalidArgument` if `window_days` is not positive.
pub fn compute_rolling_progress(
    completed: &CompletionRecord,
    today: NaiveDate,
    window_days: i64,
) -> Result<u8, HabitError> {
    let hits = completions_in_window(completed, today, window_days)?;

    let hits = u128::try_from(hits).unwrap_or(u128::MAX);
    let window = u128::from(window_days.unsigned_abs());
    let percent = (200 * hits + window) / (2 * window);

    Ok(u8::try_from(percent.min(100)).unwrap_or(100))
}

/// Compute both core metrics for one habit.
///
/// # Errors
///
/// Returns `HabitError::InvalidArgument` if `window_days` is not positive.
pub fn compute_stats(
    completed: &CompletionRecord,
    today: NaiveDate,
    window_days: i64,
) -> Result<HabitStats, HabitError> {
    let rolling_progress_percent = compute_rolling_progress(completed, today, window_days)?;
    Ok(HabitStats {
        current_streak: compute_current_streak(completed, today),
        rolling_progress_percent,
    })
}

/// One value per day for the last `days` days ending at `today`, oldest
/// first: 1 if the habit was done that day, 0 otherwise.
#[must_use]
pub fn daily_series(completed: &CompletionRecord, today: NaiveDate, days: usize) -> Vec<usize> {
    (0..days)
        .rev()
        .map(|back| {
            today
                .checked_sub_days(Days::new(back as u64))
                .map_or(0, |day| usize::from(completed.contains(day)))
        })
        .collect()
}
