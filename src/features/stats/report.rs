//! Per-habit reports for dashboards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::engine::{compute_longest_streak, compute_stats, HabitStats};
use crate::error::HabitError;
use crate::habits::{CompletionRecord, Habit};

/// Everything the dashboard shows for one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitReport {
    pub habit_id: i64,
    pub name: String,
    #[serde(flatten)]
    pub stats: HabitStats,
    /// Window the progress percentage was computed over
    pub window_days: i64,
    pub longest_streak: usize,
    pub total_completions: usize,
    pub last_completion: Option<NaiveDate>,
    pub done_today: bool,
}

impl HabitReport {
    /// Build a report from a habit's completion record.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::InvalidArgument` if `window_days` is not positive.
    pub fn build(
        habit: &Habit,
        record: &CompletionRecord,
        today: NaiveDate,
        window_days: i64,
    ) -> Result<Self, HabitError> {
        Ok(Self {
            habit_id: habit.id,
            name: habit.name.clone(),
            stats: compute_stats(record, today, window_days)?,
            window_days,
            longest_streak: compute_longest_streak(record),
            total_completions: record.len(),
            last_completion: record.last(),
            done_today: record.contains(today),
        })
    }

    /// Days since the last completion, if there is one on or before `today`.
    #[must_use]
    pub fn days_since_completion(&self, today: NaiveDate) -> Option<i64> {
        self.last_completion
            .map(|last| (today - last).num_days())
            .filter(|days| *days >= 0)
    }
}
