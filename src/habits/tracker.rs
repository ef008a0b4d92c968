//! Habit tracker service.
//!
//! Wires a [`HabitStore`] and a [`NotificationStore`] to the stats engine.
//! Stats are computed per habit, on demand, from the stored completion
//! record and the `today` the caller passes in.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::store::HabitStore;
use super::types::{CompletionRecord, Habit, NewHabit};
use crate::config::Config;
use crate::error::HabitError;
use crate::features::notifications::{
    milestone_notification, reminders, NewNotification, Notification, NotificationStore,
};
use crate::features::stats::{compute_current_streak, HabitReport, DEFAULT_WINDOW_DAYS};

/// Result of checking a habit off (or un-checking it) for a day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOutcome {
    pub habit: Habit,
    pub date: NaiveDate,
    /// False if the store already had (or already lacked) this day
    pub changed: bool,
    pub report: HabitReport,
    /// Milestone reached by this completion, if any
    pub notification: Option<Notification>,
}

/// Habit operations over a pair of stores.
pub struct HabitTracker<'a, H, N> {
    habits: &'a H,
    notifications: &'a N,
    window_days: i64,
    milestones: Vec<usize>,
    notify: bool,
}

impl<'a, H: HabitStore, N: NotificationStore> HabitTracker<'a, H, N> {
    /// Create a tracker with default settings.
    pub fn new(habits: &'a H, notifications: &'a N) -> Self {
        let defaults = Config::default();
        Self {
            habits,
            notifications,
            window_days: DEFAULT_WINDOW_DAYS,
            milestones: defaults.notifications.milestones,
            notify: defaults.notifications.enabled,
        }
    }

    /// Create a tracker using the stats and notification sections of `config`.
    pub fn from_config(habits: &'a H, notifications: &'a N, config: &Config) -> Self {
        Self {
            habits,
            notifications,
            window_days: config.stats.window_days,
            milestones: config.notifications.milestones.clone(),
            notify: config.notifications.enabled,
        }
    }

    /// Override the rolling progress window.
    #[must_use]
    pub fn with_window_days(mut self, window_days: i64) -> Self {
        self.window_days = window_days;
        self
    }

    #[must_use]
    pub const fn window_days(&self) -> i64 {
        self.window_days
    }

    /// Start tracking a new habit.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or already used.
    pub fn add(&self, habit: &NewHabit) -> Result<Habit, HabitError> {
        self.habits.create_habit(habit)
    }

    /// Mark a habit done on `day`.
    ///
    /// If the completion grows the streak past a configured milestone, a
    /// milestone notification is stored and returned in the outcome, unless
    /// the same milestone for this habit is still unread.
    ///
    /// # Errors
    ///
    /// Returns an error if the habit does not exist, `day` is after the
    /// current date, the window is invalid, or the store fails.
    pub fn complete(
        &self,
        key: &str,
        day: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<CompletionOutcome, HabitError> {
        let today = now.date();
        if day > today {
            return Err(HabitError::invalid_argument(format!(
                "cannot complete a habit on {day}, which is after today ({today})"
            )));
        }

        let habit = self.habits.find_habit(key)?;
        let mut record = self.habits.completions(habit.id)?;
        let streak_before = compute_current_streak(&record, today);

        record.insert(day);
        let report = HabitReport::build(&habit, &record, today, self.window_days)?;

        let changed = self.habits.mark_done(habit.id, day)?;
        tracing::info!(
            habit = %habit.name,
            %day,
            changed,
            streak = report.stats.current_streak,
            "marked habit done"
        );

        let notification = if changed && self.notify {
            self.dispatch_milestone(&habit, streak_before, report.stats.current_streak, now)?
        } else {
            None
        };

        Ok(CompletionOutcome {
            habit,
            date: day,
            changed,
            report,
            notification,
        })
    }

    fn dispatch_milestone(
        &self,
        habit: &Habit,
        streak_before: usize,
        streak_after: usize,
        now: NaiveDateTime,
    ) -> Result<Option<Notification>, HabitError> {
        let Some(pending) =
            milestone_notification(habit, &self.milestones, streak_before, streak_after, now)
        else {
            return Ok(None);
        };

        // undo then done on the same day crosses the milestone again
        let duplicate = self.notifications.list(true)?.iter().any(|n| {
            n.habit_id == pending.habit_id && n.kind == pending.kind && n.title == pending.title
        });
        if duplicate {
            tracing::debug!(
                habit = %habit.name,
                title = %pending.title,
                "milestone already unread"
            );
            return Ok(None);
        }

        let stored = self.notifications.push(&pending)?;
        tracing::info!(
            habit = %habit.name,
            streak = streak_after,
            notification = stored.id,
            "streak milestone reached"
        );
        Ok(Some(stored))
    }

    /// Remove the completion for `day`.
    ///
    /// # Errors
    ///
    /// Returns an error if the habit does not exist, the window is invalid,
    /// or the store fails.
    pub fn undo(
        &self,
        key: &str,
        day: NaiveDate,
        today: NaiveDate,
    ) -> Result<CompletionOutcome, HabitError> {
        let habit = self.habits.find_habit(key)?;
        let mut record = self.habits.completions(habit.id)?;

        record.remove(day);
        let report = HabitReport::build(&habit, &record, today, self.window_days)?;

        let changed = self.habits.unmark(habit.id, day)?;
        tracing::info!(habit = %habit.name, %day, changed, "removed completion");

        Ok(CompletionOutcome {
            habit,
            date: day,
            changed,
            report,
            notification: None,
        })
    }

    /// A habit and its full completion record.
    ///
    /// # Errors
    ///
    /// Returns an error if the habit does not exist or the store fails.
    pub fn history(&self, key: &str) -> Result<(Habit, CompletionRecord), HabitError> {
        let habit = self.habits.find_habit(key)?;
        let record = self.habits.completions(habit.id)?;
        Ok((habit, record))
    }

    /// Stats for one habit as of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the habit does not exist, the window is invalid,
    /// or the store fails.
    pub fn report(&self, key: &str, today: NaiveDate) -> Result<HabitReport, HabitError> {
        let (habit, record) = self.history(key)?;
        HabitReport::build(&habit, &record, today, self.window_days)
    }

    /// Stats for every active habit, in name order.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is invalid or the store fails.
    pub fn dashboard(&self, today: NaiveDate) -> Result<Vec<HabitReport>, HabitError> {
        self.habits
            .list_habits(false)?
            .iter()
            .map(|habit| {
                let record = self.habits.completions(habit.id)?;
                HabitReport::build(habit, &record, today, self.window_days)
            })
            .collect()
    }

    /// Reminders for active habits whose streak lapses unless done today.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn remind(&self, now: NaiveDateTime) -> Result<Vec<NewNotification>, HabitError> {
        let habits = self.habits.list_habits(false)?;
        let records = habits
            .iter()
            .map(|habit| self.habits.completions(habit.id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reminders(habits.iter().zip(records.iter()), now))
    }
}
