//! Habit management commands: add, list, done, undo, archive, remove.

use colored::Colorize;

use super::Context;
use crate::cli::args::{DayArgs, OutputFormat};
use crate::core::parse_day;
use crate::error::HabitError;
use crate::habits::{HabitStore, HabitTracker, NewHabit};
use crate::output::{format_habit, format_habits, format_outcome, to_json};

/// Start tracking a habit.
///
/// # Errors
///
/// Returns an error if the name is empty or taken, or the store fails.
pub fn add(ctx: &Context, name: &str, description: Option<String>) -> Result<String, HabitError> {
    let habits = ctx.habit_store();
    let notifications = ctx.notification_store();
    let tracker = HabitTracker::new(&habits, &notifications);

    let habit = tracker.add(&NewHabit {
        name: name.to_string(),
        description,
    })?;
    format_habit(&habit, ctx.format)
}

/// List habits.
///
/// # Errors
///
/// Returns an error if the store fails or output formatting fails.
pub fn list(ctx: &Context, all: bool) -> Result<String, HabitError> {
    let habits = ctx.habit_store().list_habits(all)?;
    format_habits(&habits, ctx.format)
}

/// Mark a habit done for a day.
///
/// # Errors
///
/// Returns an error if the date cannot be parsed, the habit is unknown, or
/// the store fails.
pub fn done(ctx: &Context, args: &DayArgs) -> Result<String, HabitError> {
    let day = parse_day(&args.date, ctx.today())?;
    let habits = ctx.habit_store();
    let notifications = ctx.notification_store();
    let tracker = HabitTracker::from_config(&habits, &notifications, &ctx.config);

    let outcome = tracker.complete(&args.habit, day, ctx.now)?;
    format_outcome(&outcome, false, ctx.format)
}

/// Remove a completion for a day.
///
/// # Errors
///
/// Returns an error if the date cannot be parsed, the habit is unknown, or
/// the store fails.
pub fn undo(ctx: &Context, args: &DayArgs) -> Result<String, HabitError> {
    let day = parse_day(&args.date, ctx.today())?;
    let habits = ctx.habit_store();
    let notifications = ctx.notification_store();
    let tracker = HabitTracker::from_config(&habits, &notifications, &ctx.config);

    let outcome = tracker.undo(&args.habit, day, ctx.today())?;
    format_outcome(&outcome, true, ctx.format)
}

/// Archive a habit.
///
/// # Errors
///
/// Returns an error if the habit is unknown or the store fails.
pub fn archive(ctx: &Context, key: &str) -> Result<String, HabitError> {
    let store = ctx.habit_store();
    let habit = store.find_habit(key)?;
    store.archive_habit(habit.id)?;

    match ctx.format {
        OutputFormat::Json => to_json(&serde_json::json!({ "archived": habit.id })),
        OutputFormat::Pretty => Ok(format!("Archived {}", habit.name.bold())),
    }
}

/// Delete a habit and its history.
///
/// A habit with recorded completions is only deleted with `force`.
///
/// # Errors
///
/// Returns an error if the habit is unknown, has history and `force` is
/// not set, or the store fails.
pub fn remove(ctx: &Context, key: &str, force: bool) -> Result<String, HabitError> {
    let store = ctx.habit_store();
    let habit = store.find_habit(key)?;
    let history = store.completions(habit.id)?.len();

    if history > 0 && !force {
        return Err(HabitError::invalid_argument(format!(
            "'{}' has {history} recorded completions; pass --force to delete them, \
             or use 'habitual archive' to keep them",
            habit.name
        )));
    }

    store.delete_habit(habit.id)?;

    match ctx.format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "deleted": habit.id,
            "completionsRemoved": history,
        })),
        OutputFormat::Pretty => Ok(format!(
            "Deleted {} ({history} completions)",
            habit.name.bold()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::context;
    use super::*;
    use crate::features::notifications::NotificationStore;

    fn day(habit: &str, date: &str) -> DayArgs {
        DayArgs {
            habit: habit.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_add_then_done_json() {
        let ctx = context(OutputFormat::Json);
        add(&ctx, "Read", None).unwrap();

        done(&ctx, &day("read", "yesterday")).unwrap();
        let output = done(&ctx, &day("read", "today")).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["changed"], true);
        assert_eq!(value["date"], "2025-03-16");
        assert_eq!(value["report"]["currentStreak"], 2);
        assert_eq!(value["report"]["rollingProgressPercent"], 7);
    }

    #[test]
    fn test_done_third_day_stores_milestone() {
        let ctx = context(OutputFormat::Json);
        add(&ctx, "Read", None).unwrap();

        done(&ctx, &day("read", "2 days ago")).unwrap();
        done(&ctx, &day("read", "yesterday")).unwrap();
        let output = done(&ctx, &day("read", "today")).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["notification"]["title"], "3-day streak!");
    }

    #[test]
    fn test_undo_then_done_keeps_one_unread_milestone() {
        let ctx = context(OutputFormat::Json);
        add(&ctx, "Read", None).unwrap();
        done(&ctx, &day("read", "2 days ago")).unwrap();
        done(&ctx, &day("read", "yesterday")).unwrap();
        done(&ctx, &day("read", "today")).unwrap();

        undo(&ctx, &day("read", "today")).unwrap();
        let output = done(&ctx, &day("read", "today")).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["report"]["currentStreak"], 3);
        assert!(value["notification"].is_null());
        assert_eq!(ctx.notification_store().list(false).unwrap().len(), 1);
    }

    #[test]
    fn test_undo() {
        let ctx = context(OutputFormat::Json);
        add(&ctx, "Read", None).unwrap();
        done(&ctx, &day("read", "today")).unwrap();

        let output = undo(&ctx, &day("read", "today")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["changed"], true);
        assert_eq!(value["report"]["currentStreak"], 0);
    }

    #[test]
    fn test_done_rejects_bad_date() {
        let ctx = context(OutputFormat::Pretty);
        add(&ctx, "Read", None).unwrap();
        assert!(matches!(
            done(&ctx, &day("read", "someday")),
            Err(HabitError::Input(_))
        ));
    }

    #[test]
    fn test_remove_requires_force_with_history() {
        let ctx = context(OutputFormat::Pretty);
        add(&ctx, "Read", None).unwrap();
        done(&ctx, &day("read", "today")).unwrap();

        assert!(matches!(
            remove(&ctx, "read", false),
            Err(HabitError::InvalidArgument(_))
        ));
        remove(&ctx, "read", true).unwrap();
        assert!(ctx.habit_store().list_habits(true).unwrap().is_empty());
    }

    #[test]
    fn test_archive_hides_from_list() {
        let ctx = context(OutputFormat::Json);
        add(&ctx, "Read", None).unwrap();
        archive(&ctx, "read").unwrap();

        let value: serde_json::Value = serde_json::from_str(&list(&ctx, false).unwrap()).unwrap();
        assert_eq!(value["count"], 0);
        let value: serde_json::Value = serde_json::from_str(&list(&ctx, true).unwrap()).unwrap();
        assert_eq!(value["count"], 1);
    }
}
