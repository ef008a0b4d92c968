//! Notification commands: list, read, read-all, clear, and remind.

use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::{NotificationCommands, OutputFormat};
use crate::error::HabitError;
use crate::features::notifications::NotificationStore;
use crate::habits::HabitTracker;
use crate::output::{format_notifications, format_reminders, to_json};

/// Run a notifications subcommand; listing is the default.
///
/// # Errors
///
/// Returns an error if a notification id is unknown or the store fails.
pub fn notifications(
    ctx: &Context,
    command: Option<NotificationCommands>,
) -> Result<String, HabitError> {
    let store = ctx.notification_store();

    match command.unwrap_or(NotificationCommands::List { unread: false }) {
        NotificationCommands::List { unread } => {
            let items = store.list(unread)?;
            format_notifications(&items, ctx.today(), ctx.format)
        }
        NotificationCommands::Read { id } => {
            store.mark_read(id)?;
            match ctx.format {
                OutputFormat::Json => to_json(&json!({ "read": id })),
                OutputFormat::Pretty => Ok(format!("{} Marked {id} as read", "✓".green())),
            }
        }
        NotificationCommands::ReadAll => {
            let count = store.mark_all_read()?;
            summarize(ctx.format, "read", count, "Marked", "as read")
        }
        NotificationCommands::Clear => {
            let count = store.clear()?;
            summarize(ctx.format, "cleared", count, "Cleared", "")
        }
    }
}

fn summarize(
    format: OutputFormat,
    key: &str,
    count: usize,
    verb: &str,
    suffix: &str,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Json => to_json(&json!({ key: count })),
        OutputFormat::Pretty => {
            let noun = if count == 1 { "notification" } else { "notifications" };
            Ok(format!("{} {verb} {count} {noun} {suffix}", "✓".green())
                .trim_end()
                .to_string())
        }
    }
}

/// Show streaks that lapse unless their habit is done today.
///
/// Reminders are computed on the fly and not stored.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn remind(ctx: &Context) -> Result<String, HabitError> {
    let habits = ctx.habit_store();
    let notifications = ctx.notification_store();
    let tracker = HabitTracker::from_config(&habits, &notifications, &ctx.config);

    let pending = tracker.remind(ctx.now)?;
    tracing::debug!(count = pending.len(), "computed reminders");
    format_reminders(&pending, ctx.format)
}
