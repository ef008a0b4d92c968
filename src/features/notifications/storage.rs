//! Notification storage.
//!
//! Persists notifications to the local database.

use chrono::{NaiveDateTime, SubsecRound};
use rusqlite::{params, Row};

use super::types::{NewNotification, Notification, NotificationKind};
use crate::error::HabitError;
use crate::storage::Database;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Storage for notifications.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationStore {
    /// Store a notification and return it with its id.
    fn push(&self, notification: &NewNotification) -> Result<Notification, HabitError>;

    /// List notifications, newest first.
    fn list(&self, unread_only: bool) -> Result<Vec<Notification>, HabitError>;

    /// Mark one notification as read.
    fn mark_read(&self, id: i64) -> Result<(), HabitError>;

    /// Mark everything as read. Returns how many changed.
    fn mark_all_read(&self) -> Result<usize, HabitError>;

    /// Delete all notifications. Returns how many were removed.
    fn clear(&self) -> Result<usize, HabitError>;
}

/// `SQLite`-backed notification store.
pub struct SqliteNotificationStore<'a> {
    db: &'a Database,
}

impl<'a> SqliteNotificationStore<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

impl NotificationStore for SqliteNotificationStore<'_> {
    fn push(&self, notification: &NewNotification) -> Result<Notification, HabitError> {
        let conn = self.db.connection();
        // stored with whole-second precision
        let created_at = notification.created_at.trunc_subsecs(0);

        conn.execute(
            r"INSERT INTO notifications (habit_id, kind, title, message, created_at)
              VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                notification.habit_id,
                notification.kind.as_str(),
                notification.title,
                notification.message,
                created_at.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )
        .map_err(|e| HabitError::Database(format!("Failed to insert notification: {e}")))?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, kind = %notification.kind, "stored notification");

        Ok(Notification {
            id,
            habit_id: notification.habit_id,
            kind: notification.kind,
            title: notification.title.clone(),
            message: notification.message.clone(),
            created_at,
            read: false,
        })
    }

    fn list(&self, unread_only: bool) -> Result<Vec<Notification>, HabitError> {
        let mut stmt = self
            .db
            .connection()
            .prepare(
                r"SELECT id, habit_id, kind, title, message, created_at, read
                  FROM notifications
                  WHERE read = 0 OR NOT ?1
                  ORDER BY created_at DESC, id DESC",
            )
            .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([unread_only], row_to_notification)
            .map_err(|e| HabitError::Database(format!("Failed to query notifications: {e}")))?;

        let mut notifications = Vec::new();
        for row in rows {
            notifications.push(row.map_err(|e| HabitError::Database(e.to_string()))?);
        }
        Ok(notifications)
    }

    fn mark_read(&self, id: i64) -> Result<(), HabitError> {
        let changed = self
            .db
            .connection()
            .execute("UPDATE notifications SET read = 1 WHERE id = ?1", [id])
            .map_err(|e| HabitError::Database(format!("Failed to update notification: {e}")))?;

        if changed == 0 {
            return Err(HabitError::NotFound(format!("notification {id}")));
        }
        Ok(())
    }

    fn mark_all_read(&self) -> Result<usize, HabitError> {
        self.db
            .connection()
            .execute("UPDATE notifications SET read = 1 WHERE read = 0", [])
            .map_err(|e| HabitError::Database(format!("Failed to update notifications: {e}")))
    }

    fn clear(&self) -> Result<usize, HabitError> {
        self.db
            .connection()
            .execute("DELETE FROM notifications", [])
            .map_err(|e| HabitError::Database(format!("Failed to clear notifications: {e}")))
    }
}

fn row_to_notification(row: &Row<'_>) -> rusqlite::Result<Notification> {
    let kind: String = row.get(2)?;
    let kind = kind.parse::<NotificationKind>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let created_at: String = row.get(5)?;
    let created_at = NaiveDateTime::parse_from_str(&created_at, TIMESTAMP_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Notification {
        id: row.get(0)?,
        habit_id: row.get(1)?,
        kind,
        title: row.get(3)?,
        message: row.get(4)?,
        created_at,
        read: row.get(6)?,
    })
}
