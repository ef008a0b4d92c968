//! Habit persistence.
//!
//! [`HabitStore`] is the seam between the stats engine's callers and
//! wherever habits live. [`SqliteHabitStore`] is the on-disk implementation.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::types::{CompletionRecord, Habit, NewHabit};
use crate::error::HabitError;
use crate::storage::Database;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage for habits and their completion dates.
#[cfg_attr(test, mockall::automock)]
pub trait HabitStore {
    /// Create a habit. Names are unique, ignoring case.
    fn create_habit(&self, habit: &NewHabit) -> Result<Habit, HabitError>;

    /// List habits ordered by name.
    fn list_habits(&self, include_archived: bool) -> Result<Vec<Habit>, HabitError>;

    /// Look up a habit by numeric id or by name.
    fn find_habit(&self, key: &str) -> Result<Habit, HabitError>;

    /// Hide a habit from the default list without losing its history.
    fn archive_habit(&self, id: i64) -> Result<(), HabitError>;

    /// Delete a habit and all of its completions.
    fn delete_habit(&self, id: i64) -> Result<(), HabitError>;

    /// Record a completion. Returns `false` if the day was already recorded.
    fn mark_done(&self, id: i64, date: NaiveDate) -> Result<bool, HabitError>;

    /// Remove a completion. Returns `false` if there was nothing to remove.
    fn unmark(&self, id: i64, date: NaiveDate) -> Result<bool, HabitError>;

    /// All completion dates for a habit.
    fn completions(&self, id: i64) -> Result<CompletionRecord, HabitError>;
}

/// `SQLite`-backed habit store.
pub struct SqliteHabitStore<'a> {
    db: &'a Database,
}

impl<'a> SqliteHabitStore<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Habit>, HabitError> {
        self.db
            .connection()
            .query_row(
                "SELECT id, name, description, created_at, archived FROM habits WHERE id = ?1",
                [id],
                row_to_habit,
            )
            .optional()
            .map_err(|e| HabitError::Database(format!("Failed to query habit: {e}")))
    }

    fn get_by_name(&self, name: &str) -> Result<Option<Habit>, HabitError> {
        self.db
            .connection()
            .query_row(
                "SELECT id, name, description, created_at, archived FROM habits
                 WHERE name = ?1 COLLATE NOCASE",
                [name],
                row_to_habit,
            )
            .optional()
            .map_err(|e| HabitError::Database(format!("Failed to query habit: {e}")))
    }

    fn require(&self, id: i64) -> Result<(), HabitError> {
        self.get_by_id(id)?
            .map(|_| ())
            .ok_or_else(|| HabitError::NotFound(format!("habit with id {id}")))
    }
}

impl HabitStore for SqliteHabitStore<'_> {
    fn create_habit(&self, habit: &NewHabit) -> Result<Habit, HabitError> {
        let name = habit.name.trim();
        if name.is_empty() {
            return Err(HabitError::invalid_argument("habit name cannot be empty"));
        }
        if self.get_by_name(name)?.is_some() {
            return Err(HabitError::AlreadyExists(format!("habit '{name}'")));
        }

        let created_at = Utc::now();
        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO habits (name, description, created_at) VALUES (?1, ?2, ?3)",
            params![name, habit.description, created_at.to_rfc3339()],
        )
        .map_err(|e| HabitError::Database(format!("Failed to insert habit: {e}")))?;

        let id = conn.last_insert_rowid();
        tracing::info!(id, name, "created habit");

        Ok(Habit {
            id,
            name: name.to_string(),
            description: habit.description.clone(),
            created_at,
            archived: false,
        })
    }

    fn list_habits(&self, include_archived: bool) -> Result<Vec<Habit>, HabitError> {
        let mut stmt = self
            .db
            .connection()
            .prepare(
                "SELECT id, name, description, created_at, archived FROM habits
                 WHERE archived = 0 OR ?1
                 ORDER BY name COLLATE NOCASE",
            )
            .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([include_archived], row_to_habit)
            .map_err(|e| HabitError::Database(format!("Failed to query habits: {e}")))?;

        let mut habits = Vec::new();
        for row in rows {
            habits.push(row.map_err(|e| HabitError::Database(e.to_string()))?);
        }
        Ok(habits)
    }

    fn find_habit(&self, key: &str) -> Result<Habit, HabitError> {
        let key = key.trim();
        if let Ok(id) = key.parse::<i64>() {
            if let Some(habit) = self.get_by_id(id)? {
                return Ok(habit);
            }
        }

        self.get_by_name(key)?
            .ok_or_else(|| HabitError::NotFound(format!("habit '{key}'")))
    }

    fn archive_habit(&self, id: i64) -> Result<(), HabitError> {
        let changed = self
            .db
            .connection()
            .execute("UPDATE habits SET archived = 1 WHERE id = ?1", [id])
            .map_err(|e| HabitError::Database(format!("Failed to archive habit: {e}")))?;

        if changed == 0 {
            return Err(HabitError::NotFound(format!("habit with id {id}")));
        }
        Ok(())
    }

    fn delete_habit(&self, id: i64) -> Result<(), HabitError> {
        let changed = self
            .db
            .connection()
            .execute("DELETE FROM habits WHERE id = ?1", [id])
            .map_err(|e| HabitError::Database(format!("Failed to delete habit: {e}")))?;

        if changed == 0 {
            return Err(HabitError::NotFound(format!("habit with id {id}")));
        }
        tracing::info!(id, "deleted habit");
        Ok(())
    }

    fn mark_done(&self, id: i64, date: NaiveDate) -> Result<bool, HabitError> {
        self.require(id)?;
        let inserted = self
            .db
            .connection()
            .execute(
                "INSERT OR IGNORE INTO completions (habit_id, date) VALUES (?1, ?2)",
                params![id, date.format(DATE_FORMAT).to_string()],
            )
            .map_err(|e| HabitError::Database(format!("Failed to record completion: {e}")))?;

        Ok(inserted > 0)
    }

    fn unmark(&self, id: i64, date: NaiveDate) -> Result<bool, HabitError> {
        self.require(id)?;
        let removed = self
            .db
            .connection()
            .execute(
                "DELETE FROM completions WHERE habit_id = ?1 AND date = ?2",
                params![id, date.format(DATE_FORMAT).to_string()],
            )
            .map_err(|e| HabitError::Database(format!("Failed to remove completion: {e}")))?;

        Ok(removed > 0)
    }

    fn completions(&self, id: i64) -> Result<CompletionRecord, HabitError> {
        let mut stmt = self
            .db
            .connection()
            .prepare("SELECT date FROM completions WHERE habit_id = ?1")
            .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([id], |row| row.get::<_, String>(0))
            .map_err(|e| HabitError::Database(format!("Failed to query completions: {e}")))?;

        let mut record = CompletionRecord::new();
        for row in rows {
            let raw = row.map_err(|e| HabitError::Database(e.to_string()))?;
            let date = NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| {
                HabitError::Database(format!("Corrupt completion date '{raw}': {e}"))
            })?;
            record.insert(date);
        }
        Ok(record)
    }
}

fn row_to_habit(row: &Row<'_>) -> rusqlite::Result<Habit> {
    let created_at: String = row.get(3)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at,
        archived: row.get(4)?,
    })
}
