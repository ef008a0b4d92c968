//! Command implementations for habitual.
//!
//! Each command returns the text to print; `main` does the printing.

mod habit;
mod notifications;
mod stats;

pub use habit::{add, archive, done, list, remove, undo};
pub use notifications::{notifications, remind};
pub use stats::{heatmap, stats};

use chrono::{NaiveDate, NaiveDateTime};

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::features::notifications::SqliteNotificationStore;
use crate::habits::SqliteHabitStore;
use crate::storage::Database;

/// Everything a command needs: the open database, configuration, output
/// format, and the reference "now".
pub struct Context {
    pub db: Database,
    pub config: Config,
    pub format: OutputFormat,
    /// Reference time; the date part is "today" for every stat
    pub now: NaiveDateTime,
}

impl Context {
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    fn habit_store(&self) -> SqliteHabitStore<'_> {
        SqliteHabitStore::new(&self.db)
    }

    fn notification_store(&self) -> SqliteNotificationStore<'_> {
        SqliteNotificationStore::new(&self.db)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn context(format: OutputFormat) -> Context {
        Context {
            db: Database::open_in_memory().unwrap(),
            config: Config::default(),
            format,
            now: NaiveDate::from_ymd_opt(2025, 3, 16)
                .unwrap()
                .and_hms_opt(20, 0, 0)
                .unwrap(),
        }
    }
}
