//! Habits and their completion history.

mod store;
mod tracker;
mod types;

pub use store::{HabitStore, SqliteHabitStore};
#[cfg(test)]
pub use store::MockHabitStore;
pub use tracker::{CompletionOutcome, HabitTracker};
pub use types::{CompletionRecord, Habit, NewHabit};
