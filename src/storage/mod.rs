//! Storage layer for habitual.
//!
//! This module provides SQLite-based persistence for:
//! - Habits and their completion dates
//! - Notifications (milestones, reminders)

mod database;
mod migrations;

pub use database::Database;
