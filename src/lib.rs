//! habitual - a local-first habit tracker
//!
//! This crate tracks daily habits in a local `SQLite` database and computes
//! streaks and rolling completion percentages from their history. The
//! statistics engine in [`features::stats`] is pure: callers pass the
//! completion record and an explicit "today".

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod habits;
pub mod output;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::HabitError;
pub use features::stats::{compute_current_streak, compute_rolling_progress, HabitStats};
pub use habits::{CompletionRecord, HabitStore, HabitTracker};
