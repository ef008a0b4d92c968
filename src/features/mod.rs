//! Feature implementations for habitual.
//!
//! - Statistics (streaks, rolling progress, charts)
//! - Notifications (milestones, reminders, date buckets)
//! - Shell completions

pub mod completions;
pub mod notifications;
pub mod stats;
