//! Notifications module.
//!
//! Milestone and reminder notifications for habits:
//! - Storage and read/unread tracking
//! - Grouping by relative date (today, yesterday, this week, earlier)
//! - Milestone detection when a streak grows

pub mod buckets;
pub mod milestones;
pub mod storage;
mod types;

pub use buckets::{group_by_bucket, DateBucket};
pub use milestones::{crossed_milestone, milestone_notification, reminders, DEFAULT_MILESTONES};
pub use storage::{NotificationStore, SqliteNotificationStore};
#[cfg(test)]
pub use storage::MockNotificationStore;
pub use types::{NewNotification, Notification, NotificationKind};
