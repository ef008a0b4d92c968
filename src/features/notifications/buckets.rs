//! Grouping notifications by how long ago they happened.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::Notification;

/// Relative date bucket, ordered newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateBucket {
    Today,
    Yesterday,
    ThisWeek,
    Earlier,
}

impl DateBucket {
    /// Bucket for a day relative to `today`. Future days count as today.
    #[must_use]
    pub fn classify(day: NaiveDate, today: NaiveDate) -> Self {
        match (today - day).num_days() {
            i64::MIN..=0 => Self::Today,
            1 => Self::Yesterday,
            2..=6 => Self::ThisWeek,
            _ => Self::Earlier,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::ThisWeek => "This week",
            Self::Earlier => "Earlier",
        }
    }
}

/// Group notifications into date buckets.
///
/// Buckets come out newest first and empty ones are skipped. Within a
/// bucket the input order is kept.
#[must_use]
pub fn group_by_bucket(
    notifications: &[Notification],
    today: NaiveDate,
) -> Vec<(DateBucket, Vec<&Notification>)> {
    let mut groups: Vec<(DateBucket, Vec<&Notification>)> = [
        DateBucket::Today,
        DateBucket::Yesterday,
        DateBucket::ThisWeek,
        DateBucket::Earlier,
    ]
    .into_iter()
    .map(|bucket| (bucket, Vec::new()))
    .collect();

    for notification in notifications {
        let bucket = DateBucket::classify(notification.created_at.date(), today);
        // groups is indexed in declaration order
        groups[bucket as usize].1.push(notification);
    }

    groups.retain(|(_, items)| !items.is_empty());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notifications::NotificationKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn notification(id: i64, day: NaiveDate) -> Notification {
        Notification {
            id,
            habit_id: None,
            kind: NotificationKind::Info,
            title: format!("n{id}"),
            message: String::new(),
            created_at: day.and_hms_opt(9, 30, 0).unwrap(),
            read: false,
        }
    }

    #[test]
    fn test_classify() {
        let today = date(2025, 3, 16);
        assert_eq!(DateBucket::classify(date(2025, 3, 17), today), DateBucket::Today);
        assert_eq!(DateBucket::classify(today, today), DateBucket::Today);
        assert_eq!(DateBucket::classify(date(2025, 3, 15), today), DateBucket::Yesterday);
        assert_eq!(DateBucket::classify(date(2025, 3, 14), today), DateBucket::ThisWeek);
        assert_eq!(DateBucket::classify(date(2025, 3, 10), today), DateBucket::ThisWeek);
        assert_eq!(DateBucket::classify(date(2025, 3, 9), today), DateBucket::Earlier);
    }

    #[test]
    fn test_group_by_bucket() {
        let today = date(2025, 3, 16);
        let items = vec![
            notification(5, date(2025, 3, 16)),
            notification(4, date(2025, 3, 12)),
            notification(3, date(2025, 3, 16)),
            notification(2, date(2025, 1, 1)),
        ];

        let groups = group_by_bucket(&items, today);
        let summary: Vec<(DateBucket, Vec<i64>)> = groups
            .iter()
            .map(|(bucket, items)| (*bucket, items.iter().map(|n| n.id).collect()))
            .collect();

        assert_eq!(
            summary,
            vec![
                (DateBucket::Today, vec![5, 3]),
                (DateBucket::ThisWeek, vec![4]),
                (DateBucket::Earlier, vec![2]),
            ]
        );
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_bucket(&[], date(2025, 3, 16)).is_empty());
    }
}
