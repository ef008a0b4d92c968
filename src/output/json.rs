//! JSON output formatting for habitual.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use crate::error::HabitError;
use crate::features::notifications::{group_by_bucket, Notification};
use crate::features::stats::HabitReport;

/// Format a list as `{ "<key>": [...], "count": n }`.
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_list_json<T: Serialize>(key: &str, items: &[T]) -> Result<String, HabitError> {
    let output = json!({
        "count": items.len(),
        key: items,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the dashboard as JSON.
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_dashboard_json(
    reports: &[HabitReport],
    today: NaiveDate,
) -> Result<String, HabitError> {
    let output = json!({
        "today": today,
        "count": reports.len(),
        "habits": reports,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format notifications as JSON, grouped by date bucket.
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_notifications_json(
    notifications: &[Notification],
    today: NaiveDate,
) -> Result<String, HabitError> {
    let groups: Vec<_> = group_by_bucket(notifications, today)
        .into_iter()
        .map(|(bucket, items)| {
            json!({
                "bucket": bucket,
                "label": bucket.label(),
                "items": items,
            })
        })
        .collect();

    let output = json!({
        "count": notifications.len(),
        "unread": notifications.iter().filter(|n| !n.read).count(),
        "groups": groups,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type.
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, HabitError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notifications::NotificationKind;
    use crate::features::stats::HabitStats;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn report(name: &str, streak: usize) -> HabitReport {
        HabitReport {
            habit_id: 1,
            name: name.to_string(),
            stats: HabitStats {
                current_streak: streak,
                rolling_progress_percent: 17,
            },
            window_days: 30,
            longest_streak: streak,
            total_completions: 5,
            last_completion: Some(date(2025, 3, 16)),
            done_today: true,
        }
    }

    #[test]
    fn test_format_list_json_empty() {
        let items: Vec<String> = vec![];
        let result = format_list_json("habits", &items).unwrap();

        assert!(result.contains("\"count\": 0"));
        assert!(result.contains("\"habits\": []"));
    }

    #[test]
    fn test_format_dashboard_json() {
        let result = format_dashboard_json(&[report("Read", 5)], date(2025, 3, 16)).unwrap();

        assert!(result.contains("\"today\": \"2025-03-16\""));
        assert!(result.contains("\"currentStreak\": 5"));
        assert!(result.contains("\"rollingProgressPercent\": 17"));
        assert!(result.contains("\"lastCompletion\": \"2025-03-16\""));
    }

    #[test]
    fn test_format_notifications_json_groups() {
        let today = date(2025, 3, 16);
        let notifications = vec![
            Notification {
                id: 2,
                habit_id: Some(1),
                kind: NotificationKind::Milestone,
                title: "7-day streak!".to_string(),
                message: "Read is on a 7-day streak".to_string(),
                created_at: today.and_hms_opt(8, 0, 0).unwrap(),
                read: false,
            },
            Notification {
                id: 1,
                habit_id: None,
                kind: NotificationKind::Info,
                title: "Welcome".to_string(),
                message: String::new(),
                created_at: date(2025, 3, 15).and_hms_opt(8, 0, 0).unwrap(),
                read: true,
            },
        ];

        let result = format_notifications_json(&notifications, today).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["unread"], 1);
        assert_eq!(value["groups"][0]["bucket"], "today");
        assert_eq!(value["groups"][1]["label"], "Yesterday");
        assert_eq!(value["groups"][0]["items"][0]["kind"], "milestone");
    }

    #[test]
    fn test_json_preserves_special_characters() {
        let result = to_json(&report("Say \"no\"\tto sugar", 1)).unwrap();
        assert!(result.contains("\\\"no\\\""));
        assert!(result.contains("\\t"));
    }
}
