//! Milestone and reminder generation.
//!
//! These only build notifications; storing and displaying them is up to
//! the caller.

use chrono::NaiveDateTime;

use super::types::{NewNotification, NotificationKind};
use crate::features::stats::{compute_current_streak, HabitReport};
use crate::habits::{CompletionRecord, Habit};

/// Streak lengths that trigger a milestone notification by default.
pub const DEFAULT_MILESTONES: [usize; 7] = [3, 7, 14, 30, 50, 100, 365];

/// The largest milestone in `(before, after]`, if any.
#[must_use]
pub fn crossed_milestone(milestones: &[usize], before: usize, after: usize) -> Option<usize> {
    milestones
        .iter()
        .copied()
        .filter(|m| *m > before && *m <= after)
        .max()
}

/// Build a milestone notification if the streak change crossed one.
#[must_use]
pub fn milestone_notification(
    habit: &Habit,
    milestones: &[usize],
    streak_before: usize,
    streak_after: usize,
    now: NaiveDateTime,
) -> Option<NewNotification> {
    let reached = crossed_milestone(milestones, streak_before, streak_after)?;

    Some(NewNotification {
        habit_id: Some(habit.id),
        kind: NotificationKind::Milestone,
        title: format!("{reached}-day streak!"),
        message: format!("{} is on a {streak_after}-day streak", habit.name),
        created_at: now,
    })
}

/// Reminders for habits with a live streak that are not done today yet.
#[must_use]
pub fn reminders<'a, I>(habits: I, now: NaiveDateTime) -> Vec<NewNotification>
where
    I: IntoIterator<Item = (&'a Habit, &'a CompletionRecord)>,
{
    let today = now.date();

    habits
        .into_iter()
        .filter(|(habit, record)| !habit.archived && !record.contains(today))
        .filter_map(|(habit, record)| {
            let streak = compute_current_streak(record, today);
            (streak > 0).then(|| NewNotification {
                habit_id: Some(habit.id),
                kind: NotificationKind::Reminder,
                title: format!("Keep your {streak}-day streak"),
                message: format!("{} is not done yet today", habit.name),
                created_at: now,
            })
        })
        .collect()
}

/// Whether a report's live streak lapses unless the habit is done today.
#[must_use]
pub fn at_risk(report: &HabitReport) -> bool {
    !report.done_today && report.stats.current_streak > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit(id: i64, name: &str) -> Habit {
        Habit {
            id,
            name: name.to_string(),
            description: None,
            created_at: Utc::now(),
            archived: false,
        }
    }

    #[test]
    fn test_crossed_milestone() {
        assert_eq!(crossed_milestone(&DEFAULT_MILESTONES, 6, 7), Some(7));
        assert_eq!(crossed_milestone(&DEFAULT_MILESTONES, 7, 8), None);
        // backfilling a gap can jump past several milestones
        assert_eq!(crossed_milestone(&DEFAULT_MILESTONES, 2, 20), Some(14));
        assert_eq!(crossed_milestone(&DEFAULT_MILESTONES, 5, 3), None);
        assert_eq!(crossed_milestone(&[], 0, 100), None);
    }

    #[test]
    fn test_milestone_notification() {
        let now = date(2025, 3, 16).and_hms_opt(8, 0, 0).unwrap();
        let n = milestone_notification(&habit(1, "Read"), &DEFAULT_MILESTONES, 6, 7, now).unwrap();

        assert_eq!(n.kind, NotificationKind::Milestone);
        assert_eq!(n.title, "7-day streak!");
        assert_eq!(n.message, "Read is on a 7-day streak");
        assert_eq!(n.habit_id, Some(1));
    }

    #[test]
    fn test_reminders() {
        let today = date(2025, 3, 16);
        let now = today.and_hms_opt(20, 0, 0).unwrap();

        let live = habit(1, "Read");
        let done = habit(2, "Run");
        let lapsed = habit(3, "Stretch");
        let mut archived = habit(4, "Old");
        archived.archived = true;

        let live_record: CompletionRecord =
            [date(2025, 3, 14), date(2025, 3, 15)].into_iter().collect();
        let done_record: CompletionRecord = [today].into_iter().collect();
        let lapsed_record: CompletionRecord = [date(2025, 3, 10)].into_iter().collect();

        let pairs = [
            (&live, &live_record),
            (&done, &done_record),
            (&lapsed, &lapsed_record),
            (&archived, &live_record),
        ];
        let out = reminders(pairs, now);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].habit_id, Some(1));
        assert_eq!(out[0].title, "Keep your 2-day streak");
    }
}
