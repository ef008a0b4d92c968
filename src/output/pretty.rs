use chrono::NaiveDate;
use colored::Colorize;

use crate::features::notifications::milestones::at_risk;
use crate::features::notifications::{group_by_bucket, NewNotification, Notification};
use crate::features::stats::{render_bar_chart, render_progress_bar, render_sparkline, HabitReport};
use crate::habits::{CompletionOutcome, Habit};

const PROGRESS_WIDTH: usize = 20;

fn streak_label(streak: usize) -> String {
    match streak {
        0 => "0 days".dimmed().to_string(),
        1 => "1 day".green().to_string(),
        n => format!("{n} days").green().bold().to_string(),
    }
}

/// Format a list of habits as a table
pub fn format_habits_pretty(habits: &[Habit]) -> String {
    if habits.is_empty() {
        return "Habits (0)\n  No habits yet. Add one with: habitual add \"Read\"".to_string();
    }

    let mut output = format!("Habits ({})\n", habits.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for habit in habits {
        let mut line = format!("{:>4}  {}", habit.id.to_string().dimmed(), habit.name.bold());
        if let Some(description) = &habit.description {
            line.push_str(&format!("  {}", description.dimmed()));
        }
        if habit.archived {
            line.push_str(&format!("  {}", "(archived)".yellow()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single habit
pub fn format_habit_pretty(habit: &Habit) -> String {
    let mut output = format!("{} {}\n", "Tracking".green(), habit.name.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), habit.id));
    if let Some(description) = &habit.description {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), description));
    }
    output
}

/// Format the result of marking or unmarking a day
pub fn format_outcome_pretty(outcome: &CompletionOutcome, undo: bool) -> String {
    let name = outcome.habit.name.bold();
    let mut output = match (undo, outcome.changed) {
        (false, true) => format!("{} {name} on {}\n", "[x]".green(), outcome.date),
        (false, false) => format!(
            "{} {name} was already done on {}\n",
            "[x]".dimmed(),
            outcome.date
        ),
        (true, true) => format!("{} {name} unmarked for {}\n", "[ ]".yellow(), outcome.date),
        (true, false) => format!("{} {name} was not done on {}\n", "[ ]".dimmed(), outcome.date),
    };

    let stats = &outcome.report.stats;
    output.push_str(&format!(
        "  Streak: {}  Last {} days: {}\n",
        streak_label(stats.current_streak),
        outcome.report.window_days,
        render_progress_bar(stats.rolling_progress_percent, PROGRESS_WIDTH)
    ));

    if let Some(notification) = &outcome.notification {
        output.push_str(&format!(
            "\n  {} {} {}\n",
            notification.kind.icon(),
            notification.title.yellow().bold(),
            notification.message
        ));
    }

    output
}

/// Format one habit's stats
pub fn format_report_pretty(report: &HabitReport, recent: &[usize], today: NaiveDate) -> String {
    let mut output = vec![
        format!("📊 {}", report.name.bold()),
        "─".repeat(50),
        format!(
            "  Current streak: {}  Longest: {} days",
            streak_label(report.stats.current_streak),
            report.longest_streak
        ),
        format!(
            "  Last {} days:   {}",
            report.window_days,
            render_progress_bar(report.stats.rolling_progress_percent, PROGRESS_WIDTH)
        ),
        format!("  Total completions: {}", report.total_completions),
    ];

    if let Some(days) = report.days_since_completion(today) {
        let last = match days {
            0 => "today".green().to_string(),
            1 => "yesterday".to_string(),
            n => format!("{n} days ago").yellow().to_string(),
        };
        output.push(format!("  Last done: {last}"));
    }

    if !recent.is_empty() {
        output.push(format!(
            "  Last {} days: {}",
            recent.len(),
            render_sparkline(recent).green()
        ));
    }

    if at_risk(report) {
        output.push(String::new());
        output.push(format!(
            "  {} Not done today yet - keep the streak alive",
            "!".yellow().bold()
        ));
    }

    output.join("\n")
}

/// Format the dashboard of all habits
pub fn format_dashboard_pretty(reports: &[HabitReport], today: NaiveDate) -> String {
    if reports.is_empty() {
        return "No habits yet. Add one with: habitual add \"Read\"".to_string();
    }

    let mut output = vec![
        format!("🔥 HABITS  {}", today.format("%a %b %d").to_string().dimmed()),
        "─".repeat(60),
    ];

    let name_width = reports
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(24);

    for report in reports {
        let check = if report.done_today {
            "[x]".green()
        } else {
            "[ ]".white()
        };
        let name: String = report.name.chars().take(name_width).collect();
        let warning = if at_risk(report) {
            format!("  {}", "!".yellow().bold())
        } else {
            String::new()
        };
        output.push(format!(
            "{check} {name:name_width$}  {:>3}d  {}{warning}",
            report.stats.current_streak,
            render_progress_bar(report.stats.rolling_progress_percent, PROGRESS_WIDTH)
        ));
    }

    let done = reports.iter().filter(|r| r.done_today).count();
    output.push(String::new());
    output.push(format!("  Done today: {done}/{}", reports.len()));

    let streaks: Vec<(String, usize)> = reports
        .iter()
        .filter(|r| r.stats.current_streak > 0)
        .map(|r| (r.name.clone(), r.stats.current_streak))
        .collect();
    if !streaks.is_empty() {
        output.push(String::new());
        output.push("STREAKS".bold().to_string());
        output.push(render_bar_chart(&streaks, name_width.max(3), 30));
    }

    output.join("\n")
}

/// Format notifications grouped by day
pub fn format_notifications_pretty(notifications: &[Notification], today: NaiveDate) -> String {
    if notifications.is_empty() {
        return "Notifications (0)\n  Nothing here".to_string();
    }

    let unread = notifications.iter().filter(|n| !n.read).count();
    let mut output = format!("Notifications ({}, {unread} unread)\n", notifications.len());

    for (bucket, items) in group_by_bucket(notifications, today) {
        output.push('\n');
        output.push_str(&bucket.label().bold().to_string());
        output.push('\n');

        for n in items {
            let marker = if n.read { " ".normal() } else { "•".cyan() };
            let title = if n.read {
                n.title.dimmed().to_string()
            } else {
                n.title.bold().to_string()
            };
            output.push_str(&format!(
                "{marker} {:>4} {} {title}  {}  {}\n",
                n.id.to_string().dimmed(),
                n.kind.icon(),
                n.message,
                n.created_at.format("%H:%M").to_string().dimmed()
            ));
        }
    }

    output
}

/// Format reminders for habits at risk
pub fn format_reminders_pretty(reminders: &[NewNotification]) -> String {
    if reminders.is_empty() {
        return format!("{} No streaks at risk today", "✓".green());
    }

    reminders
        .iter()
        .map(|r| format!("{} {}: {}", r.kind.icon(), r.title.yellow().bold(), r.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notifications::NotificationKind;
    use crate::features::stats::HabitStats;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit(name: &str) -> Habit {
        Habit {
            id: 3,
            name: name.to_string(),
            description: Some("every morning".to_string()),
            created_at: Utc::now(),
            archived: false,
        }
    }

    fn report(name: &str, streak: usize, done_today: bool) -> HabitReport {
        HabitReport {
            habit_id: 3,
            name: name.to_string(),
            stats: HabitStats {
                current_streak: streak,
                rolling_progress_percent: 50,
            },
            window_days: 30,
            longest_streak: streak + 2,
            total_completions: 15,
            last_completion: Some(date(2025, 3, 15)),
            done_today,
        }
    }

    #[test]
    fn test_format_habits_pretty_empty() {
        assert!(format_habits_pretty(&[]).contains("No habits yet"));
    }

    #[test]
    fn test_format_habits_pretty() {
        let mut archived = habit("Floss");
        archived.archived = true;
        let output = format_habits_pretty(&[habit("Read"), archived]);

        assert!(output.contains("Habits (2)"));
        assert!(output.contains("Read"));
        assert!(output.contains("every morning"));
        assert!(output.contains("(archived)"));
    }

    #[test]
    fn test_format_report_pretty_warns_when_streak_at_risk() {
        let today = date(2025, 3, 16);
        let output = format_report_pretty(&report("Read", 4, false), &[1, 1, 0, 1], today);

        assert!(output.contains("Read"));
        assert!(output.contains("Longest: 6 days"));
        assert!(output.contains("50%"));
        assert!(output.contains("yesterday"));
        assert!(output.contains("keep the streak alive"));
    }

    #[test]
    fn test_format_dashboard_pretty() {
        let today = date(2025, 3, 16);
        let output = format_dashboard_pretty(
            &[report("Meditate", 0, false), report("Read", 5, true)],
            today,
        );

        assert!(output.contains("Done today: 1/2"));
        assert!(output.contains("STREAKS"));
        assert!(output.contains("Meditate"));
    }

    #[test]
    fn test_format_notifications_pretty_buckets() {
        let today = date(2025, 3, 16);
        let n = Notification {
            id: 1,
            habit_id: Some(3),
            kind: NotificationKind::Milestone,
            title: "7-day streak!".to_string(),
            message: "Read is on a 7-day streak".to_string(),
            created_at: date(2025, 3, 12).and_hms_opt(7, 5, 0).unwrap(),
            read: false,
        };

        let output = format_notifications_pretty(&[n], today);
        assert!(output.contains("1 unread"));
        assert!(output.contains("This week"));
        assert!(!output.contains("Today"));
        assert!(output.contains("07:05"));
    }

    #[test]
    fn test_format_reminders_pretty_none() {
        assert!(format_reminders_pretty(&[]).contains("No streaks at risk"));
    }
}
