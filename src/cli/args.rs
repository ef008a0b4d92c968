use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::core::parse_iso_date;
use crate::features::stats::MAX_HEATMAP_WEEKS;

#[derive(Parser)]
#[command(name = "habitual")]
#[command(about = "Track daily habits, streaks, and rolling progress from the terminal")]
#[command(long_about = "habitual - a local-first habit tracker

Check habits off day by day and see how your streaks and rolling
completion rate are doing. Data lives in ~/.habitual/.

QUICK START:
  habitual add \"Read\"          Start tracking a habit
  habitual done read           Mark it done today
  habitual done read -d yesterday
  habitual stats               Dashboard of every habit
  habitual stats read          Details for one habit

STREAKS:
  A streak counts consecutive days ending today. If today isn't done yet,
  the streak still counts through yesterday; missing yesterday too resets it.

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Treat this date (YYYY-MM-DD) as today
    ///
    /// Useful for backfilling or for checking what stats looked like on a
    /// given day.
    #[arg(long, global = true, value_parser = parse_today)]
    pub today: Option<NaiveDate>,

    /// Enable debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_today(input: &str) -> Result<NaiveDate, String> {
    parse_iso_date(input).map_err(|e| e.to_string())
}

fn parse_weeks(input: &str) -> Result<usize, String> {
    let weeks: usize = input.parse().map_err(|e| format!("'{input}': {e}"))?;
    if (1..=MAX_HEATMAP_WEEKS).contains(&weeks) {
        Ok(weeks)
    } else {
        Err(format!("must be between 1 and {MAX_HEATMAP_WEEKS}"))
    }
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start tracking a new habit
    ///
    /// # Examples
    ///
    ///   habitual add "Read"
    ///   habitual add "Meditate" --description "10 minutes after waking up"
    #[command(alias = "a")]
    Add {
        /// Habit name (unique, case-insensitive)
        name: String,

        /// Optional description
        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// List tracked habits
    #[command(alias = "ls")]
    List {
        /// Include archived habits
        #[arg(long, short = 'a')]
        all: bool,
    },

    /// Mark a habit done
    ///
    /// Marking the same day twice is harmless.
    ///
    /// # Examples
    ///
    ///   habitual done read
    ///   habitual done read --date yesterday
    ///   habitual done 3 --date "2 days ago"
    #[command(alias = "d")]
    Done(DayArgs),

    /// Remove a completion
    ///
    /// # Examples
    ///
    ///   habitual undo read
    ///   habitual undo read --date 2025-03-14
    Undo(DayArgs),

    /// Show streaks and rolling progress
    ///
    /// Without a habit, shows the dashboard of every active habit.
    #[command(alias = "s")]
    Stats {
        /// Habit name or id
        habit: Option<String>,

        /// Rolling window in days (default: stats.window_days from config)
        #[arg(long, short = 'w')]
        window: Option<i64>,
    },

    /// Show a calendar heatmap for a habit
    Heatmap {
        /// Habit name or id
        habit: String,

        /// Number of weeks to show (default: stats.heatmap_weeks from config)
        #[arg(long, short = 'w', value_parser = parse_weeks)]
        weeks: Option<usize>,
    },

    /// Hide a habit from lists and the dashboard, keeping its history
    Archive {
        /// Habit name or id
        habit: String,
    },

    /// Delete a habit and its whole history
    #[command(alias = "rm")]
    Remove {
        /// Habit name or id
        habit: String,

        /// Skip the safety check
        #[arg(long)]
        force: bool,
    },

    /// Show and manage notifications
    #[command(alias = "n")]
    Notifications(NotificationsArgs),

    /// List habits whose streak lapses unless done today
    Remind,

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   habitual completions zsh > ~/.zsh/completions/_habitual
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// A habit plus the day to act on.
#[derive(Args, Debug)]
pub struct DayArgs {
    /// Habit name or id
    pub habit: String,

    /// Day to act on: today, yesterday, "N days ago", a weekday, or YYYY-MM-DD
    #[arg(long, short = 'd', default_value = "today")]
    pub date: String,
}

/// Arguments for notifications.
#[derive(Args)]
pub struct NotificationsArgs {
    #[command(subcommand)]
    pub command: Option<NotificationCommands>,
}

/// Notification subcommands.
#[derive(Subcommand)]
pub enum NotificationCommands {
    /// List notifications grouped by day (default)
    List {
        /// Only unread notifications
        #[arg(long, short = 'u')]
        unread: bool,
    },

    /// Mark a notification as read
    Read {
        /// Notification id
        id: i64,
    },

    /// Mark every notification as read
    ReadAll,

    /// Delete all notifications
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_add() {
        let cli = Cli::try_parse_from(["habitual", "add", "Read", "-d", "20 pages"]).unwrap();
        if let Commands::Add { name, description } = cli.command {
            assert_eq!(name, "Read");
            assert_eq!(description.as_deref(), Some("20 pages"));
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_cli_done_defaults_to_today() {
        let cli = Cli::try_parse_from(["habitual", "done", "read"]).unwrap();
        if let Commands::Done(args) = cli.command {
            assert_eq!(args.habit, "read");
            assert_eq!(args.date, "today");
        } else {
            panic!("Expected Done command");
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "habitual", "stats", "read", "--today", "2025-03-16", "-o", "json", "-w", "7",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2025, 3, 16));
        if let Commands::Stats { habit, window } = cli.command {
            assert_eq!(habit.as_deref(), Some("read"));
            assert_eq!(window, Some(7));
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_cli_rejects_bad_today() {
        assert!(Cli::try_parse_from(["habitual", "list", "--today", "soon"]).is_err());
    }

    #[test]
    fn test_cli_stats_negative_window_parses() {
        // validated by the engine, not by clap
        let cli = Cli::try_parse_from(["habitual", "stats", "--window=-3"]).unwrap();
        assert!(matches!(cli.command, Commands::Stats { window: Some(-3), .. }));
    }

    #[test]
    fn test_cli_heatmap_weeks_bounds() {
        let cli = Cli::try_parse_from(["habitual", "heatmap", "read", "-w", "520"]).unwrap();
        assert!(matches!(cli.command, Commands::Heatmap { weeks: Some(520), .. }));

        for weeks in ["0", "521", "9223372036854775807", "-1"] {
            assert!(
                Cli::try_parse_from(["habitual", "heatmap", "read", "--weeks", weeks]).is_err(),
                "accepted --weeks {weeks}"
            );
        }
    }

    #[test]
    fn test_cli_notifications_default() {
        let cli = Cli::try_parse_from(["habitual", "notifications"]).unwrap();
        if let Commands::Notifications(args) = cli.command {
            assert!(args.command.is_none());
        } else {
            panic!("Expected Notifications command");
        }
    }

    #[test]
    fn test_cli_notifications_read() {
        let cli = Cli::try_parse_from(["habitual", "notifications", "read", "4"]).unwrap();
        if let Commands::Notifications(args) = cli.command {
            assert!(matches!(args.command, Some(NotificationCommands::Read { id: 4 })));
        } else {
            panic!("Expected Notifications command");
        }
    }

    #[test]
    fn test_cli_completions() {
        let cli = Cli::try_parse_from(["habitual", "completions", "bash"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Bash }));
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
