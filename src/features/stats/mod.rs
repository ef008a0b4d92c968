//! Habit statistics.
//!
//! Provides the streak and rolling-progress engine plus the views built on it:
//! - Current and longest streaks
//! - Rolling completion percentage over a trailing window
//! - Per-habit dashboard reports
//! - Terminal charts

pub mod engine;
pub mod report;
pub mod visualization;

pub use engine::{
    completions_in_window, compute_current_streak, compute_longest_streak,
    compute_rolling_progress, compute_stats, daily_series, HabitStats, DEFAULT_WINDOW_DAYS,
};
pub use report::HabitReport;
pub use visualization::{
    render_bar_chart, render_heatmap, render_progress_bar, render_sparkline, MAX_HEATMAP_WEEKS,
};
