//! Terminal visualization for habit statistics.
//!
//! Provides sparklines, progress bars, bar charts, and a calendar heatmap.

use chrono::{Datelike, Days, NaiveDate};

use crate::habits::CompletionRecord;

/// Characters for sparkline rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';
const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Widest heatmap accepted, about ten years.
pub const MAX_HEATMAP_WEEKS: usize = 520;

/// Render a horizontal bar chart.
///
/// # Arguments
///
/// * `data` - (label, value) pairs
/// * `max_label_width` - Labels longer than this are truncated
/// * `bar_width` - Width of the bar portion
pub fn render_bar_chart(
    data: &[(String, usize)],
    max_label_width: usize,
    bar_width: usize,
) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let mut lines = Vec::new();

    for (label, value) in data {
        let truncated_label = if label.chars().count() > max_label_width {
            let keep: String = label.chars().take(max_label_width.saturating_sub(3)).collect();
            format!("{keep}...")
        } else {
            format!("{label:max_label_width$}")
        };

        let bar_length = value * bar_width / max_value;
        let bar = FULL_BLOCK.to_string().repeat(bar_length);
        let padding = " ".repeat(bar_width - bar_length);

        lines.push(format!("{truncated_label} |{bar}{padding} {value}"));
    }

    lines.join("\n")
}

/// Render a sparkline (compact inline chart).
pub fn render_sparkline(values: &[usize]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let max_value = values.iter().max().copied().unwrap_or(1).max(1);

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                BAR_CHARS[0]
            } else if v >= max_value {
                FULL_BLOCK
            } else {
                BAR_CHARS[(v * 7 / max_value).clamp(1, 7)]
            }
        })
        .collect()
}

/// Render a progress bar for a percentage in `[0, 100]`.
pub fn render_progress_bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100);
    let filled = usize::from(percent) * width / 100;
    let empty = width - filled;

    format!(
        "[{}{}] {percent}%",
        FULL_BLOCK.to_string().repeat(filled),
        "░".repeat(empty)
    )
}

/// Render a calendar heatmap of completions.
///
/// Rows are days of the week, columns are weeks, and the rightmost column
/// is the week containing `today`. Days after `today` are left blank.
/// `weeks` is clamped to `1..=MAX_HEATMAP_WEEKS`.
pub fn render_heatmap(record: &CompletionRecord, today: NaiveDate, weeks: usize) -> String {
    let weeks = weeks.clamp(1, MAX_HEATMAP_WEEKS);
    let offset_in_week = u64::from(today.weekday().num_days_from_monday());
    let earlier_weeks = u64::try_from(weeks - 1).unwrap_or(0);
    let Some(first_monday) = today
        .checked_sub_days(Days::new(offset_in_week))
        .and_then(|monday| monday.checked_sub_days(Days::new(7 * earlier_weeks)))
    else {
        return String::new();
    };

    let mut lines = Vec::new();

    let mut header = "    ".to_string();
    for week in 0..weeks {
        header.push_str(&format!("W{:<2}", weeks - week));
    }
    lines.push(header);

    for (day_idx, label) in DAY_LABELS.iter().enumerate() {
        let mut row = format!("{label} ");
        for week in 0..weeks {
            let cell = first_monday
                .checked_add_days(Days::new((week * 7 + day_idx) as u64))
                .filter(|date| *date <= today)
                .map_or(' ', |date| if record.contains(date) { '█' } else { '·' });
            row.push_str(&format!(" {cell} "));
        }
        lines.push(row.trim_end().to_string());
    }

    lines.push(String::new());
    lines.push("Legend: · = missed  █ = done".to_string());

    lines.join("\n")
}
