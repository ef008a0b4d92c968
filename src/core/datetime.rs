//! Date parsing for user input.
//!
//! Habits are checked off for days that already happened, so relative
//! expressions look backwards from the reference date.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::HabitError;

/// Parse a strict `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `HabitError::Input` if the string is not an ISO date.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, HabitError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| HabitError::Input(format!("'{input}' is not a YYYY-MM-DD date: {e}")))
}

/// Parse a day relative to `today`.
///
/// Supports:
/// - `today`, `yesterday`
/// - `N days ago`, `Nd` (e.g. `3 days ago`, `3d`)
/// - weekday names (`monday`, `mon`), meaning the most recent such day,
///   today included
/// - `2025-03-16` (ISO format)
///
/// # Errors
///
/// Returns `HabitError::Input` if the input matches none of these.
pub fn parse_day(input: &str, today: NaiveDate) -> Result<NaiveDate, HabitError> {
    let normalized = input.trim().to_lowercase();

    let back = |days: u64| {
        today
            .checked_sub_days(Days::new(days))
            .ok_or_else(|| HabitError::Input(format!("'{input}' is out of range")))
    };

    match normalized.as_str() {
        "today" => return Ok(today),
        "yesterday" => return back(1),
        _ => {}
    }

    if let Some(days) = parse_days_ago(&normalized) {
        return back(days);
    }

    if let Some(weekday) = parse_weekday(&normalized) {
        let offset = (7 + today.weekday().num_days_from_monday()
            - weekday.num_days_from_monday())
            % 7;
        return back(u64::from(offset));
    }

    parse_iso_date(&normalized).map_err(|_| {
        HabitError::Input(format!(
            "could not understand date '{input}' \
             (try today, yesterday, '3 days ago', or YYYY-MM-DD)"
        ))
    })
}

fn parse_days_ago(input: &str) -> Option<u64> {
    if let Some(rest) = input.strip_suffix(" ago") {
        let mut parts = rest.split_whitespace();
        let count = parts.next()?.parse().ok()?;
        let unit = parts.next()?;
        return (parts.next().is_none() && matches!(unit, "day" | "days")).then_some(count);
    }

    input.strip_suffix('d')?.parse().ok()
}

fn parse_weekday(input: &str) -> Option<Weekday> {
    match input {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}
