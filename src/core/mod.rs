//! Core utilities shared across habitual.

mod datetime;

pub use datetime::{parse_day, parse_iso_date};
