use crate::error::AppError;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

/// Tag carried by an occupied interval, used for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Regular,
    Booking,
}

/// A half-open time-of-day range [start, end) in minutes since midnight.
#[derive(Debug, Clone, Serialize)]
pub struct TimeInterval {
    pub start: u16,
    pub end: u16,
    #[serde(rename = "type")]
    pub kind: SlotKind,
    pub label: String,
}

/// Parses "HH:MM" (leading zero optional on the hour) into minutes since
/// midnight. Anything outside 00:00..=23:59 is rejected.
pub fn parse_time_to_minutes(text: &str) -> Result<u16, AppError> {
    let invalid = || AppError::InvalidTime(text.to_string());

    let (hours_part, minutes_part) = text.split_once(':').ok_or_else(invalid)?;
    if hours_part.is_empty() || hours_part.len() > 2 || minutes_part.len() != 2 {
        return Err(invalid());
    }
    if !hours_part.bytes().all(|b| b.is_ascii_digit())
        || !minutes_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let hours: u16 = hours_part.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes_part.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Inverse of [`parse_time_to_minutes`], always zero-padded.
pub fn format_minutes_to_time(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Strict half-open overlap test. Intervals that merely touch at an endpoint
/// do not overlap, so back-to-back bookings are allowed.
pub fn intervals_overlap(start_a: u16, end_a: u16, start_b: u16, end_b: u16) -> bool {
    start_a < end_b && end_a > start_b
}

/// Weekday index with 0 = Sunday .. 6 = Saturday, matching how recurring
/// schedules store `day_of_week`. Every caller derives the weekday through
/// this one function.
pub fn weekday_index(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

/// The two immutable boundaries of a calendar day: [date, date + 1 day).
/// Day-scoped store queries compare against both bounds.
pub fn day_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    (date, date + Days::new(1))
}
