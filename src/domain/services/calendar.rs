use crate::domain::models::booking::BookingDetail;
use crate::error::AppError;
use chrono::{NaiveTime, TimeZone, Utc};
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};

/// Generates an iCalendar (.ics) string for an approved booking, attached to
/// the approval email.
pub fn generate_ics(booking: &BookingDetail) -> Result<String, AppError> {
    let start = NaiveTime::parse_from_str(&booking.start_time, "%H:%M")
        .map_err(|_| AppError::InvalidTime(booking.start_time.clone()))?;
    let end = NaiveTime::parse_from_str(&booking.end_time, "%H:%M")
        .map_err(|_| AppError::InvalidTime(booking.end_time.clone()))?;

    let starts_at = Utc.from_utc_datetime(&booking.booking_date.and_time(start));
    let ends_at = Utc.from_utc_datetime(&booking.booking_date.and_time(end));

    let mut calendar = Calendar::new();

    let ical_event = IcalEvent::new()
        .summary(&booking.purpose)
        .description(&format!("Classroom booking: {}", booking.classroom_name))
        .location(&booking.classroom_name)
        .starts(starts_at)
        .ends(ends_at)
        .uid(&booking.id)
        .done();

    calendar.push(ical_event);
    Ok(calendar.to_string())
}
